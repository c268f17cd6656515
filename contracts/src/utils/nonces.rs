//! Per-account counters binding each signed permit to a single use.
//!
//! A signature covers the counter value it was made for. Once that value is
//! consumed, the same signature no longer matches and cannot be replayed.

use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, U256};
use stylus_sdk::{
    prelude::*,
    storage::{StorageMap, StorageU256},
};

use crate::utils::math::storage::AddAssignChecked;

/// State of a [`Nonces`] contract.
#[storage]
pub struct Nonces {
    /// Next unused nonce of each account.
    pub(crate) nonces: StorageMap<Address, StorageU256>,
}

/// Interface for [`Nonces`].
pub trait INonces {
    /// Returns the nonce the next signature of `owner` must carry.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account to get the nonce of.
    #[must_use]
    fn nonces(&self, owner: Address) -> U256;
}

#[public]
#[implements(INonces)]
impl Nonces {}

#[public]
impl INonces for Nonces {
    fn nonces(&self, owner: Address) -> U256 {
        self.nonces.get(owner)
    }
}

impl Nonces {
    /// Advances the nonce of `owner` by one, returning the consumed value.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - Account whose nonce is consumed.
    ///
    /// # Panics
    ///
    /// * If the nonce of `owner` is already [`U256::MAX`].
    pub fn use_nonce(&mut self, owner: Address) -> U256 {
        let consumed = self.nonces.get(owner);
        self.nonces.setter(owner).add_assign_checked(
            U256::ONE,
            "nonce should not exceed `U256::MAX`",
        );
        consumed
    }
}
