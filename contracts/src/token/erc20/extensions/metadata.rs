//! Optional Metadata of the ERC-20 standard.

use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{uint, U8};
use stylus_sdk::prelude::*;

use crate::utils::Metadata;

/// Number of decimals used by default on implementors of [`Erc20Metadata`].
pub const DEFAULT_DECIMALS: U8 = uint!(18_U8);

/// State of an [`Erc20Metadata`] contract.
#[storage]
pub struct Erc20Metadata {
    /// [`Metadata`] contract.
    pub(crate) metadata: Metadata,
}

/// Interface for the optional metadata functions from the ERC-20 standard.
pub trait IErc20Metadata {
    /// Returns the name of the token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn name(&self) -> String;

    /// Returns the symbol of the token, usually a shorter version of the name.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn symbol(&self) -> String;

    /// Returns the number of decimals used to get a user-friendly
    /// representation of values of this token.
    ///
    /// For example, if `decimals` equals `2`, a balance of `505` tokens should
    /// be displayed to a user as `5.05` (`505 / 10 ** 2`).
    ///
    /// Tokens usually opt for a value of `18`, imitating the relationship
    /// between Ether and Wei. This is the default value returned by this
    /// function ([`DEFAULT_DECIMALS`]), unless it's overridden.
    ///
    /// NOTE: This information is only used for *display* purposes: in
    /// no way it affects any of the arithmetic of the contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn decimals(&self) -> U8;
}

#[public]
#[implements(IErc20Metadata)]
impl Erc20Metadata {}

impl Erc20Metadata {
    /// Stores the token `name` and `symbol`.
    ///
    /// The name should match the name of the token's EIP-712 signing domain,
    /// since wallets display one and sign with the other.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `name` - Token name.
    /// * `symbol` - Token symbol.
    pub fn constructor(&mut self, name: String, symbol: String) {
        self.metadata.constructor(name, symbol);
    }
}

#[public]
impl IErc20Metadata for Erc20Metadata {
    fn name(&self) -> String {
        self.metadata.name()
    }

    fn symbol(&self) -> String {
        self.metadata.symbol()
    }

    fn decimals(&self) -> U8 {
        DEFAULT_DECIMALS
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address};
    use motsu::prelude::*;
    use stylus_sdk::prelude::*;

    use super::*;

    unsafe impl TopLevelStorage for Erc20Metadata {}

    #[motsu::test]
    fn constructs(contract: Contract<Erc20Metadata>, alice: Address) {
        contract
            .sender(alice)
            .constructor("template".to_string(), "TEMP".to_string());

        assert_eq!("template", contract.sender(alice).name());
        assert_eq!("TEMP", contract.sender(alice).symbol());
        assert_eq!(uint!(18_U8), contract.sender(alice).decimals());
    }

    #[motsu::test]
    fn empty_before_construction(
        contract: Contract<Erc20Metadata>,
        alice: Address,
    ) {
        assert_eq!("", contract.sender(alice).name());
        assert_eq!("", contract.sender(alice).symbol());
    }
}
