//! `ArbOS` precompiles wrapper enabling easier invocation.

use alloy_primitives::{Address, B256};
use stylus_sdk::prelude::*;

use crate::utils::cryptography::ecdsa::{recover, Error};

/// Access to Arbitrum precompiles for Stylus contracts.
///
/// Implemented for every type that implements
/// [`stylus_sdk::prelude::TopLevelStorage`], which includes contracts
/// annotated with `#[entrypoint]`.
///
/// See: <https://docs.arbitrum.io/build-decentralized-apps/precompiles/overview>
pub trait Precompiles: TopLevelStorage {
    /// Recovers the address that signed a hashed message (`hash`) using an
    /// ECDSA signature (v, r, s).
    ///
    /// Wrapper around the `ecRecover` precompile.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `hash` - Hash of the message.
    /// * `v` - `v` value from the signature.
    /// * `r` - `r` value from the signature.
    /// * `s` - `s` value from the signature.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSignatureS`] - If the `s` value is greater than
    ///   [`crate::utils::cryptography::ecdsa::SIGNATURE_S_UPPER_BOUND`].
    /// * [`Error::InvalidSignature`] - If `v` is not `27` or `28`, or the
    ///   recovered address is [`Address::ZERO`].
    ///
    /// # Panics
    ///
    /// * If the `ecRecover` precompile fails to execute.
    fn ec_recover(
        &self,
        hash: B256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<Address, Error>;
}

impl<T: TopLevelStorage> Precompiles for T {
    fn ec_recover(
        &self,
        hash: B256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<Address, Error> {
        recover(self, hash, v, r, s)
    }
}
