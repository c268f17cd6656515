//! Elliptic Curve Digital Signature Algorithm (ECDSA) operations.
//!
//! Recovers the signer of a hashed message through the `ecRecover`
//! precompile, rejecting the malleable and malformed signatures the
//! precompile would otherwise accept or choke on.
use alloc::vec::Vec;

use alloy_primitives::{address, Address, B256, U256};
use alloy_sol_types::SolType;
pub use permit_crypto::signature::SIGNATURE_S_UPPER_BOUND;
use stylus_sdk::{
    call::{self, MethodError, StaticCallContext},
    prelude::*,
};

/// Address of the `ecRecover` EVM precompile.
pub const ECRECOVER_ADDR: Address =
    address!("0000000000000000000000000000000000000001");

pub use sol::*;
#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// The signature derives the [`Address::ZERO`], or its `v` value is
        /// not `27` or `28`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ECDSAInvalidSignature();

        /// The signature has an `S` value that is in the upper half order.
        ///
        /// * `s` - Invalid `S` value.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ECDSAInvalidSignatureS(bytes32 s);
    }

    sol! {
        /// Input of the `ecRecover` precompile.
        #[allow(missing_docs)]
        struct EcRecoverData {
            /// Signed digest.
            bytes32 hash;
            /// `v` value from the signature.
            uint8 v;
            /// `r` value from the signature.
            bytes32 r;
            /// `s` value from the signature.
            bytes32 s;
        }
    }
}

/// An error that occurred while recovering a signer.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The signature derives the [`Address::ZERO`].
    InvalidSignature(ECDSAInvalidSignature),
    /// The signature has an `S` value that is in the upper half order.
    InvalidSignatureS(ECDSAInvalidSignatureS),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// Returns the address that signed a hashed message (`hash`).
///
/// # Arguments
///
/// * `context` - Execution context for making static calls.
/// * `hash` - Hash of the message.
/// * `v` - `v` value from the signature.
/// * `r` - `r` value from the signature.
/// * `s` - `s` value from the signature.
///
/// # Errors
///
/// * [`Error::InvalidSignatureS`] - If the `s` value is greater than
///   [`SIGNATURE_S_UPPER_BOUND`].
/// * [`Error::InvalidSignature`] - If `v` is not `27` or `28`, or the
///   recovered address is [`Address::ZERO`].
///
/// # Panics
///
/// * If the `ecRecover` precompile fails to execute.
pub fn recover(
    context: impl StaticCallContext,
    hash: B256,
    v: u8,
    r: B256,
    s: B256,
) -> Result<Address, Error> {
    check_if_malleable(&s)?;
    _recover(context, hash, v, r, s)
}

/// Calls the `ecRecover` EVM precompile with a non-malleable signature.
///
/// # Errors
///
/// * [`Error::InvalidSignature`] - If `v` is not `27` or `28`, or the
///   recovered address is [`Address::ZERO`].
///
/// # Panics
///
/// * If the `ecRecover` precompile fails to execute.
fn _recover(
    context: impl StaticCallContext,
    hash: B256,
    v: u8,
    r: B256,
    s: B256,
) -> Result<Address, Error> {
    // The precompile only understands the legacy `v`. Raw recovery ids are
    // refused rather than silently normalized.
    if v == 0 || v == 1 {
        return Err(ECDSAInvalidSignature {}.into());
    }

    let calldata = encode_calldata(hash, v, r, s);
    let recovered = call::static_call(context, ECRECOVER_ADDR, &calldata)
        .expect("should call `ecRecover` precompile");

    // An invalid signature makes the precompile return no data.
    if recovered.len() < 32 {
        return Err(ECDSAInvalidSignature {}.into());
    }

    let recovered = Address::from_slice(&recovered[12..32]);
    if recovered.is_zero() {
        return Err(ECDSAInvalidSignature {}.into());
    }
    Ok(recovered)
}

/// Encodes the `ecRecover` precompile input.
fn encode_calldata(hash: B256, v: u8, r: B256, s: B256) -> Vec<u8> {
    let calldata = EcRecoverData { hash, v, r, s };
    EcRecoverData::abi_encode(&calldata)
}

/// Validates the `s` value of a signature.
///
/// EIP-2 still allows signature malleability for `ecRecover`: `(v, r, s)` and
/// `(v ^ 1, r, n - s)` recover the same signer. Only `s` values in the lower
/// half order are accepted, as defined for transactions in Appendix F of the
/// [Ethereum Yellow paper].
///
/// # Errors
///
/// * [`Error::InvalidSignatureS`] - If the `s` value is greater than
///   [`SIGNATURE_S_UPPER_BOUND`].
///
/// [Ethereum Yellow paper]: https://ethereum.github.io/yellowpaper/paper.pdf
fn check_if_malleable(s: &B256) -> Result<(), Error> {
    let s_u256 = U256::from_be_slice(s.as_slice());
    if s_u256 > SIGNATURE_S_UPPER_BOUND {
        return Err(ECDSAInvalidSignatureS { s: *s }.into());
    }
    Ok(())
}
