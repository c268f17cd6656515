//! Permit Contract.
//!
//! Extension of the ERC-20 standard allowing approvals to be made
//! via signatures, as defined in [EIP-2612].
//!
//! Adds the `permit` method, which can be used to change an account's
//! ERC-20 allowance (see [`crate::token::erc20::IErc20::allowance`]) by
//! presenting a message signed by the account. By not relying on
//! [`crate::token::erc20::IErc20::approve`], the token holder account doesn't
//! need to send a transaction, and thus is not required to hold Ether at all.
//!
//! [EIP-2612]: https://eips.ethereum.org/EIPS/eip-2612

use alloc::{vec, vec::Vec};

use alloy_primitives::{Address, B256, U256};
pub use permit_crypto::permit::PERMIT_TYPEHASH;
use permit_crypto::permit::Permit;
pub use sol::*;
use stylus_sdk::{block, call::MethodError, prelude::*, storage::StorageType};

use crate::{
    token::erc20::{self, Erc20},
    utils::{
        cryptography::{ecdsa, eip712::IEip712},
        nonces::{INonces, Nonces},
        precompiles::Precompiles,
    },
};

#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Indicates an error related to the fact that
        /// permit deadline has expired.
        ///
        /// * `deadline` - Deadline of the refused permit.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC2612ExpiredSignature(uint256 deadline);

        /// Indicates an error related to the issue about mismatched signature.
        ///
        /// * `signer` - Recovered address.
        /// * `owner` - Owner claimed by the permit.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC2612InvalidSigner(address signer, address owner);
    }
}

/// A Permit error.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// Indicates an error related to the fact that
    /// permit deadline has expired.
    ExpiredSignature(ERC2612ExpiredSignature),
    /// Indicates an error related to the issue about mismatched signature.
    InvalidSigner(ERC2612InvalidSigner),
    /// Indicates an error related to the current balance of `sender`. Used in
    /// transfers.
    InsufficientBalance(erc20::ERC20InsufficientBalance),
    /// Indicates a failure with the token `sender`. Used in transfers.
    InvalidSender(erc20::ERC20InvalidSender),
    /// Indicates a failure with the token `receiver`. Used in transfers.
    InvalidReceiver(erc20::ERC20InvalidReceiver),
    /// Indicates a failure with the `spender`’s `allowance`. Used in
    /// transfers.
    InsufficientAllowance(erc20::ERC20InsufficientAllowance),
    /// Indicates a failure with the `spender` to be approved. Used in
    /// approvals.
    InvalidSpender(erc20::ERC20InvalidSpender),
    /// Indicates a failure with the `approver` of a token to be approved. Used
    /// in approvals.
    InvalidApprover(erc20::ERC20InvalidApprover),
    /// The signature derives the [`Address::ZERO`], or its `v` value is not
    /// `27` or `28`.
    ECDSAInvalidSignature(ecdsa::ECDSAInvalidSignature),
    /// The signature has an `S` value that is in the upper half order.
    ECDSAInvalidSignatureS(ecdsa::ECDSAInvalidSignatureS),
}

#[cfg_attr(coverage_nightly, coverage(off))]
impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

impl From<erc20::Error> for Error {
    fn from(value: erc20::Error) -> Self {
        match value {
            erc20::Error::InsufficientBalance(e) => {
                Error::InsufficientBalance(e)
            }
            erc20::Error::InvalidSender(e) => Error::InvalidSender(e),
            erc20::Error::InvalidReceiver(e) => Error::InvalidReceiver(e),
            erc20::Error::InsufficientAllowance(e) => {
                Error::InsufficientAllowance(e)
            }
            erc20::Error::InvalidSpender(e) => Error::InvalidSpender(e),
            erc20::Error::InvalidApprover(e) => Error::InvalidApprover(e),
        }
    }
}

impl From<ecdsa::Error> for Error {
    fn from(value: ecdsa::Error) -> Self {
        match value {
            ecdsa::Error::InvalidSignature(e) => Error::ECDSAInvalidSignature(e),
            ecdsa::Error::InvalidSignatureS(e) => {
                Error::ECDSAInvalidSignatureS(e)
            }
        }
    }
}

/// State of an [`Erc20Permit`] contract.
#[storage]
pub struct Erc20Permit<T: IEip712 + StorageType> {
    /// [`Erc20`] contract holding balances and allowances.
    pub erc20: Erc20,
    /// [`Nonces`] contract ordering each owner's permits.
    pub nonces: Nonces,
    /// Signing domain of the token.
    pub eip712: T,
}

/// NOTE: Implementation of [`TopLevelStorage`] to be able use `&self` as the
/// context of the `ecRecover` call and not `&(impl TopLevelStorage +
/// Borrow<Self>)`.
unsafe impl<T: IEip712 + StorageType> TopLevelStorage for Erc20Permit<T> {}

/// Interface of an [`Erc20Permit`] contract.
pub trait IErc20Permit {
    /// The error type associated to this trait implementation.
    type Error: Into<alloc::vec::Vec<u8>>;

    /// Returns the current nonce of `owner`, the one the next permit signed
    /// by `owner` must carry.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `owner` - Account to get the nonce of.
    fn nonces(&self, owner: Address) -> U256;

    /// Returns the domain separator used in the encoding of the signature for
    /// [`Self::permit`], as defined by EIP-712.
    ///
    /// Exposed as `DOMAIN_SEPARATOR()` in the contract ABI.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn domain_separator(&self) -> B256;

    /// Sets `value` as the allowance of `spender` over `owner`'s tokens,
    /// given `owner`'s signed approval.
    ///
    /// WARNING: The same issues
    /// [`crate::token::erc20::IErc20::approve`] has related to transaction
    /// ordering also apply here.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the contract's state.
    /// * `owner` - Account that owns the tokens.
    /// * `spender` - Account that will spend the tokens.
    /// * `value` - The number of tokens being permitted to transfer by
    ///   `spender`.
    /// * `deadline` - Deadline for the permit action.
    /// * `v` - v value from the `owner`'s signature.
    /// * `r` - r value from the `owner`'s signature.
    /// * `s` - s value from the `owner`'s signature.
    ///
    /// # Errors
    ///
    /// * [`Error::ExpiredSignature`] - If the `deadline` param is from the
    ///   past.
    /// * [`Error::ECDSAInvalidSignatureS`] - If the `s` value is in the upper
    ///   half order.
    /// * [`Error::ECDSAInvalidSignature`] - If `v` is not `27` or `28`, or no
    ///   signer can be recovered.
    /// * [`Error::InvalidSigner`] - If signer is not an `owner`. A signature
    ///   over a nonce other than the current one recovers another address,
    ///   so a replayed permit also fails with this error.
    /// * [`Error::InvalidSpender`] - If the `spender` address is
    ///   [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`erc20::Approval`].
    ///
    /// # Requirements
    ///
    /// * `spender` cannot be the [`Address::ZERO`].
    /// * `deadline` must be a timestamp in the future.
    /// * `v`, `r` and `s` must be a valid secp256k1 signature from `owner`
    ///   over the EIP712-formatted function arguments.
    /// * the signature must use `owner`'s current nonce.
    #[allow(clippy::too_many_arguments)]
    fn permit(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<(), Self::Error>;
}

impl<T: IEip712 + StorageType> IErc20Permit for Erc20Permit<T> {
    type Error = Error;

    fn nonces(&self, owner: Address) -> U256 {
        self.nonces.nonces(owner)
    }

    fn domain_separator(&self) -> B256 {
        self.eip712.domain_separator_v4()
    }

    fn permit(
        &mut self,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        v: u8,
        r: B256,
        s: B256,
    ) -> Result<(), Self::Error> {
        if U256::from(block::timestamp()) > deadline {
            return Err(ERC2612ExpiredSignature { deadline }.into());
        }

        let permit = Permit {
            owner,
            spender,
            value,
            nonce: self.nonces.nonces(owner),
            deadline,
        };
        let hash = self.eip712.hash_typed_data_v4(permit.struct_hash());

        let signer = self.ec_recover(hash, v, r, s)?;
        if signer != owner {
            return Err(ERC2612InvalidSigner { signer, owner }.into());
        }

        self.erc20._approve(owner, spender, value, true)?;
        self.nonces.use_nonce(owner);

        Ok(())
    }
}
