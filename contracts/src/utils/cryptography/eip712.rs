//! [EIP-712](https://eips.ethereum.org/EIPS/eip-712) is a standard for hashing
//! and signing typed structured data.
//!
//! The domain separator is recomputed on every call from the current chain id
//! and contract address, so signatures stay bound to this deployment even after
//! an eventual fork of the chain.
//!
//! NOTE: This contract implements the version of the encoding known as "v4", as
//! implemented by the JSON RPC method [`eth_signTypedDataV4`] in `MetaMask`.
//!
//! [`eth_signTypedDataV4`]: https://docs.metamask.io/guide/signing-data.html

use alloy_primitives::{Address, B256, U256};
pub use permit_crypto::eip712::{Eip712DomainFields, FIELDS, SALT, TYPE_HASH};
use permit_crypto::{
    eip712::{hash_domain, Eip712Domain},
    message_hash_utils::to_typed_data_hash,
};
use stylus_sdk::{block, contract};

/// EIP-712 signing domain of a contract.
///
/// Implementors only name the domain. Chain id and verifying contract are
/// read from the execution environment.
pub trait IEip712 {
    /// Immutable name of EIP-712 instance.
    const NAME: &'static str;
    /// Hashed name of EIP-712 instance.
    const HASHED_NAME: [u8; 32] =
        keccak_const::Keccak256::new().update(Self::NAME.as_bytes()).finalize();

    /// Immutable version of EIP-712 instance.
    const VERSION: &'static str;
    /// Hashed version of EIP-712 instance.
    const HASHED_VERSION: [u8; 32] = keccak_const::Keccak256::new()
        .update(Self::VERSION.as_bytes())
        .finalize();

    /// Returns chain id.
    fn chain_id() -> U256 {
        U256::from(block::chainid())
    }

    /// Returns the contract's address.
    fn contract_address() -> Address {
        contract::address()
    }

    /// Returns the signing domain of this contract.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            Self::NAME,
            Self::VERSION,
            Self::chain_id(),
            Self::contract_address(),
        )
    }

    /// Returns the fields and values that describe the domain separator used by
    /// this contract for EIP-712 signature, as specified by [ERC-5267].
    ///
    /// [ERC-5267]: https://eips.ethereum.org/EIPS/eip-5267
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn eip712_domain(&self) -> Eip712DomainFields {
        self.domain().fields()
    }

    /// Returns the domain separator for the current chain.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    fn domain_separator_v4(&self) -> B256 {
        hash_domain(
            Self::HASHED_NAME.into(),
            Self::HASHED_VERSION.into(),
            Self::chain_id(),
            Self::contract_address(),
        )
    }

    /// Given an already [hashed struct], this function returns the hash of the
    /// fully encoded EIP-712 message for this domain.
    ///
    /// [hashed struct]: https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the contract's state.
    /// * `struct_hash` - The `hashStruct` of the signed message.
    fn hash_typed_data_v4(&self, struct_hash: B256) -> B256 {
        to_typed_data_hash(&self.domain_separator_v4(), &struct_hash)
    }
}
