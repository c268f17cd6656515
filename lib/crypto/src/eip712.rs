//! [EIP-712](https://eips.ethereum.org/EIPS/eip-712) is a standard for hashing
//! and signing typed structured data.
//!
//! This module implements the domain part of the encoding: the separator
//! that binds a signature to a name, a version, a chain and a verifying
//! contract, which protects against replay on another chain (or on an
//! eventual fork of the same chain) and against another contract.
//!
//! NOTE: This implements the version of the encoding known as "v4", as
//! implemented by the JSON RPC method [`eth_signTypedDataV4`] in `MetaMask`.
//!
//! [`eth_signTypedDataV4`]: https://docs.metamask.io/guide/signing-data.html

use alloc::{string::String, vec::Vec};

use alloy_primitives::{keccak256, Address, FixedBytes, B256, U256};
use alloy_sol_types::SolValue;
use hex_literal::hex;

use crate::message_hash_utils::to_typed_data_hash;

/// keccak256("EIP712Domain(string name,string version,uint256 chainId,address
/// verifyingContract)")
pub const TYPE_HASH: [u8; 32] =
    hex!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f");

/// Field bitmap of an [ERC-5267] domain: name, version, chain id and
/// verifying contract are set. `hex"0f"`
///
/// [ERC-5267]: https://eips.ethereum.org/EIPS/eip-5267
pub const FIELDS: [u8; 1] = hex!("0f");

/// Salt of the domain, unused. `bytes32(0)`
pub const SALT: [u8; 32] = [0u8; 32];

/// Fields and values describing a domain, as returned by `eip712Domain()`.
pub type Eip712DomainFields =
    (FixedBytes<1>, String, String, U256, Address, B256, Vec<U256>);

/// An EIP-712 signing domain.
///
/// Fixed for a deployed contract instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip712Domain {
    /// User readable name of the signing domain, e.g. the token name.
    pub name: String,
    /// Current major version of the signing domain.
    pub version: String,
    /// Chain id the signature is valid on.
    pub chain_id: U256,
    /// Address of the contract that verifies the signature.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Creates a new domain.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the signing domain.
    /// * `version` - Version of the signing domain.
    /// * `chain_id` - Chain id the signature is valid on.
    /// * `verifying_contract` - Address of the verifying contract.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: U256,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    /// Returns the domain separator of this domain.
    ///
    /// See [`domain_separator`].
    #[must_use]
    pub fn separator(&self) -> B256 {
        domain_separator(self)
    }

    /// Given an already [hashed struct], returns the hash of the fully
    /// encoded EIP-712 message for this domain.
    ///
    /// [hashed struct]: https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    ///
    /// # Arguments
    ///
    /// * `&self` - The signing domain.
    /// * `struct_hash` - The `hashStruct` of the signed message.
    #[must_use]
    pub fn hash_typed_data(&self, struct_hash: B256) -> B256 {
        to_typed_data_hash(&self.separator(), &struct_hash)
    }

    /// Returns the fields and values that describe this domain, in the layout
    /// of [ERC-5267]'s `eip712Domain()`.
    ///
    /// [ERC-5267]: https://eips.ethereum.org/EIPS/eip-5267
    #[must_use]
    pub fn fields(&self) -> Eip712DomainFields {
        (
            FixedBytes(FIELDS),
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.verifying_contract,
            B256::from(SALT),
            Vec::new(),
        )
    }
}

/// Returns the domain separator for `domain`.
///
/// The separator is the keccak256 hash of the ABI encoded tuple
/// `(TYPE_HASH, keccak256(name), keccak256(version), chainId,
/// verifyingContract)`.
#[must_use]
pub fn domain_separator(domain: &Eip712Domain) -> B256 {
    hash_domain(
        keccak256(domain.name.as_bytes()),
        keccak256(domain.version.as_bytes()),
        domain.chain_id,
        domain.verifying_contract,
    )
}

/// Same as [`domain_separator`], for callers that already hold the hashed
/// name and version (e.g. computed at compile time).
///
/// # Arguments
///
/// * `hashed_name` - keccak256 of the domain name.
/// * `hashed_version` - keccak256 of the domain version.
/// * `chain_id` - Chain id the signature is valid on.
/// * `verifying_contract` - Address of the verifying contract.
#[must_use]
pub fn hash_domain(
    hashed_name: B256,
    hashed_version: B256,
    chain_id: U256,
    verifying_contract: Address,
) -> B256 {
    let encoded = (
        B256::from(TYPE_HASH),
        hashed_name,
        hashed_version,
        chain_id,
        verifying_contract,
    )
        .abi_encode();

    keccak256(encoded)
}
