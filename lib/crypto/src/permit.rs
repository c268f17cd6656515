//! The [EIP-2612] `Permit` struct and its signable digest.
//!
//! [EIP-2612]: https://eips.ethereum.org/EIPS/eip-2612

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;
use hex_literal::hex;

use crate::{eip712::Eip712Domain, message_hash_utils::to_typed_data_hash};

/// keccak256("Permit(address owner,address spender,uint256 value,uint256
/// nonce,uint256 deadline)")
pub const PERMIT_TYPEHASH: [u8; 32] =
    hex!("6e71edae12b1b97f4d1f60370fef10105fa2faae0126114a169c64845d6126c9");

/// Allowance value conventionally read as "unlimited" by tokens: it is never
/// decreased by `transferFrom`.
pub const UNLIMITED_ALLOWANCE: U256 = U256::MAX;

/// Deadline that never expires.
pub const NO_EXPIRY: U256 = U256::MAX;

/// An owner's authorization for `spender` to spend `value` of its tokens.
///
/// Built fresh for each authorization attempt and never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Permit {
    /// Account that owns the tokens and signs the permit.
    pub owner: Address,
    /// Account that will spend the tokens.
    pub spender: Address,
    /// New allowance of `spender` over `owner`'s tokens.
    pub value: U256,
    /// Current nonce of `owner` in the verifying token.
    pub nonce: U256,
    /// Unix timestamp after which the permit is no longer valid.
    pub deadline: U256,
}

impl Permit {
    /// Returns the [hashed struct] of this permit:
    /// `keccak256(abi.encode(PERMIT_TYPEHASH, owner, spender, value, nonce,
    /// deadline))`.
    ///
    /// [hashed struct]: https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    #[must_use]
    pub fn struct_hash(&self) -> B256 {
        permit_struct_hash(
            self.owner,
            self.spender,
            self.value,
            self.nonce,
            self.deadline,
        )
    }

    /// Returns the digest an owner signs to authorize this permit in
    /// `domain`.
    #[must_use]
    pub fn digest(&self, domain: &Eip712Domain) -> B256 {
        permit_digest(domain.separator(), self)
    }

    /// Whether the permit is expired at `timestamp`.
    ///
    /// A permit is still valid in the block whose timestamp equals its
    /// deadline.
    #[must_use]
    pub fn is_expired(&self, timestamp: U256) -> bool {
        timestamp > self.deadline
    }
}

/// Returns the [hashed struct] of a permit given its fields.
///
/// Tokens use it directly to avoid building a [`Permit`] from storage.
///
/// [hashed struct]: https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
#[must_use]
pub fn permit_struct_hash(
    owner: Address,
    spender: Address,
    value: U256,
    nonce: U256,
    deadline: U256,
) -> B256 {
    let encoded =
        (B256::from(PERMIT_TYPEHASH), owner, spender, value, nonce, deadline)
            .abi_encode();
    keccak256(encoded)
}

/// Returns the final signable digest
/// `keccak256(0x19 ‖ 0x01 ‖ domain_separator ‖ permit.struct_hash())`.
#[must_use]
pub fn permit_digest(domain_separator: B256, permit: &Permit) -> B256 {
    to_typed_data_hash(&domain_separator, &permit.struct_hash())
}
