//! JSON results printed by the permit signer

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::Serialize;

/// Result of a command, printed without a tag.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Result of `domain`.
    Domain(DomainOutput),
    /// Result of `digest`.
    Digest(DigestOutput),
    /// Result of `sign`.
    Sign(SignOutput),
    /// Result of `verify`.
    Verify(VerifyOutput),
}

/// A signing domain and its separator.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainOutput {
    /// Name of the domain.
    pub name: String,
    /// Version of the domain.
    pub version: String,
    /// Chain the domain is bound to.
    pub chain_id: U256,
    /// Token contract the domain is bound to.
    pub verifying_contract: Address,
    /// Hash of the domain.
    pub domain_separator: B256,
}

/// The hashes a permit signature is made over.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestOutput {
    /// Hash of the signing domain.
    pub domain_separator: B256,
    /// Hash of the permit fields.
    pub struct_hash: B256,
    /// EIP-712 digest the owner signs.
    pub digest: B256,
}

/// A signed permit, with the arguments of the token's `permit` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutput {
    /// Account owning the tokens.
    pub owner: Address,
    /// Account allowed to spend the tokens.
    pub spender: Address,
    /// Granted allowance.
    pub value: U256,
    /// Nonce the permit was signed for.
    pub nonce: U256,
    /// Expiry of the permit.
    pub deadline: U256,
    /// Signed digest.
    pub digest: B256,
    /// Recovery byte, `27` or `28`.
    pub v: u8,
    /// `r` scalar of the signature.
    pub r: B256,
    /// `s` scalar of the signature, in the lower half order.
    pub s: B256,
    /// `r ‖ s ‖ v`
    pub signature: Bytes,
}

/// Outcome of a signature check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOutput {
    /// Whether the token would accept the permit.
    pub valid: bool,
    /// Digest the signature was checked against.
    pub digest: B256,
    /// Address recovered from the signature, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<Address>,
    /// Reason the permit is refused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
