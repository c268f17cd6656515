//! Off-chain Elliptic Curve Digital Signature Algorithm (ECDSA) operations
//! over secp256k1.
//!
//! These functions sign an already computed digest and recover the address
//! that signed one. They follow the rules of the `ecRecover` based recovery
//! done on-chain, so a signature accepted here is accepted by a token.
//!
//! WARNING: Secret keys passed to [`sign_hash`] are meant for tests and local
//! tooling. No production key management is implied.

use alloy_primitives::{keccak256, Address, B256};
use k256::ecdsa::{
    RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey,
};

use crate::signature::{self, Signature, V_OFFSET};

pub use crate::signature::Error;

/// Signs `hash` with `secret_key`.
///
/// The digest is signed as is: it must already be the final message, e.g. a
/// typed data hash. The returned signature has a low `s` value and `v` of
/// `27` or `28`.
///
/// # Arguments
///
/// * `secret_key` - The 32-byte secret scalar.
/// * `hash` - Digest to sign.
///
/// # Errors
///
/// * [`Error::InvalidSignature`] - If `secret_key` is not a valid non-zero
///   scalar, or signing fails.
pub fn sign_hash(secret_key: &B256, hash: B256) -> signature::Result<Signature> {
    let key = signing_key(secret_key)?;

    let (ecdsa, recovery_id) = key
        .sign_prehash_recoverable(hash.as_slice())
        .map_err(|_| Error::InvalidSignature)?;

    // Flipping `s` to the lower half order flips the parity of the point.
    let (ecdsa, recovery_id) = match ecdsa.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (ecdsa, recovery_id),
    };

    let (r, s) = ecdsa.split_bytes();
    Signature::new(
        recovery_id.to_byte() + V_OFFSET,
        B256::from_slice(&r),
        B256::from_slice(&s),
    )
}

/// Returns the address that signed a hashed message (`hash`).
///
/// # Arguments
///
/// * `hash` - Hash of the message.
/// * `signature` - Signature over `hash`.
///
/// # Errors
///
/// * [`Error::InvalidS`] - If the `s` value is greater than
///   [`signature::SIGNATURE_S_UPPER_BOUND`].
/// * [`Error::InvalidSignature`] - If `r` or `s` are not valid scalars, or
///   no public key can be recovered.
pub fn recover(hash: B256, signature: &Signature) -> signature::Result<Address> {
    signature.check_malleability()?;

    let mut scalars = [0u8; 64];
    scalars[..32].copy_from_slice(signature.r().as_slice());
    scalars[32..].copy_from_slice(signature.s().as_slice());
    let ecdsa = EcdsaSignature::from_slice(&scalars)
        .map_err(|_| Error::InvalidSignature)?;

    let recovery_id = RecoveryId::from_byte(signature.recovery_id())
        .ok_or(Error::InvalidSignature)?;

    let key =
        VerifyingKey::recover_from_prehash(hash.as_slice(), &ecdsa, recovery_id)
            .map_err(|_| Error::InvalidSignature)?;

    Ok(public_key_to_address(&key))
}

/// Same as [`recover`], taking the signature components separately.
///
/// # Errors
///
/// * [`Error::InvalidV`] - If `v` is none of `0`, `1`, `27` or `28`.
/// * [`Error::InvalidS`] - If the `s` value is in the upper half order.
/// * [`Error::InvalidSignature`] - If no public key can be recovered.
pub fn recover_vrs(
    hash: B256,
    v: u8,
    r: B256,
    s: B256,
) -> signature::Result<Address> {
    recover(hash, &Signature::new(v, r, s)?)
}

/// Returns the address controlled by `secret_key`.
///
/// # Errors
///
/// * [`Error::InvalidSignature`] - If `secret_key` is not a valid non-zero
///   scalar.
pub fn address_of(secret_key: &B256) -> signature::Result<Address> {
    let key = signing_key(secret_key)?;
    Ok(public_key_to_address(key.verifying_key()))
}

fn signing_key(secret_key: &B256) -> signature::Result<SigningKey> {
    SigningKey::from_slice(secret_key.as_slice())
        .map_err(|_| Error::InvalidSignature)
}

/// The address is the last 20 bytes of the keccak256 hash of the
/// uncompressed public key, without its `0x04` tag.
fn public_key_to_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
