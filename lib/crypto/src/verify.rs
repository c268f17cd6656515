//! Off-chain verification of a signed [`Permit`].
//!
//! Performs the checks a token runs before setting an allowance, in the same
//! order, so a relayer can reject a permit before paying for the transaction.

use core::fmt;

use alloy_primitives::{Address, U256};

use crate::{
    ecdsa,
    eip712::Eip712Domain,
    permit::Permit,
    signature::{self, Signature},
};

/// Reasons a permit is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PermitError {
    /// The current time is past the permit's deadline.
    Expired {
        /// Deadline of the permit.
        deadline: U256,
    },
    /// The signature was made by someone other than the owner, or over
    /// different data.
    InvalidSigner {
        /// Recovered signer.
        signer: Address,
        /// Owner of the permit.
        owner: Address,
    },
    /// The permit carries a nonce other than the owner's current one.
    InvalidNonce {
        /// Nonce the owner is expected to sign.
        current: U256,
    },
    /// The signature is malformed.
    Signature(signature::Error),
}

impl fmt::Display for PermitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermitError::Expired { deadline } => {
                write!(f, "permit expired at deadline {deadline}")
            }
            PermitError::InvalidSigner { signer, owner } => {
                write!(f, "permit signed by {signer}, expected owner {owner}")
            }
            PermitError::InvalidNonce { current } => {
                write!(f, "permit nonce is stale, current nonce is {current}")
            }
            PermitError::Signature(e) => write!(f, "{e}"),
        }
    }
}

impl core::error::Error for PermitError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            PermitError::Signature(e) => Some(e),
            _ => None,
        }
    }
}

impl From<signature::Error> for PermitError {
    fn from(value: signature::Error) -> Self {
        PermitError::Signature(value)
    }
}

/// Checks that `signature` authorizes `permit` in `domain` at time `now`.
///
/// # Arguments
///
/// * `domain` - Signing domain of the token.
/// * `permit` - The permit, including the nonce it was signed with.
/// * `signature` - Owner's signature over the permit digest.
/// * `now` - Current block timestamp.
///
/// # Errors
///
/// * [`PermitError::Expired`] - If `now` is past `permit.deadline`.
/// * [`PermitError::Signature`] - If the signature is malformed.
/// * [`PermitError::InvalidSigner`] - If the recovered signer is not
///   `permit.owner`.
pub fn verify_permit(
    domain: &Eip712Domain,
    permit: &Permit,
    signature: &Signature,
    now: U256,
) -> Result<(), PermitError> {
    if permit.is_expired(now) {
        return Err(PermitError::Expired { deadline: permit.deadline });
    }

    let signer = ecdsa::recover(permit.digest(domain), signature)?;
    if signer != permit.owner {
        return Err(PermitError::InvalidSigner { signer, owner: permit.owner });
    }

    Ok(())
}

/// Checks that `permit` was built with the owner's current nonce.
///
/// A token binds the digest to the stored nonce, so a permit failing this
/// check would be refused with an invalid signer.
///
/// # Errors
///
/// * [`PermitError::InvalidNonce`] - If `permit.nonce` differs from
///   `current_nonce`.
pub fn check_nonce(
    permit: &Permit,
    current_nonce: U256,
) -> Result<(), PermitError> {
    if permit.nonce != current_nonce {
        return Err(PermitError::InvalidNonce { current: current_nonce });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, uint, Address, B256, U256};

    use super::*;
    use crate::{
        ecdsa::sign_hash,
        permit::{NO_EXPIRY, UNLIMITED_ALLOWANCE},
    };

    const SECRET_KEY: B256 = b256!(
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
    );
    const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const NOW: U256 = uint!(1_735_689_600_U256);

    fn domain() -> Eip712Domain {
        Eip712Domain::new(
            "template",
            "v1.0.0",
            uint!(42161_U256),
            address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9"),
        )
    }

    fn permit() -> Permit {
        Permit {
            owner: ALICE,
            spender: BOB,
            value: UNLIMITED_ALLOWANCE,
            nonce: U256::ZERO,
            deadline: NO_EXPIRY,
        }
    }

    fn sign(permit: &Permit, domain: &Eip712Domain) -> Signature {
        sign_hash(&SECRET_KEY, permit.digest(domain)).unwrap()
    }

    #[test]
    fn accepts_owner_signature() {
        let signature = sign(&permit(), &domain());
        assert_eq!(Ok(()), verify_permit(&domain(), &permit(), &signature, NOW));
    }

    #[test]
    fn accepts_at_deadline() {
        let permit = Permit { deadline: NOW, ..permit() };
        let signature = sign(&permit, &domain());
        assert_eq!(Ok(()), verify_permit(&domain(), &permit, &signature, NOW));
    }

    #[test]
    fn rejects_expired_before_checking_signer() {
        let permit = Permit { deadline: NOW - U256::ONE, ..permit() };
        let signature = sign(&permit, &domain());

        let err =
            verify_permit(&domain(), &permit, &signature, NOW).unwrap_err();
        assert_eq!(PermitError::Expired { deadline: NOW - U256::ONE }, err);
    }

    #[test]
    fn rejects_tampered_fields() {
        let signature = sign(&permit(), &domain());
        let tampered = [
            Permit { spender: ALICE, ..permit() },
            Permit { value: uint!(1_U256), ..permit() },
            Permit { nonce: U256::ONE, ..permit() },
            Permit { deadline: NOW, ..permit() },
        ];

        for permit in tampered {
            let err = verify_permit(&domain(), &permit, &signature, NOW)
                .unwrap_err();
            assert!(matches!(
                err,
                PermitError::InvalidSigner { owner: ALICE, .. }
            ));
        }
    }

    #[test]
    fn rejects_other_owner() {
        let permit = Permit { owner: BOB, ..permit() };
        let signature = sign(&permit, &domain());

        let err =
            verify_permit(&domain(), &permit, &signature, NOW).unwrap_err();
        assert_eq!(PermitError::InvalidSigner { signer: ALICE, owner: BOB }, err);
    }

    #[test]
    fn rejects_other_domain() {
        let signature = sign(&permit(), &domain());

        let mut other_chain = domain();
        other_chain.chain_id = uint!(1_U256);
        let mut other_contract = domain();
        other_contract.verifying_contract =
            address!("000000000000000000000000000000000000dEaD");
        let mut other_version = domain();
        other_version.version = "v2.0.0".into();

        for domain in [other_chain, other_contract, other_version] {
            let err = verify_permit(&domain, &permit(), &signature, NOW)
                .unwrap_err();
            assert!(matches!(err, PermitError::InvalidSigner { .. }));
        }
    }

    #[test]
    fn rejects_malformed_signature() {
        let (v, r, _) = sign(&permit(), &domain()).split();
        let high_s = B256::from(U256::MAX.to_be_bytes::<32>());
        let signature = Signature::new(v, r, high_s).unwrap();

        let err =
            verify_permit(&domain(), &permit(), &signature, NOW).unwrap_err();
        assert_eq!(PermitError::Signature(signature::Error::InvalidS), err);
    }

    #[test]
    fn check_nonce_rejects_replay() {
        assert_eq!(Ok(()), check_nonce(&permit(), U256::ZERO));
        assert_eq!(
            Err(PermitError::InvalidNonce { current: U256::ONE }),
            check_nonce(&permit(), U256::ONE)
        );
    }
}
