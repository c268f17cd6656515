//! Implementations of the permit signer commands

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, U256};
use eyre::{ensure, eyre, Result, WrapErr};
use permit_crypto::{
    ecdsa,
    verify::{check_nonce, verify_permit},
    Eip712Domain, Permit,
};
use tracing::{debug, info, warn};

use crate::{
    cli::{DigestArgs, DomainArgs, PermitArgs, SignArgs, VerifyArgs},
    types::{DigestOutput, DomainOutput, SignOutput, VerifyOutput},
};

fn eip712_domain(args: &DomainArgs) -> Eip712Domain {
    Eip712Domain::new(
        args.name.clone(),
        args.version.clone(),
        args.chain_id,
        args.verifying_contract,
    )
}

fn permit(args: &PermitArgs, owner: Address) -> Permit {
    Permit {
        owner,
        spender: args.spender,
        value: args.value,
        nonce: args.nonce,
        deadline: args.deadline,
    }
}

fn required_owner(args: &PermitArgs) -> Result<Address> {
    args.owner.ok_or_else(|| eyre!("`--owner` is required"))
}

/// Builds the signing domain and its separator.
pub fn domain(args: &DomainArgs) -> DomainOutput {
    let domain = eip712_domain(args);
    let domain_separator = domain.separator();
    info!(%domain_separator, chain_id = %domain.chain_id, "built domain");

    DomainOutput {
        name: domain.name,
        version: domain.version,
        chain_id: domain.chain_id,
        verifying_contract: domain.verifying_contract,
        domain_separator,
    }
}

/// Builds the struct hash and the digest an owner signs.
///
/// # Errors
///
/// If no owner is given.
pub fn digest(args: &DigestArgs) -> Result<DigestOutput> {
    let domain = eip712_domain(&args.domain);
    let permit = permit(&args.permit, required_owner(&args.permit)?);

    let digest = permit.digest(&domain);
    info!(%digest, owner = %permit.owner, nonce = %permit.nonce, "built digest");

    Ok(DigestOutput {
        domain_separator: domain.separator(),
        struct_hash: permit.struct_hash(),
        digest,
    })
}

/// Signs the permit with the given key. The owner defaults to the key's
/// address.
///
/// # Errors
///
/// If the key is not a valid secp256k1 scalar, or the given owner is not
/// the key's address.
pub fn sign(args: &SignArgs) -> Result<SignOutput> {
    let signer = ecdsa::address_of(&args.private_key)
        .wrap_err("invalid private key")?;
    let owner = args.permit.owner.unwrap_or(signer);
    ensure!(
        owner == signer,
        "private key signs for {signer}, not for owner {owner}"
    );

    let domain = eip712_domain(&args.domain);
    let permit = permit(&args.permit, owner);
    let digest = permit.digest(&domain);
    debug!(%digest, "signing permit digest");

    let signature = ecdsa::sign_hash(&args.private_key, digest)
        .wrap_err("failed to sign permit digest")?;
    let (v, r, s) = signature.split();
    info!(%owner, spender = %permit.spender, nonce = %permit.nonce, "signed permit");

    Ok(SignOutput {
        owner,
        spender: permit.spender,
        value: permit.value,
        nonce: permit.nonce,
        deadline: permit.deadline,
        digest,
        v,
        r,
        s,
        signature: signature.to_bytes().to_vec().into(),
    })
}

/// Checks the signature in the order the token does: deadline, then
/// signer, then the optional nonce.
///
/// # Errors
///
/// If no owner is given, or the system clock is before the Unix epoch.
pub fn verify(args: &VerifyArgs) -> Result<VerifyOutput> {
    let domain = eip712_domain(&args.domain);
    let permit = permit(&args.permit, required_owner(&args.permit)?);
    let now = match args.now {
        Some(now) => now,
        None => U256::from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .wrap_err("system clock is before the Unix epoch")?
                .as_secs(),
        ),
    };

    let digest = permit.digest(&domain);
    let signer = ecdsa::recover(digest, &args.signature).ok();
    let result = verify_permit(&domain, &permit, &args.signature, now).and_then(
        |()| match args.current_nonce {
            Some(current) => check_nonce(&permit, current),
            None => Ok(()),
        },
    );

    match &result {
        Ok(()) => info!(%digest, owner = %permit.owner, "permit verifies"),
        Err(e) => warn!(%digest, owner = %permit.owner, "permit refused: {e}"),
    }

    Ok(VerifyOutput {
        valid: result.is_ok(),
        digest,
        signer,
        error: result.err().map(|e| e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, Address, B256, U256};
    use permit_crypto::Signature;

    use super::*;

    const OWNER_KEY: B256 = b256!(
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
    );
    const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const SPENDER: Address =
        address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const TOKEN: Address = address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9");

    fn domain_args() -> DomainArgs {
        DomainArgs {
            name: "template".into(),
            version: "v1.0.0".into(),
            chain_id: U256::from(42161),
            verifying_contract: TOKEN,
        }
    }

    fn permit_args(owner: Option<Address>) -> PermitArgs {
        PermitArgs {
            owner,
            spender: SPENDER,
            value: U256::MAX,
            nonce: U256::ZERO,
            deadline: U256::MAX,
        }
    }

    fn signed(owner: Option<Address>) -> SignOutput {
        sign(&SignArgs {
            domain: domain_args(),
            permit: permit_args(owner),
            private_key: OWNER_KEY,
        })
        .expect("should sign")
    }

    fn verify_args(signature: &SignOutput) -> VerifyArgs {
        VerifyArgs {
            domain: domain_args(),
            permit: permit_args(Some(OWNER)),
            signature: Signature::from_slice(&signature.signature)
                .expect("should be 65 bytes"),
            now: Some(U256::ZERO),
            current_nonce: None,
        }
    }

    #[test]
    fn domain_matches_library_separator() {
        let output = domain(&domain_args());
        let expected =
            Eip712Domain::new("template", "v1.0.0", U256::from(42161), TOKEN);
        assert_eq!(expected.separator(), output.domain_separator);
    }

    #[test]
    fn digest_requires_owner() {
        let args =
            DigestArgs { domain: domain_args(), permit: permit_args(None) };
        assert!(digest(&args).is_err());
    }

    #[test]
    fn sign_defaults_owner_to_signer() {
        let output = signed(None);
        assert_eq!(OWNER, output.owner);

        let digest = digest(&DigestArgs {
            domain: domain_args(),
            permit: permit_args(Some(OWNER)),
        })
        .expect("should build digest");
        assert_eq!(digest.digest, output.digest);
        assert!(output.v == 27 || output.v == 28);
    }

    #[test]
    fn sign_rejects_foreign_owner() {
        let err = sign(&SignArgs {
            domain: domain_args(),
            permit: permit_args(Some(SPENDER)),
            private_key: OWNER_KEY,
        })
        .expect_err("should refuse another owner");
        assert!(err.to_string().contains("not for owner"), "{err}");
    }

    #[test]
    fn sign_rejects_zero_key() {
        let err = sign(&SignArgs {
            domain: domain_args(),
            permit: permit_args(None),
            private_key: B256::ZERO,
        })
        .expect_err("should refuse the zero scalar");
        assert!(err.to_string().contains("invalid private key"), "{err}");
    }

    #[test]
    fn verifies_signed_permit() {
        let signature = signed(None);
        let output = verify(&verify_args(&signature)).expect("should run");

        assert!(output.valid, "{:?}", output.error);
        assert_eq!(Some(OWNER), output.signer);
        assert_eq!(signature.digest, output.digest);
    }

    #[test]
    fn verify_reports_expired_permit() {
        let signature = sign(&SignArgs {
            domain: domain_args(),
            permit: PermitArgs { deadline: U256::from(10), ..permit_args(None) },
            private_key: OWNER_KEY,
        })
        .expect("should sign");

        let mut args = verify_args(&signature);
        args.permit.deadline = U256::from(10);
        args.now = Some(U256::from(11));
        let output = verify(&args).expect("should run");

        assert!(!output.valid);
        assert!(output.error.is_some());
    }

    #[test]
    fn verify_reports_other_chain() {
        let signature = signed(None);
        let mut args = verify_args(&signature);
        args.domain.chain_id = U256::from(1);
        let output = verify(&args).expect("should run");

        assert!(!output.valid);
        assert_ne!(Some(OWNER), output.signer);
    }

    #[test]
    fn verify_reports_stale_nonce() {
        let signature = signed(None);
        let mut args = verify_args(&signature);
        args.current_nonce = Some(U256::from(1));
        let output = verify(&args).expect("should run");

        assert!(!output.valid);
        assert_eq!(Some(OWNER), output.signer);
    }
}
