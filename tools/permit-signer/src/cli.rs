//! Definitions of CLI arguments and commands for the permit signer

use alloy_primitives::{hex, Address, B256, U256};
use clap::{Args, Parser, Subcommand};
use eyre::Result;
use permit_crypto::Signature;

use crate::{
    commands::{digest, domain, sign, verify},
    types::Output,
};

/// Environment variable the signing key is read from when `--private-key`
/// is not given.
pub const PRIVATE_KEY_ENV: &str = "PERMIT_SIGNER_PRIVATE_KEY";

/// Command line of the `permit-signer` binary.
#[derive(Parser)]
#[command(name = "permit-signer", version, about)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// A `permit-signer` subcommand.
#[derive(Subcommand)]
pub enum Command {
    /// Print the EIP-712 domain and its separator
    Domain(DomainArgs),
    /// Print the struct hash and the digest of a permit
    Digest(DigestArgs),
    /// Sign a permit with a local key
    Sign(SignArgs),
    /// Check a permit signature the way the token does
    Verify(VerifyArgs),
}

impl Command {
    /// Runs the command and returns its JSON-serializable result.
    ///
    /// # Errors
    ///
    /// If the key is invalid, or the owner of the permit is missing or
    /// does not match the key. A signature that does not verify is reported
    /// in the output, not as an error.
    pub fn run(self) -> Result<Output> {
        match self {
            Command::Domain(args) => Ok(Output::Domain(domain(&args))),
            Command::Digest(args) => digest(&args).map(Output::Digest),
            Command::Sign(args) => sign(&args).map(Output::Sign),
            Command::Verify(args) => verify(&args).map(Output::Verify),
        }
    }
}

/// Signing domain of the token.
#[derive(Args, Clone)]
pub struct DomainArgs {
    /// Name of the token's signing domain
    #[arg(long, default_value = "template")]
    pub name: String,

    /// Version of the token's signing domain
    #[arg(long, default_value = "v1.0.0")]
    pub version: String,

    /// Chain the token is deployed on
    #[arg(long, env = "PERMIT_SIGNER_CHAIN_ID")]
    pub chain_id: U256,

    /// Address of the token contract
    #[arg(long, env = "PERMIT_SIGNER_TOKEN")]
    pub verifying_contract: Address,
}

/// Fields of the signed permit message.
#[derive(Args, Clone)]
pub struct PermitArgs {
    /// Account owning the tokens. Defaults to the signer when signing
    #[arg(long)]
    pub owner: Option<Address>,

    /// Account allowed to spend the tokens
    #[arg(long)]
    pub spender: Address,

    /// Allowance to grant, `max` for an unlimited one
    #[arg(long, value_parser = parse_u256)]
    pub value: U256,

    /// Current nonce of the owner on the token
    #[arg(long, default_value = "0", value_parser = parse_u256)]
    pub nonce: U256,

    /// Unix timestamp after which the permit expires, `max` for none
    #[arg(long, default_value = "max", value_parser = parse_u256)]
    pub deadline: U256,
}

/// Arguments of [`Command::Digest`].
#[derive(Args)]
pub struct DigestArgs {
    /// Signing domain of the token.
    #[command(flatten)]
    pub domain: DomainArgs,

    /// The permit.
    #[command(flatten)]
    pub permit: PermitArgs,
}

/// Arguments of [`Command::Sign`].
#[derive(Args)]
pub struct SignArgs {
    /// Signing domain of the token.
    #[command(flatten)]
    pub domain: DomainArgs,

    /// The permit.
    #[command(flatten)]
    pub permit: PermitArgs,

    /// Secret key of the owner, as 32 hex bytes
    #[arg(long, env = PRIVATE_KEY_ENV, hide_env_values = true)]
    pub private_key: B256,
}

/// Arguments of [`Command::Verify`].
#[derive(Args)]
pub struct VerifyArgs {
    /// Signing domain of the token.
    #[command(flatten)]
    pub domain: DomainArgs,

    /// The permit.
    #[command(flatten)]
    pub permit: PermitArgs,

    /// The 65-byte `r ‖ s ‖ v` signature in hex
    #[arg(long, value_parser = parse_signature)]
    pub signature: Signature,

    /// Timestamp to check the deadline against. Defaults to the system clock
    #[arg(long, value_parser = parse_u256)]
    pub now: Option<U256>,

    /// Nonce the token currently stores for the owner
    #[arg(long, value_parser = parse_u256)]
    pub current_nonce: Option<U256>,
}

/// Parses a decimal or `0x`-prefixed hex integer, or `max` for
/// [`U256::MAX`].
fn parse_u256(value: &str) -> Result<U256, String> {
    if value.eq_ignore_ascii_case("max") {
        return Ok(U256::MAX);
    }
    value.parse().map_err(|e| format!("invalid integer `{value}`: {e}"))
}

fn parse_signature(value: &str) -> Result<Signature, String> {
    let bytes = hex::decode(value).map_err(|e| format!("invalid hex: {e}"))?;
    Signature::from_slice(&bytes).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_unlimited_values() {
        assert_eq!(Ok(U256::MAX), parse_u256("max"));
        assert_eq!(Ok(U256::MAX), parse_u256("MAX"));
        assert_eq!(Ok(U256::from(42161)), parse_u256("42161"));
        assert_eq!(Ok(U256::from(255)), parse_u256("0xff"));
        assert!(parse_u256("forever").is_err());
    }

    #[test]
    fn rejects_short_signature() {
        let err = parse_signature("0x1234").expect_err("should need 65 bytes");
        assert!(err.contains("length: 2"), "{err}");
    }

    #[test]
    fn parses_sign_command() {
        let cli = Cli::try_parse_from([
            "permit-signer",
            "sign",
            "--chain-id",
            "42161",
            "--verifying-contract",
            "0xdCE82b5f92C98F27F116F70491a487EFFDb6a2a9",
            "--spender",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "--value",
            "max",
            "--private-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ])
        .expect("should parse");

        let Command::Sign(args) = cli.command else {
            panic!("should parse the sign command");
        };
        assert_eq!("template", args.domain.name);
        assert_eq!("v1.0.0", args.domain.version);
        assert_eq!(U256::MAX, args.permit.value);
        assert_eq!(U256::ZERO, args.permit.nonce);
        assert_eq!(U256::MAX, args.permit.deadline);
        assert_eq!(None, args.permit.owner);
    }
}
