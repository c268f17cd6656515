//! Smart Contracts with cryptography.
pub mod ecdsa;
pub mod eip712;
