//! Offline client for EIP-2612 permits: builds the signing domain and the
//! permit digest, signs it with a local key, and verifies signatures the way
//! a token does before honouring a permit.

pub mod cli;
pub mod commands;
pub mod types;
