//! Common Smart Contracts utilities.
pub mod cryptography;
pub mod math;
pub mod metadata;
pub mod nonces;
pub mod precompiles;

pub use metadata::Metadata;
