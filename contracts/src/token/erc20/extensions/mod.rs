//! Common extensions to the ERC-20 standard.
pub mod metadata;
pub mod permit;

pub use metadata::{Erc20Metadata, IErc20Metadata};
pub use permit::{Erc20Permit, IErc20Permit};
