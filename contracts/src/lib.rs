/*!
# Permit Contracts for Stylus

An ERC-20 token library for
[Arbitrum Stylus](https://docs.arbitrum.io/stylus/stylus-gentle-introduction)
with [EIP-2612] `permit`: owners approve spenders by signing an [EIP-712]
typed-data digest off-chain instead of sending a transaction.

> This project is still in a very early and experimental phase. It has never
> been audited nor thoroughly reviewed for security vulnerabilities. Do not use
> in production.

## Usage

Compose [`token::erc20::extensions::Erc20Permit`] into your entrypoint and
describe the signing domain with an
[`utils::cryptography::eip712::IEip712`] implementation:

```ignore
use permit_stylus::{
    token::erc20::extensions::{Erc20Metadata, Erc20Permit},
    utils::cryptography::eip712::IEip712,
};
use stylus_sdk::prelude::*;

#[entrypoint]
#[storage]
struct MyToken {
    erc20_permit: Erc20Permit<Eip712>,
    metadata: Erc20Metadata,
}

#[storage]
struct Eip712;

impl IEip712 for Eip712 {
    const NAME: &'static str = "MyToken";
    const VERSION: &'static str = "1";
}
```

The digests are built with [`permit_crypto`], so signatures produced
off-chain by the same crate verify on-chain.

[EIP-712]: https://eips.ethereum.org/EIPS/eip-712
[EIP-2612]: https://eips.ethereum.org/EIPS/eip-2612
*/

#![allow(clippy::pub_underscore_fields, clippy::module_name_repetitions)]
#![cfg_attr(not(test), no_std, no_main)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod token;
pub mod utils;
