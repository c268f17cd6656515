/*!
Typed-data hashing and signature procedures for [EIP-2612] permits.

> Note that `permit-crypto` is still `0.*.*`, so breaking changes
> [may occur at any time](https://semver.org/#spec-item-4). If you must depend
> on it, we recommend pinning to a specific version, i.e., `=0.y.z`.

## Building a permit digest

[`eip712`](./src/eip712.rs) derives the domain separator that binds a
signature to one contract on one chain. [`permit`](./src/permit.rs) hashes the
`Permit` struct and combines it with the separator into the 32-byte digest
an owner signs:

```rust
use alloy_primitives::{address, U256};
use permit_crypto::{eip712::Eip712Domain, permit::Permit};

let domain = Eip712Domain::new(
    "template",
    "v1.0.0",
    U256::from(42161),
    address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9"),
);
let permit = Permit {
    owner: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
    spender: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
    value: U256::MAX,
    nonce: U256::ZERO,
    deadline: U256::MAX,
};
let digest = permit.digest(&domain);
assert_ne!(digest, permit.struct_hash());
```

With the `ecdsa` feature (on by default), [`ecdsa`](./src/ecdsa.rs) signs
digests and recovers signers off-chain, and [`verify`](./src/verify.rs)
mirrors the checks a token performs before honouring a permit.

The crate is `no_std` unless the `std` feature is enabled, so the same
builders run inside Stylus contracts.

[EIP-2612]: https://eips.ethereum.org/EIPS/eip-2612
*/

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]
extern crate alloc;

pub mod eip712;
pub mod message_hash_utils;
pub mod permit;
pub mod signature;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;
#[cfg(feature = "ecdsa")]
pub mod verify;

pub use eip712::Eip712Domain;
pub use permit::Permit;
pub use signature::Signature;
