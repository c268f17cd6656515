//! Recoverable secp256k1 ECDSA signature, in the `(v, r, s)` form consumed
//! by the `ecRecover` precompile.

pub mod bytes;
pub mod error;

use core::fmt;

use alloy_primitives::{uint, B256, U256};

pub use self::error::{Error, Result};

/// Upper range for `s` value from the signature: `secp256k1n / 2`.
pub const SIGNATURE_S_UPPER_BOUND: U256 = uint!(
    0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256
);

/// Offset of the legacy Ethereum `v` value over the raw recovery id.
pub const V_OFFSET: u8 = 27;

/// ECDSA signature split into its recovery byte and scalars.
///
/// Serialized in compact form as 65 bytes `r ‖ s ‖ v`, each scalar
/// big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    v: u8,
    r: B256,
    s: B256,
}

impl Signature {
    /// Creates a signature from its components.
    ///
    /// `v` is normalized to `27` or `28`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidV`] - If `v` is none of `0`, `1`, `27` or `28`.
    pub fn new(v: u8, r: B256, s: B256) -> Result<Self> {
        let v = normalize_v(v)?;
        Ok(Signature { v, r, s })
    }

    /// The `v` value, always `27` or `28`.
    #[must_use]
    pub fn v(&self) -> u8 {
        self.v
    }

    /// The raw recovery id, `0` or `1`.
    #[must_use]
    pub fn recovery_id(&self) -> u8 {
        self.v - V_OFFSET
    }

    /// The `r` scalar.
    #[must_use]
    pub fn r(&self) -> B256 {
        self.r
    }

    /// The `s` scalar.
    #[must_use]
    pub fn s(&self) -> B256 {
        self.s
    }

    /// Split the signature into `(v, r, s)`, the argument order of a token's
    /// `permit`.
    #[must_use]
    pub fn split(&self) -> (u8, B256, B256) {
        (self.v, self.r, self.s)
    }

    /// Validates the `s` value of this signature.
    ///
    /// EIP-2 still allows signature malleability for `ecRecover`: for every
    /// valid `(v, r, s)` the pair `(v ^ 1, r, n - s)` recovers the same
    /// signer. Requiring the lower half order makes the signature unique.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidS`] - If `s` is greater than
    ///   [`SIGNATURE_S_UPPER_BOUND`].
    pub fn check_malleability(&self) -> Result<()> {
        if U256::from_be_bytes(self.s.0) > SIGNATURE_S_UPPER_BOUND {
            return Err(Error::InvalidS);
        }
        Ok(())
    }
}

/// Maps a `v` value to `27` or `28`.
///
/// Signers that return the raw recovery id (`0` or `1`) are accepted as well.
///
/// # Errors
///
/// * [`Error::InvalidV`] - If `v` is none of `0`, `1`, `27` or `28`.
pub fn normalize_v(v: u8) -> Result<u8> {
    match v {
        0 | 1 => Ok(v + V_OFFSET),
        27 | 28 => Ok(v),
        _ => Err(Error::InvalidV(v)),
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("v", &self.v)
            .field("r", &self.r)
            .field("s", &self.s)
            .finish()
    }
}

impl fmt::LowerHex for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{self:x}")
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;

    use super::*;

    const R: B256 = b256!(
        "65e72b1cf8e189569963750e10ccb88fe89389daeeb8b735277d59cd6885ee82"
    );
    const S: B256 = b256!(
        "3eb5a6982b540f185703492dab77b863a88ce01f27e21ade8b2879c10fc9e653"
    );

    #[test]
    fn normalizes_recovery_id() {
        assert_eq!(27, Signature::new(0, R, S).unwrap().v());
        assert_eq!(28, Signature::new(1, R, S).unwrap().v());
        assert_eq!(27, Signature::new(27, R, S).unwrap().v());
        assert_eq!(1, Signature::new(28, R, S).unwrap().recovery_id());
    }

    #[test]
    fn rejects_out_of_range_v() {
        for v in [2, 26, 29, 30, 255] {
            let err = Signature::new(v, R, S).unwrap_err();
            assert_eq!(Error::InvalidV(v), err);
        }
    }

    #[test]
    fn rejects_invalid_s() {
        let invalid_s = SIGNATURE_S_UPPER_BOUND + U256::ONE;
        let invalid_s = B256::from(invalid_s.to_be_bytes::<32>());
        let err = Signature::new(27, R, invalid_s)
            .unwrap()
            .check_malleability()
            .expect_err("should return InvalidS");

        assert_eq!(Error::InvalidS, err);
    }

    #[test]
    fn validates_s() {
        let valid_s = B256::from(SIGNATURE_S_UPPER_BOUND.to_be_bytes::<32>());
        let signature = Signature::new(28, R, valid_s).unwrap();
        assert!(signature.check_malleability().is_ok());
    }

    #[test]
    fn splits_in_permit_order() {
        let signature = Signature::new(28, R, S).unwrap();
        assert_eq!((28, R, S), signature.split());
    }

    #[test]
    fn displays_compact_hex() {
        let signature = Signature::new(28, R, S).unwrap();
        let displayed = signature.to_string();
        assert_eq!(2 + 130, displayed.len());
        assert!(displayed.starts_with("0x65e72b1c"));
        assert!(displayed.ends_with("1c"));
    }
}
