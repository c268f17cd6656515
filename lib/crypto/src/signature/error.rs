//! Signature error type.

use core::fmt::{self, Display};

/// Result type with the signature [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Signature errors.
///
/// Every variant is terminal: a rejected signature requires a freshly signed
/// authorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The compact form is not 65 bytes long.
    InvalidLength(usize),
    /// The `v` value is none of `0`, `1`, `27` or `28`.
    InvalidV(u8),
    /// The `s` value is in the upper half order.
    InvalidS,
    /// `r` or `s` is not a valid curve scalar, or recovery produced no key.
    InvalidSignature,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength(len) => {
                write!(f, "invalid signature length: {len}, expected 65")
            }
            Error::InvalidV(v) => write!(f, "invalid signature `v` value: {v}"),
            Error::InvalidS => {
                f.write_str("signature `s` value is in the upper half order")
            }
            Error::InvalidSignature => f.write_str("invalid signature"),
        }
    }
}

impl core::error::Error for Error {}
