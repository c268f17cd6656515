//! Signature conversion from and to the 65-byte compact form.

use alloy_primitives::B256;

use super::{
    error::{Error, Result},
    Signature,
};

/// Length of a signature in compact form.
pub const SIGNATURE_LENGTH: usize = 65;

impl Signature {
    /// Parse a signature from its compact form `r ‖ s ‖ v`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidV`] - If the last byte is none of `0`, `1`, `27` or
    ///   `28`.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Result<Self> {
        let r = B256::from_slice(&bytes[..32]);
        let s = B256::from_slice(&bytes[32..64]);
        Signature::new(bytes[64], r, s)
    }

    /// Parse a signature from a byte slice in compact form.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidLength`] - If `slice` is not 65 bytes long.
    /// * [`Error::InvalidV`] - If the last byte is none of `0`, `1`, `27` or
    ///   `28`.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        <&[u8; SIGNATURE_LENGTH]>::try_from(slice)
            .map_err(|_| Error::InvalidLength(slice.len()))
            .and_then(Self::from_bytes)
    }

    /// Serialize this signature in compact form `r ‖ s ‖ v`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(self.r().as_slice());
        bytes[32..64].copy_from_slice(self.s().as_slice());
        bytes[64] = self.v();
        bytes
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(slice: &[u8]) -> Result<Self> {
        Signature::from_slice(slice)
    }
}

impl From<Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: Signature) -> Self {
        signature.to_bytes()
    }
}
