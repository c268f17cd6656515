//! Math helpers for storage values.
pub(crate) mod storage;
