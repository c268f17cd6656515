//! Arithmetic on `stylus_sdk::storage` integers, applied in place.
use alloy_primitives::Uint;
use alloy_sol_types::sol_data::{IntBitCount, SupportedInt};
use stylus_sdk::storage::StorageUint;

/// Adds value and assign the result to `self`, panicking on overflow.
pub(crate) trait AddAssignChecked<T> {
    /// Adds `rhs` and assign the result to `self`, panicking with `msg` on
    /// overflow.
    fn add_assign_checked(&mut self, rhs: T, msg: &str);
}

impl<const B: usize, const L: usize> AddAssignChecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn add_assign_checked(&mut self, rhs: Uint<B, L>, msg: &str) {
        let sum = self.get().checked_add(rhs).expect(msg);
        self.set(sum);
    }
}

/// Adds value and assign the result to `self`, the caller guarantees there is
/// no overflow.
pub(crate) trait AddAssignUnchecked<T> {
    /// Adds `rhs` and assign the result to `self`.
    fn add_assign_unchecked(&mut self, rhs: T);
}

impl<const B: usize, const L: usize> AddAssignUnchecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn add_assign_unchecked(&mut self, rhs: Uint<B, L>) {
        let sum = self.get().wrapping_add(rhs);
        self.set(sum);
    }
}

/// Subtracts value and assign the result to `self`, the caller guarantees
/// there is no underflow.
pub(crate) trait SubAssignUnchecked<T> {
    /// Subtracts `rhs` and assign the result to `self`.
    fn sub_assign_unchecked(&mut self, rhs: T);
}

impl<const B: usize, const L: usize> SubAssignUnchecked<Uint<B, L>>
    for StorageUint<B, L>
where
    IntBitCount<B>: SupportedInt,
{
    fn sub_assign_unchecked(&mut self, rhs: Uint<B, L>) {
        let difference = self.get().wrapping_sub(rhs);
        self.set(difference);
    }
}
