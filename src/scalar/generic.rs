use crate::dtype::MinMaxDType;
use crate::utils::read_at;

/// The ScalarMinMax trait contains the (pairwise) scalar minmax operations.
///
/// This is the reference implementation, it is also used for short arrays and for
/// the elements that remain after the SIMD loop.
///
pub trait ScalarMinMax<ScalarDType: MinMaxDType> {
    /// Get the minimum and maximum value of a non-empty slice.
    fn minmax(data: &[ScalarDType]) -> (ScalarDType, ScalarDType);

    /// Get the minimum and maximum value of `len` (>= 1) elements that are `stride`
    /// bytes apart, starting at `data`.
    ///
    /// # Safety
    /// All `len` elements must be readable.
    unsafe fn minmax_strided(
        data: *const u8,
        len: usize,
        stride: usize,
    ) -> (ScalarDType, ScalarDType);
}

/// SCALAR struct that implements the ScalarMinMax trait for all data types.
pub struct SCALAR;

// Both loops are seeded with the *last* element. This makes the bound of the
// pairwise loop `len - 1` correct for both odd and even lengths:
// - odd: the pairs cover [0, len - 1), the last element is the seed
// - even: the last pair covers the seed again (which is harmless)
// Per pair 3 comparisons are needed (instead of 4 for the naive loop).

impl<ScalarDType: MinMaxDType> ScalarMinMax<ScalarDType> for SCALAR {
    #[inline(always)]
    fn minmax(arr: &[ScalarDType]) -> (ScalarDType, ScalarDType) {
        assert!(!arr.is_empty());
        let last = arr.len() - 1;
        // It is remarkably faster to iterate over the index and use get_unchecked
        // than using .chunks(2) (with a fold).
        let mut low: ScalarDType = unsafe { *arr.get_unchecked(last) };
        let mut high: ScalarDType = low;
        let mut i = 0;
        while i < last {
            let a: ScalarDType = unsafe { *arr.get_unchecked(i) };
            let b: ScalarDType = unsafe { *arr.get_unchecked(i + 1) };
            let (smaller, larger) = if a < b { (a, b) } else { (b, a) };
            if smaller < low {
                low = smaller;
            }
            if larger > high {
                high = larger;
            }
            i += 2;
        }
        (low, high)
    }

    #[inline(always)]
    unsafe fn minmax_strided(
        data: *const u8,
        len: usize,
        stride: usize,
    ) -> (ScalarDType, ScalarDType) {
        assert!(len > 0);
        let last = len - 1;
        let mut low: ScalarDType = read_at(data, last * stride);
        let mut high: ScalarDType = low;
        let mut i = 0;
        while i < last {
            let a: ScalarDType = read_at(data, i * stride);
            let b: ScalarDType = read_at(data, (i + 1) * stride);
            let (smaller, larger) = if a < b { (a, b) } else { (b, a) };
            if smaller < low {
                low = smaller;
            }
            if larger > high {
                high = larger;
            }
            i += 2;
        }
        (low, high)
    }
}
