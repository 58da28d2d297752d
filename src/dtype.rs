//! The element types that can be reduced.

use num_traits::Zero;

/// Data type that can be reduced to its minimum and maximum value.
///
/// An element type only has to supply its ordered comparison operator (through
/// [`PartialOrd`]) and a zero value, which is what an empty sequence reduces to.
/// This trait is blanket implemented for all such types; to make a type usable with
/// the dispatching functions it also has to implement
/// [`MinMaxDispatch`](crate::MinMaxDispatch) (an empty impl selects the scalar path).
///
/// NaN ordering is whatever `PartialOrd` (scalar path) and the ordered min / max
/// instruction (SIMD paths) make of it; no guarantee is given for inputs that
/// contain NaNs. Likewise, `0.0` and `-0.0` compare equal, and which of the two
/// is returned for an input that holds both depends on the path taken.
pub trait MinMaxDType: Copy + PartialOrd + Zero {}

impl<T: Copy + PartialOrd + Zero> MinMaxDType for T {}

/// The result of reducing an empty sequence: `(0, 0)`.
#[inline(always)]
pub(crate) fn empty_result<T: MinMaxDType>() -> (T, T) {
    (T::zero(), T::zero())
}

/// Fold two (min, max) results into one.
#[inline(always)]
pub(crate) fn combine<T: MinMaxDType>(acc: (T, T), other: (T, T)) -> (T, T) {
    let mut result = acc;
    if other.0 < result.0 {
        result.0 = other.0;
    }
    if other.1 > result.1 {
        result.1 = other.1;
    }
    result
}
