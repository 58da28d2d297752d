use super::config::SIMDInstructionSet;
use crate::dtype::MinMaxDType;
use crate::scalar::{ScalarMinMax, SCALAR};
use crate::utils::fold_lanes;
#[cfg(target_arch = "aarch64")]
use crate::utils::read_at;

// ---------------------------------- SIMD operations ----------------------------------

/// Core SIMD operations
/// These operations are used by the SIMD algorithm and have to be implemented for each
/// data type - SIMD instruction set combination.
/// The operations are implemented in the `simd_*.rs` files.
///
/// `_mm_min` and `_mm_max` map to the ordered min / max instruction of the
/// instruction set; whatever that instruction does with NaNs is what the reduction
/// does with NaNs.
pub trait SIMDOps<ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
{
    /// Convert a SIMD register to array
    unsafe fn _reg_to_arr(reg: SIMDVecDtype) -> [ScalarDType; LANE_SIZE];

    /// Load a SIMD register from (unaligned) memory
    unsafe fn _mm_loadu(data: *const ScalarDType) -> SIMDVecDtype;

    /// Lane-wise minimum of two SIMD registers
    unsafe fn _mm_min(a: SIMDVecDtype, b: SIMDVecDtype) -> SIMDVecDtype;

    /// Lane-wise maximum of two SIMD registers
    unsafe fn _mm_max(a: SIMDVecDtype, b: SIMDVecDtype) -> SIMDVecDtype;

    /// Horizontal minmax: fold the lanes of the min and max SIMD registers (and the
    /// optional result of the remainder) into a single (min, max) pair
    #[inline(always)]
    unsafe fn _horiz_minmax(
        values_low: SIMDVecDtype,
        values_high: SIMDVecDtype,
        remainder: Option<(ScalarDType, ScalarDType)>,
    ) -> (ScalarDType, ScalarDType) {
        let low_arr = Self::_reg_to_arr(values_low);
        let high_arr = Self::_reg_to_arr(values_high);
        fold_lanes(&low_arr, &high_arr, remainder)
    }
}

/// SIMD operation for strided data
///
/// Hardware gather instructions turned out to be slower than LANE_SIZE scalar loads
/// followed by a register construction (`_mm256_set_*`), so this is how the lanes
/// are filled.
pub trait SIMDStridedOps<ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>:
    SIMDOps<ScalarDType, SIMDVecDtype, LANE_SIZE>
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
{
    /// Load LANE_SIZE elements that are `stride` bytes apart into a SIMD register.
    /// Lane 0 holds the last-addressed element (the order of the construction
    /// instructions), which does not matter for the reduction.
    unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> SIMDVecDtype;
}

/// Read LANE_SIZE elements that are `stride` bytes apart, in reversed lane order
/// (lane 0 holds the last-addressed element).
///
/// Used by the instruction sets that have no register construction instruction.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub(crate) unsafe fn _load_strided_lanes<ScalarDType, const LANE_SIZE: usize>(
    data: *const u8,
    stride: usize,
) -> [ScalarDType; LANE_SIZE]
where
    ScalarDType: MinMaxDType,
{
    let mut lanes = [ScalarDType::zero(); LANE_SIZE];
    for (i, lane) in lanes.iter_mut().rev().enumerate() {
        *lane = read_at(data, i * stride);
    }
    lanes
}

// ---------------------------------- SIMD algorithm -----------------------------------

/// The SIMDCore trait (for all data types)
///
/// This trait is auto-implemented below for all structs that implement SIMDOps and
/// SIMDInstructionSet (see `config.rs`).
pub trait SIMDCore<ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>:
    SIMDOps<ScalarDType, SIMDVecDtype, LANE_SIZE>
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
{
    /// Core minmax algorithm - returns (min, max)
    ///
    /// This method asserts:
    /// - the array length is >= LANE_SIZE
    ///
    /// The elements that do not fill a complete register are handled by the
    /// pairwise scalar implementation, its result is folded in at the horizontal
    /// reduction.
    #[inline(always)]
    unsafe fn _core_minmax(arr: &[ScalarDType]) -> (ScalarDType, ScalarDType) {
        assert!(arr.len() >= LANE_SIZE);
        let nb_registers = arr.len() / LANE_SIZE;

        let mut arr_ptr = arr.as_ptr(); // Array pointer we will increment in the loop
        let mut values_low = Self::_mm_loadu(arr_ptr);
        let mut values_high = values_low;

        for _ in 1..nb_registers {
            // Load the next chunk of data
            arr_ptr = arr_ptr.add(LANE_SIZE);
            let new_values = Self::_mm_loadu(arr_ptr);

            values_low = Self::_mm_min(values_low, new_values);
            values_high = Self::_mm_max(values_high, new_values);
        }

        // Handle the remainder
        let start = nb_registers * LANE_SIZE;
        let remainder = if start < arr.len() {
            Some(SCALAR::minmax(arr.get_unchecked(start..)))
        } else {
            None
        };

        Self::_horiz_minmax(values_low, values_high, remainder)
    }
}

// Implement SIMDCore where SIMDOps is implemented (for the SIMDIstructionSet structs)
impl<T, ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>
    SIMDCore<ScalarDType, SIMDVecDtype, LANE_SIZE> for T
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
    T: SIMDOps<ScalarDType, SIMDVecDtype, LANE_SIZE> + SIMDInstructionSet,
{
    // Use the implementation
}

/// The SIMDStridedCore trait (for all data types)
///
/// This trait is auto-implemented below for all structs that implement
/// SIMDStridedOps and SIMDInstructionSet.
pub trait SIMDStridedCore<ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>:
    SIMDStridedOps<ScalarDType, SIMDVecDtype, LANE_SIZE>
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
{
    /// Core strided minmax algorithm - returns (min, max)
    ///
    /// This method asserts:
    /// - `len` is >= LANE_SIZE
    /// This method assumes:
    /// - `stride` is the (positive) distance in bytes between two elements
    /// - all `len` elements are readable
    #[inline(always)]
    unsafe fn _core_minmax_strided(
        data: *const u8,
        len: usize,
        stride: usize,
    ) -> (ScalarDType, ScalarDType) {
        assert!(len >= LANE_SIZE);
        let nb_registers = len / LANE_SIZE;
        let register_stride = LANE_SIZE * stride;

        let mut data_ptr = data; // Byte cursor we will increment in the loop
        let mut values_low = Self::_mm_load_strided(data_ptr, stride);
        let mut values_high = values_low;

        for _ in 1..nb_registers {
            data_ptr = data_ptr.add(register_stride);
            let new_values = Self::_mm_load_strided(data_ptr, stride);

            values_low = Self::_mm_min(values_low, new_values);
            values_high = Self::_mm_max(values_high, new_values);
        }

        // Handle the remainder
        let done = nb_registers * LANE_SIZE;
        let remainder = if done < len {
            Some(SCALAR::minmax_strided(
                data.add(done * stride),
                len - done,
                stride,
            ))
        } else {
            None
        };

        Self::_horiz_minmax(values_low, values_high, remainder)
    }
}

// Implement SIMDStridedCore where SIMDStridedOps is implemented
impl<T, ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>
    SIMDStridedCore<ScalarDType, SIMDVecDtype, LANE_SIZE> for T
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
    T: SIMDStridedOps<ScalarDType, SIMDVecDtype, LANE_SIZE> + SIMDInstructionSet,
{
    // Use the implementation
}

// --------------------------------- MinMax SIMD TRAITS --------------------------------

/// Trait for SIMD minmax operations on contiguous data
///
/// This trait its `minmax` method should be implemented for all structs that
/// implement `SIMDOps` for the same generics (see the `impl_SIMDMinMax!` macro).
#[allow(clippy::missing_safety_doc)] // The caller must check the target feature
pub trait SIMDMinMax<ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>:
    SIMDCore<ScalarDType, SIMDVecDtype, LANE_SIZE>
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
{
    /// Returns the minimum and maximum value of the array (length >= LANE_SIZE)
    unsafe fn minmax(data: &[ScalarDType]) -> (ScalarDType, ScalarDType);
}

/// Trait for SIMD minmax operations on strided data
///
/// This trait its `minmax_strided` method should be implemented for all structs
/// that implement `SIMDStridedOps` for the same generics (see the
/// `impl_SIMDStridedMinMax!` macro).
#[allow(clippy::missing_safety_doc)] // The caller must check the target feature
pub trait SIMDStridedMinMax<ScalarDType, SIMDVecDtype, const LANE_SIZE: usize>:
    SIMDStridedCore<ScalarDType, SIMDVecDtype, LANE_SIZE>
where
    ScalarDType: MinMaxDType,
    SIMDVecDtype: Copy,
{
    /// Returns the minimum and maximum value of `len` (>= LANE_SIZE) elements that
    /// are `stride` (> 0) bytes apart
    unsafe fn minmax_strided(
        data: *const u8,
        len: usize,
        stride: usize,
    ) -> (ScalarDType, ScalarDType);
}

// ------------------------------------ Impl Macros ------------------------------------

// The target feature is added to the function that is called by the dispatcher, so
// that all (inlined) operations are compiled with that target feature.

macro_rules! impl_SIMDMinMax {
    ($scalar_dtype:ty, $simd_vec_dtype:ty, $lane_size:expr, $simd_struct:ty, $target:expr) => {
        impl $crate::simd::SIMDMinMax<$scalar_dtype, $simd_vec_dtype, $lane_size> for $simd_struct {
            #[target_feature(enable = $target)]
            unsafe fn minmax(data: &[$scalar_dtype]) -> ($scalar_dtype, $scalar_dtype) {
                <Self as $crate::simd::SIMDCore<$scalar_dtype, $simd_vec_dtype, $lane_size>>::_core_minmax(data)
            }
        }
    };
}

macro_rules! impl_SIMDStridedMinMax {
    ($scalar_dtype:ty, $simd_vec_dtype:ty, $lane_size:expr, $simd_struct:ty, $target:expr) => {
        impl $crate::simd::SIMDStridedMinMax<$scalar_dtype, $simd_vec_dtype, $lane_size>
            for $simd_struct
        {
            #[target_feature(enable = $target)]
            unsafe fn minmax_strided(
                data: *const u8,
                len: usize,
                stride: usize,
            ) -> ($scalar_dtype, $scalar_dtype) {
                <Self as $crate::simd::SIMDStridedCore<
                    $scalar_dtype,
                    $simd_vec_dtype,
                    $lane_size,
                >>::_core_minmax_strided(data, len, stride)
            }
        }
    };
}

pub(crate) use impl_SIMDMinMax; // Now classic paths Just Work™
pub(crate) use impl_SIMDStridedMinMax; // Now classic paths Just Work™
