//! A crate for finding the minimum and maximum value of a (strided) array in a single pass.
//!
//! The reduction is optimized for speed using [SIMD](https://en.wikipedia.org/wiki/Single_instruction,_multiple_data) instructions (when available).
//! Small inputs and the elements that do not fill a complete register are handled by a pairwise scalar loop, which needs 3 comparisons per 2 elements.
//! Runtime CPU feature detection is used to choose the widest suitable implementation for the current CPU (with a scalar fallback).
//!
//! The SIMD implementation is enabled for the following architectures:
//! - `x86` / `x86_64`: [`AVX2`](https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#Advanced_Vector_Extensions_2), [`AVX512`](https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#AVX-512)
//! - `aarch64`: [`NEON`](https://en.wikipedia.org/wiki/ARM_architecture#Advanced_SIMD_(Neon))
//!
//! # Description
//!
//! Data that is not contiguous (e.g., a column of a row-major matrix, or an array
//! that is traversed backwards) does not need to be copied: the strided reducers
//! build their SIMD registers from scalar loads that are `stride` bytes apart.
//!
//! The [`MinMax`](trait.MinMax.html) trait is implemented for [`slice`](https://doc.rust-lang.org/std/primitive.slice.html) and [`Vec`](https://doc.rust-lang.org/std/vec/struct.Vec.html).
//! - SIMD accelerated data types
//!   - ints: `i16`, `i32`
//!   - floats: `f32`, `f64` (see [Features](#features))
//! - scalar data types
//!   - ints: `i8`, `i64`
//!   - uints: `u8`, `u16`, `u32`, `u64`
//!   - floats: `f16` (see [Features](#features))
//!
//! The minmax of an empty array is `(0, 0)`.
//!
//! ### Caution
//! No guarantee is made on the result of arrays that contain NaNs.
//!
//!
//! # Features
//! This crate has several features.
//!
//! - **`nightly_simd`** - enables the use of AVX512 SIMD instructions on compilers older than 1.89 (requires a nightly compiler). From Rust 1.89 on, the AVX512 implementations are always compiled in.
//! - **`float`** *(default)* - enables the traits for floats (`f32` and `f64`).
//! - **`half`** - enables the traits for `f16` (requires the [`half`](https://crates.io/crates/half) crate).
//! - **`ndarray`** - adds the traits to [`ndarray::ArrayBase`](https://docs.rs/ndarray/latest/ndarray/struct.ArrayBase.html), of any stride (requires the `ndarray` crate).
//! - **`arrow`** - adds the traits to [`arrow::array::PrimitiveArray`](https://docs.rs/arrow/latest/arrow/array/struct.PrimitiveArray.html) (requires the `arrow` crate).
//! - **`arrow2`** - adds the traits to [`arrow2::array::PrimitiveArray`](https://docs.rs/arrow2/latest/arrow2/array/struct.PrimitiveArray.html) (requires the `arrow2` crate).
//!
//! Setting the `MINMAX_DISABLE_SIMD` environment variable (before the first call)
//! disables all SIMD implementations.
//!
//!
//! # Examples
//!
//! ## Example with integers
//! ```
//! use minmax::MinMax;
//!
//! let a: Vec<i32> = vec![3, 1, 4, 1, 5, 9, 2, 6];
//! let (min, max) = a.minmax();
//! assert_eq!(min, 1);
//! assert_eq!(max, 9);
//! ```
//!
//! ## Example with strided data
//! ```
//! use minmax::minmax_strided;
//!
//! let a: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! // Every other element: 1.0, 3.0, 5.0
//! let stride = 2 * std::mem::size_of::<f32>() as isize;
//! let (min, max) = unsafe { minmax_strided(a.as_ptr(), 3, stride) };
//! assert_eq!((min, max), (1.0, 5.0));
//! ```
//!

// Enable SIMD nightly features when on nightly_simd enabled
#![cfg_attr(feature = "nightly_simd", feature(cfg_version))]
// ------- version 1.78 and above
#![cfg_attr(
    all(
        feature = "nightly_simd",
        any(target_arch = "x86_64", target_arch = "x86")
    ),
    cfg_attr(version("1.78"), feature(stdarch_x86_avx512))
)]
// ------- version 1.77 and below
#![cfg_attr(
    feature = "nightly_simd",
    cfg_attr(not(version("1.78")), feature(stdsimd))
)]
// ------- any version
#![cfg_attr(feature = "nightly_simd", feature(avx512_target_feature))]

// It is necessary to import this at the root of the crate
// See: https://github.com/la10736/rstest/tree/master/rstest_reuse#use-rstest_resuse-at-the-top-of-your-crate
#[cfg(test)]
use rstest_reuse;

pub mod capabilities;
pub mod dispatch;
mod dtype;
mod error;
pub mod scalar;
pub mod simd;
mod utils;
mod view;

pub use capabilities::{capabilities, supports, Capabilities, Extension, DISABLE_SIMD_ENV};
pub use dispatch::{
    minmax_contiguous, minmax_contiguous_with, minmax_rows, minmax_strided, minmax_strided_with,
    select_reducer, MinMaxDispatch, Reducer, Register, SIMD_MIN_LENGTH,
};
pub use dtype::MinMaxDType;
pub use error::MinMaxError;
pub use scalar::{ScalarMinMax, SCALAR};
pub use view::StridedView;

/// Trait for finding the minimum and maximum value in an array.
///
/// This trait is implemented for slices (or other array-like) of integers and floats.
///
/// See the [feature documentation](index.html#features) for more information on the supported data types and array types.
///
pub trait MinMax {
    /// The element type of the array.
    type Item;

    /// Get the minimum and maximum value in the array.
    ///
    /// # Returns
    /// A tuple `(min, max)`; `(0, 0)` for an empty array.
    ///
    fn minmax(&self) -> (Self::Item, Self::Item);
}

// ------------------------------ [T] ------------------------------

impl<T: MinMaxDispatch> MinMax for [T] {
    type Item = T;

    fn minmax(&self) -> (T, T) {
        minmax_contiguous(self)
    }
}

// ------------------------------ Vec ------------------------------

impl<T: MinMaxDispatch> MinMax for Vec<T> {
    type Item = T;

    fn minmax(&self) -> (T, T) {
        self.as_slice().minmax()
    }
}

// ----------------------- (optional) ndarray ----------------------

#[cfg(feature = "ndarray")]
mod ndarray_impl {
    use super::*;
    use ndarray::{ArrayBase, Data, Ix1, Ix2};

    // ArrayBase instead of Array1 or ArrayView1 -> https://github.com/rust-ndarray/ndarray/issues/1059
    // The array its own stride is used, so (e.g.) column views and reversed views are
    // not copied.
    impl<S> MinMax for ArrayBase<S, Ix1>
    where
        S: Data,
        S::Elem: MinMaxDispatch,
    {
        type Item = S::Elem;

        fn minmax(&self) -> (S::Elem, S::Elem) {
            let stride = self.strides()[0] * std::mem::size_of::<S::Elem>() as isize;
            unsafe { minmax_strided(self.as_ptr(), self.len(), stride) }
        }
    }

    // Every row is reduced on its own
    impl<S> MinMax for ArrayBase<S, Ix2>
    where
        S: Data,
        S::Elem: MinMaxDispatch,
    {
        type Item = S::Elem;

        fn minmax(&self) -> (S::Elem, S::Elem) {
            if self.is_empty() {
                return dtype::empty_result();
            }
            self.rows()
                .into_iter()
                .map(|row| row.minmax())
                .reduce(dtype::combine)
                .unwrap_or_else(dtype::empty_result)
        }
    }
}

// ----------------------- (optional) arrow ----------------------

#[cfg(feature = "arrow")]
mod arrow_impl {
    use super::*;
    use arrow::array::PrimitiveArray;

    // Use the slice implementation
    // -> implement for T where the dispatch is available for T::Native
    impl<T> MinMax for PrimitiveArray<T>
    where
        T: arrow::datatypes::ArrowNumericType,
        T::Native: MinMaxDispatch,
    {
        type Item = T::Native;

        fn minmax(&self) -> (T::Native, T::Native) {
            let values: &[T::Native] = self.values().as_ref();
            minmax_contiguous(values)
        }
    }
}

// ---------------------- (optional) arrow2 ----------------------

#[cfg(feature = "arrow2")]
mod arrow2_impl {
    use super::*;
    use arrow2::array::PrimitiveArray;

    impl<T> MinMax for PrimitiveArray<T>
    where
        T: arrow2::types::NativeType + MinMaxDispatch,
    {
        type Item = T;

        fn minmax(&self) -> (T, T) {
            let values: &[T] = self.values().as_ref();
            minmax_contiguous(values)
        }
    }

    #[cfg(feature = "half")]
    #[inline(always)]
    /// Convert a PrimitiveArray<arrow2::types::f16> to a slice of half::f16
    /// To do so, the pointer to the arrow2::types::f16 slice is casted to a pointer to
    /// a slice of half::f16 (since both use u16 as their underlying type)
    fn _to_half_f16_slice(
        primitive_array_f16: &PrimitiveArray<arrow2::types::f16>,
    ) -> &[half::f16] {
        unsafe {
            std::slice::from_raw_parts(
                primitive_array_f16.values().as_ptr() as *const half::f16,
                primitive_array_f16.len(),
            )
        }
    }

    #[cfg(feature = "half")]
    impl MinMax for PrimitiveArray<arrow2::types::f16> {
        type Item = half::f16;

        fn minmax(&self) -> (half::f16, half::f16) {
            minmax_contiguous(_to_half_f16_slice(self))
        }
    }
}

// ======================================= TESTS =======================================
