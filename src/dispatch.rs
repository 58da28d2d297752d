//! Selection of the reducer for a sequence, and its invocation.
//!
//! The selection ([`select_reducer`]) is a pure function of the length, the byte
//! stride and the capabilities; the `minmax_*` functions run the selected reducer.

use std::mem::{align_of, size_of};
use std::slice;

use log::trace;

use crate::capabilities::{capabilities, Capabilities, Extension};
use crate::dtype::{combine, empty_result, MinMaxDType};
use crate::error::MinMaxError;
use crate::scalar::{ScalarMinMax, SCALAR};
use crate::simd::{SIMDInstructionSet, AVX2, AVX512, NEON};

#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
use crate::simd::{SIMDMinMax, SIMDStridedMinMax};

/// Sequences shorter than this are always reduced with the pairwise scalar reducer.
pub const SIMD_MIN_LENGTH: usize = 16;

/// The vector registers for which a reducer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// 512-bit (AVX-512, x86 / x86_64 with Rust 1.89 or the `nightly_simd` feature)
    Avx512,
    /// 256-bit (AVX / AVX2, x86 / x86_64)
    Avx256,
    /// 128-bit (NEON, aarch64)
    Neon128,
}

// Widest first
const CONTIGUOUS_REGISTERS: [Register; 3] = [Register::Avx512, Register::Avx256, Register::Neon128];
// Registers with a strided reducer
const STRIDED_REGISTERS: [Register; 2] = [Register::Avx256, Register::Neon128];

impl Register {
    /// The register size in bits.
    pub fn bits(self) -> usize {
        match self {
            Register::Avx512 => AVX512::REGISTER_SIZE,
            Register::Avx256 => AVX2::REGISTER_SIZE,
            Register::Neon128 => NEON::REGISTER_SIZE,
        }
    }

    /// The number of `T` lanes in the register.
    pub fn lanes<T>(self) -> usize {
        match self {
            Register::Avx512 => AVX512::get_lane_size::<T>(),
            Register::Avx256 => AVX2::get_lane_size::<T>(),
            Register::Neon128 => NEON::get_lane_size::<T>(),
        }
    }
}

/// The reducer chosen for a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reducer {
    /// Nothing to reduce, the result is `(0, 0)`.
    Empty,
    /// Pairwise scalar reducer over contiguous elements.
    Pairwise,
    /// Pairwise scalar reducer over strided elements.
    PairwiseStrided,
    /// Vector reducer over contiguous elements.
    Vector(Register),
    /// Vector reducer whose lanes are built from strided scalar loads.
    VectorStrided(Register),
}

/// Element types that the dispatcher can reduce.
///
/// The default methods describe a type without vector reducers: an empty
/// `impl MinMaxDispatch for MyType {}` makes every reduction of `MyType` take the
/// pairwise scalar path.
pub trait MinMaxDispatch: MinMaxDType {
    /// The extension that the vector reducer of this type needs for `register`,
    /// or `None` when there is no such reducer.
    fn required_extension(_register: Register) -> Option<Extension> {
        None
    }

    #[doc(hidden)]
    /// # Safety
    /// `register` must have been selected by [`select_reducer`] for this type with
    /// capabilities of the executing CPU, and `data.len()` must be at least the lane
    /// count of `register`.
    unsafe fn _reduce_vector(_register: Register, data: &[Self]) -> (Self, Self) {
        SCALAR::minmax(data)
    }

    #[doc(hidden)]
    /// # Safety
    /// As for `_reduce_vector`; in addition all `len` elements, `stride` (> 0) bytes
    /// apart starting at `data`, must be readable.
    unsafe fn _reduce_vector_strided(
        _register: Register,
        data: *const u8,
        len: usize,
        stride: usize,
    ) -> (Self, Self) {
        SCALAR::minmax_strided(data, len, stride)
    }
}

/// Macro for implementing MinMaxDispatch for the vector accelerated data types
macro_rules! impl_minmax_dispatch {
    // $dtype is the data type (e.g. f32)
    // $ext_256 / $ext_512 are the extensions that the AVX2 / AVX512 reducers need
    ($dtype:ty, $ext_256:expr, $ext_512:expr) => {
        impl MinMaxDispatch for $dtype {
            fn required_extension(register: Register) -> Option<Extension> {
                match register {
                    Register::Avx512 => Some($ext_512),
                    Register::Avx256 => Some($ext_256),
                    Register::Neon128 => Some(Extension::Neon),
                }
            }

            unsafe fn _reduce_vector(register: Register, data: &[$dtype]) -> ($dtype, $dtype) {
                match register {
                    #[cfg(all(
                        any(target_arch = "x86", target_arch = "x86_64"),
                        minmax_avx512
                    ))]
                    Register::Avx512 => AVX512::minmax(data),
                    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                    Register::Avx256 => AVX2::minmax(data),
                    #[cfg(target_arch = "aarch64")]
                    Register::Neon128 => NEON::minmax(data),
                    #[allow(unreachable_patterns)]
                    _ => SCALAR::minmax(data),
                }
            }

            unsafe fn _reduce_vector_strided(
                register: Register,
                data: *const u8,
                len: usize,
                stride: usize,
            ) -> ($dtype, $dtype) {
                match register {
                    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                    Register::Avx256 => AVX2::minmax_strided(data, len, stride),
                    #[cfg(target_arch = "aarch64")]
                    Register::Neon128 => NEON::minmax_strided(data, len, stride),
                    #[allow(unreachable_patterns)]
                    _ => SCALAR::minmax_strided(data, len, stride),
                }
            }
        }
    };
}

// f32 and f64 only need AVX for the 256-bit registers
#[cfg(feature = "float")]
impl_minmax_dispatch!(f32, Extension::Avx, Extension::Avx512F);
#[cfg(feature = "float")]
impl_minmax_dispatch!(f64, Extension::Avx, Extension::Avx512F);
impl_minmax_dispatch!(i16, Extension::Avx2, Extension::Avx512BW);
impl_minmax_dispatch!(i32, Extension::Avx2, Extension::Avx512F);

// Scalar only
impl MinMaxDispatch for i8 {}
impl MinMaxDispatch for i64 {}
impl MinMaxDispatch for u8 {}
impl MinMaxDispatch for u16 {}
impl MinMaxDispatch for u32 {}
impl MinMaxDispatch for u64 {}
#[cfg(feature = "half")]
impl MinMaxDispatch for half::f16 {}

// ------------------------------------ Selection ------------------------------------

/// Select the reducer for `len` elements of type `T` that are `stride` bytes apart.
///
/// A stride of plus or minus `size_of::<T>()` is contiguous (a negative one walks a
/// contiguous block backwards). Sequences of fewer than [`SIMD_MIN_LENGTH`]
/// elements are reduced pairwise. Otherwise the widest register whose extension is
/// in `caps` and whose lanes fit in `len` is used; only the 256-bit and 128-bit
/// registers have a strided reducer.
pub fn select_reducer<T: MinMaxDispatch>(len: usize, stride: isize, caps: &Capabilities) -> Reducer {
    if len == 0 {
        return Reducer::Empty;
    }
    let contiguous = stride.unsigned_abs() == size_of::<T>();
    if len < SIMD_MIN_LENGTH {
        return if contiguous {
            Reducer::Pairwise
        } else {
            Reducer::PairwiseStrided
        };
    }

    if contiguous {
        CONTIGUOUS_REGISTERS
            .iter()
            .find(|r| is_usable::<T>(**r, len, caps))
            .map_or(Reducer::Pairwise, |r| Reducer::Vector(*r))
    } else {
        select_strided_reducer::<T>(len, caps)
    }
}

fn is_usable<T: MinMaxDispatch>(register: Register, len: usize, caps: &Capabilities) -> bool {
    T::required_extension(register).map_or(false, |ext| caps.supports(ext))
        && register.lanes::<T>() <= len
}

fn select_strided_reducer<T: MinMaxDispatch>(len: usize, caps: &Capabilities) -> Reducer {
    STRIDED_REGISTERS
        .iter()
        .find(|r| is_usable::<T>(**r, len, caps))
        .map_or(Reducer::PairwiseStrided, |r| Reducer::VectorStrided(*r))
}

// ------------------------------------ Execution ------------------------------------

/// Get the minimum and maximum value of `len` elements that are `stride` bytes
/// apart, starting at `data`, using only the extensions in `caps`.
///
/// A negative stride walks backwards from `data`. An empty sequence returns
/// `(0, 0)`.
///
/// `data` does not need to be aligned for `T`: a misaligned contiguous block is
/// reduced with the strided reducers, which read every element unaligned.
///
/// # Safety
/// - `data` must be valid for reads of the `len` elements it addresses, i.e. of the
///   elements at byte offsets `0, stride, .., (len - 1) * stride`.
/// - `caps` must not claim extensions that the executing CPU lacks (this holds for
///   every `Capabilities` value obtainable outside this crate).
pub unsafe fn minmax_strided_with<T: MinMaxDispatch>(
    caps: &Capabilities,
    data: *const T,
    len: usize,
    stride: isize,
) -> (T, T) {
    let mut reducer = select_reducer::<T>(len, stride, caps);
    if reducer == Reducer::Empty {
        trace!("minmax of 0 elements: {:?}", reducer);
        return empty_result();
    }

    // Rebase negative strides to the last-addressed element
    let mut base = data as *const u8;
    if stride < 0 {
        base = base.offset((len - 1) as isize * stride);
    }

    // Slices need aligned elements
    if (base as usize) % align_of::<T>() != 0 {
        reducer = match reducer {
            Reducer::Pairwise => Reducer::PairwiseStrided,
            Reducer::Vector(_) => select_strided_reducer::<T>(len, caps),
            strided => strided,
        };
    }
    trace!(
        "minmax of {} elements with stride {} bytes: {:?}",
        len,
        stride,
        reducer
    );
    let stride = stride.unsigned_abs();

    match reducer {
        Reducer::Empty => empty_result(),
        Reducer::Pairwise => SCALAR::minmax(slice::from_raw_parts(base as *const T, len)),
        Reducer::PairwiseStrided => SCALAR::minmax_strided(base, len, stride),
        Reducer::Vector(register) => {
            T::_reduce_vector(register, slice::from_raw_parts(base as *const T, len))
        }
        Reducer::VectorStrided(register) => {
            T::_reduce_vector_strided(register, base, len, stride)
        }
    }
}

/// Get the minimum and maximum value of `len` elements that are `stride` bytes
/// apart, starting at `data`.
///
/// # Safety
/// See [`minmax_strided_with`].
pub unsafe fn minmax_strided<T: MinMaxDispatch>(data: *const T, len: usize, stride: isize) -> (T, T) {
    minmax_strided_with(capabilities(), data, len, stride)
}

/// Get the minimum and maximum value of a slice, using only the extensions in
/// `caps`.
pub fn minmax_contiguous_with<T: MinMaxDispatch>(caps: &Capabilities, data: &[T]) -> (T, T) {
    unsafe { minmax_strided_with(caps, data.as_ptr(), data.len(), size_of::<T>() as isize) }
}

/// Get the minimum and maximum value of a slice.
pub fn minmax_contiguous<T: MinMaxDispatch>(data: &[T]) -> (T, T) {
    minmax_contiguous_with(capabilities(), data)
}

/// Get the minimum and maximum value of a row-major `rows` x `cols` matrix stored in
/// `data`; every row is reduced on its own.
pub fn minmax_rows<T: MinMaxDispatch>(
    data: &[T],
    rows: usize,
    cols: usize,
) -> Result<(T, T), MinMaxError> {
    let shape_mismatch = MinMaxError::ShapeMismatch {
        rows,
        cols,
        available: data.len(),
    };
    let size = rows.checked_mul(cols).ok_or(shape_mismatch.clone())?;
    if size > data.len() {
        return Err(shape_mismatch);
    }
    if size == 0 {
        return Ok(empty_result());
    }
    Ok(data[..size]
        .chunks_exact(cols)
        .map(minmax_contiguous)
        .reduce(combine)
        .unwrap_or_else(empty_result))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    extern crate dev_utils;
    use dev_utils::utils;

    const F32: isize = size_of::<f32>() as isize;

    fn all_x86() -> Capabilities {
        Capabilities::from_extensions(&[
            Extension::Avx,
            Extension::Avx2,
            Extension::Avx512F,
            Extension::Avx512BW,
        ])
    }

    #[rstest]
    #[case::empty(0, F32, Reducer::Empty)]
    #[case::single(1, F32, Reducer::Pairwise)]
    #[case::below_threshold(15, F32, Reducer::Pairwise)]
    #[case::below_threshold_strided(15, 2 * F32, Reducer::PairwiseStrided)]
    #[case::threshold(16, F32, Reducer::Vector(Register::Avx512))]
    #[case::long(10_000, F32, Reducer::Vector(Register::Avx512))]
    #[case::reversed(10_000, -F32, Reducer::Vector(Register::Avx512))]
    #[case::strided(10_000, 3 * F32, Reducer::VectorStrided(Register::Avx256))]
    #[case::negative_strided(10_000, -2 * F32, Reducer::VectorStrided(Register::Avx256))]
    #[case::zero_stride(100, 0, Reducer::VectorStrided(Register::Avx256))]
    fn test_select_f32_x86(#[case] len: usize, #[case] stride: isize, #[case] expected: Reducer) {
        assert_eq!(select_reducer::<f32>(len, stride, &all_x86()), expected);
    }

    #[rstest]
    #[case::contiguous(100, F32, Reducer::Vector(Register::Neon128))]
    #[case::strided(100, 2 * F32, Reducer::VectorStrided(Register::Neon128))]
    #[case::short(8, F32, Reducer::Pairwise)]
    fn test_select_f32_neon(#[case] len: usize, #[case] stride: isize, #[case] expected: Reducer) {
        let caps = Capabilities::from_extensions(&[Extension::Neon]);
        assert_eq!(select_reducer::<f32>(len, stride, &caps), expected);
    }

    #[test]
    fn test_select_without_capabilities() {
        let caps = Capabilities::none();
        assert_eq!(select_reducer::<f32>(1000, F32, &caps), Reducer::Pairwise);
        assert_eq!(select_reducer::<f32>(1000, 2 * F32, &caps), Reducer::PairwiseStrided);
        assert_eq!(select_reducer::<i16>(1000, 2, &caps), Reducer::Pairwise);
        assert_eq!(select_reducer::<i16>(0, 2, &caps), Reducer::Empty);
    }

    #[test]
    fn test_select_lanes_must_fit() {
        let caps = Capabilities::from_extensions(&[Extension::Avx2, Extension::Avx512BW]);
        // 32 lanes of i16 in a 512-bit register
        assert_eq!(select_reducer::<i16>(31, 2, &caps), Reducer::Vector(Register::Avx256));
        assert_eq!(select_reducer::<i16>(32, 2, &caps), Reducer::Vector(Register::Avx512));
        // 16 lanes of f32 in a 512-bit register, 8 in a 256-bit register
        let caps = Capabilities::from_extensions(&[Extension::Avx]);
        assert_eq!(select_reducer::<f32>(16, F32, &caps), Reducer::Vector(Register::Avx256));
    }

    #[test]
    fn test_select_required_extension() {
        // Floats only need AVX, integers need AVX2
        let caps = Capabilities::from_extensions(&[Extension::Avx]);
        assert_eq!(select_reducer::<f64>(100, 8, &caps), Reducer::Vector(Register::Avx256));
        assert_eq!(select_reducer::<i32>(100, 4, &caps), Reducer::Pairwise);
        // 16-bit integers need AVX512BW for the 512-bit register
        let caps = Capabilities::from_extensions(&[Extension::Avx2, Extension::Avx512F]);
        assert_eq!(select_reducer::<i16>(100, 2, &caps), Reducer::Vector(Register::Avx256));
        assert_eq!(select_reducer::<i32>(100, 4, &caps), Reducer::Vector(Register::Avx512));
        // The 512-bit register has no strided reducer
        let caps = Capabilities::from_extensions(&[Extension::Avx512F]);
        assert_eq!(select_reducer::<f32>(100, 2 * F32, &caps), Reducer::PairwiseStrided);
    }

    #[test]
    fn test_select_scalar_only_types() {
        let caps = all_x86();
        assert_eq!(select_reducer::<u8>(1000, 1, &caps), Reducer::Pairwise);
        assert_eq!(select_reducer::<i64>(1000, 16, &caps), Reducer::PairwiseStrided);
        assert_eq!(u64::required_extension(Register::Avx256), None);
    }

    #[test]
    fn test_register_lanes() {
        assert_eq!(Register::Avx512.bits(), 512);
        assert_eq!(Register::Avx256.lanes::<f32>(), 8);
        assert_eq!(Register::Avx512.lanes::<i16>(), 32);
        assert_eq!(Register::Neon128.lanes::<f64>(), 2);
    }

    #[cfg(feature = "float")]
    #[test]
    fn test_widest_float_register_with_tail() {
        let caps = Capabilities::detect();
        if caps.supports(Extension::Avx512F) {
            assert_eq!(select_reducer::<f32>(20, F32, &caps), Reducer::Vector(Register::Avx512));
        }
        // 16 lanes + a remainder of 4 elements, with the max and then the min in the tail
        let mut data: Vec<f32> = (0..20).map(|i| i as f32).collect();
        assert_eq!(minmax_contiguous_with(&caps, &data), (0.0, 19.0));
        data[17] = -1.0;
        assert_eq!(minmax_contiguous_with(&caps, &data), (-1.0, 19.0));
    }

    #[test]
    fn test_detected_and_scalar_agree() {
        let caps = Capabilities::detect();
        for n in [0, 1, 15, 16, 17, 63, 64, 65, 1000, 1023] {
            let data: Vec<i32> = utils::get_random_array(n, i32::MIN, i32::MAX);
            let expected = minmax_contiguous_with(&Capabilities::none(), &data);
            assert_eq!(minmax_contiguous_with(&caps, &data), expected);
            if n > 0 {
                assert_eq!(expected, utils::naive_minmax(&data));
            }
        }
    }

    #[test]
    fn test_empty() {
        let data: [f32; 0] = [];
        assert_eq!(minmax_contiguous(&data), (0.0, 0.0));
        assert_eq!(unsafe { minmax_strided(data.as_ptr(), 0, -8) }, (0.0, 0.0));
    }

    #[test]
    fn test_negative_stride() {
        let data = [1.0f32, 2.0, 3.0];
        let last = unsafe { data.as_ptr().add(2) };
        assert_eq!(unsafe { minmax_strided(last, 3, -F32) }, (1.0, 3.0));
    }

    #[rstest]
    #[case::forward(2)]
    #[case::backward(-2)]
    fn test_misaligned_contiguous_i16(#[case] stride: isize) {
        for n in [10, 1001] {
            let values: Vec<i16> = utils::get_random_array(n, i16::MIN, i16::MAX);
            // Packed at an odd address, so that no element is aligned
            let mut bytes: Vec<u8> = Vec::with_capacity(2 * n + 1);
            let skip = if bytes.as_ptr() as usize % 2 == 0 { 1 } else { 0 };
            bytes.resize(skip, 0);
            bytes.extend(values.iter().flat_map(|v| v.to_ne_bytes()));
            let first = unsafe { bytes.as_ptr().add(skip) };
            let start = if stride < 0 {
                unsafe { first.add(2 * (n - 1)) }
            } else {
                first
            };
            let start = start as *const i16;
            assert_ne!(start as usize % align_of::<i16>(), 0);

            for caps in [Capabilities::detect(), Capabilities::none()] {
                let result = unsafe { minmax_strided_with(&caps, start, n, stride) };
                assert_eq!(result, utils::naive_minmax(&values), "length {}", n);
            }
        }
    }

    #[test]
    fn test_strided_every_other() {
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(unsafe { minmax_strided(data.as_ptr(), 3, 2 * F32) }, (1.0, 5.0));
    }

    #[test]
    fn test_minmax_rows() {
        let data: Vec<i32> = (0..12).collect();
        assert_eq!(minmax_rows(&data, 3, 4), Ok((0, 11)));
        assert_eq!(minmax_rows(&data, 2, 4), Ok((0, 7)));
        assert_eq!(minmax_rows(&data, 0, 4), Ok((0, 0)));
        assert_eq!(minmax_rows(&data, 4, 0), Ok((0, 0)));
        assert_eq!(
            minmax_rows(&data, 4, 4),
            Err(MinMaxError::ShapeMismatch {
                rows: 4,
                cols: 4,
                available: 12
            })
        );
        assert!(minmax_rows(&data, usize::MAX, 2).is_err());
    }
}
