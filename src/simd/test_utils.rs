use num_traits::float::FloatCore;

use crate::dtype::MinMaxDType;

extern crate dev_utils;
use dev_utils::utils::naive_minmax;

// ------- Generic tests for minmax

/// The generic tests check whether the scalar and SIMD function return the same
/// result, and whether both match a naive two-pass reduction.

const LONG_ARR_LEN: usize = 8193; // 8192 + 1

/// Test for a long array of random DType values whether the scalar and SIMD function
/// return the same result.
pub(crate) fn test_long_array_minmax<DType>(
    get_data: fn(usize) -> Vec<DType>,
    scalar_f: fn(&[DType]) -> (DType, DType),
    simd_f: unsafe fn(&[DType]) -> (DType, DType),
) where
    DType: MinMaxDType + std::fmt::Debug,
{
    let data: &[DType] = &get_data(LONG_ARR_LEN);
    assert_eq!(data.len() % 64, 1); // assert that data does not fully fit in a register

    let (min, max) = scalar_f(data);
    let (min_simd, max_simd) = unsafe { simd_f(data) };
    assert_eq!(min, min_simd);
    assert_eq!(max, max_simd);
    assert_eq!((min, max), naive_minmax(data));
}

const NB_RUNS: usize = 10_000;
const RANDOM_RUN_ARR_LEN: usize = 32 * 4 + 1;

/// Test for many arrays of random DType values whether the scalar and SIMD function
/// return the same result.
pub(crate) fn test_random_runs_minmax<DType>(
    get_data: fn(usize) -> Vec<DType>,
    scalar_f: fn(&[DType]) -> (DType, DType),
    simd_f: unsafe fn(&[DType]) -> (DType, DType),
) where
    DType: MinMaxDType + std::fmt::Debug,
{
    for _ in 0..NB_RUNS {
        let data: &[DType] = &get_data(RANDOM_RUN_ARR_LEN);
        let (min, max) = scalar_f(data);
        let (min_simd, max_simd) = unsafe { simd_f(data) };
        assert_eq!(min, min_simd);
        assert_eq!(max, max_simd);
    }
}

/// Test every length from one register up to four registers (+ 1), which covers
/// every possible remainder length.
pub(crate) fn test_every_remainder_minmax<DType>(
    get_data: fn(usize) -> Vec<DType>,
    simd_f: unsafe fn(&[DType]) -> (DType, DType),
    lane_size: usize,
) where
    DType: MinMaxDType + std::fmt::Debug,
{
    for n in lane_size..=lane_size * 4 + 1 {
        let data: &[DType] = &get_data(n);
        let result = unsafe { simd_f(data) };
        assert_eq!(result, naive_minmax(data), "length {}", n);
    }
}

/// Test that the extremes are found when they are in the remainder (which is
/// handled by the scalar implementation).
pub(crate) fn test_extremes_in_remainder_minmax<DType>(
    get_data: fn(usize) -> Vec<DType>,
    simd_f: unsafe fn(&[DType]) -> (DType, DType),
    lane_size: usize,
) where
    DType: MinMaxDType + std::fmt::Debug,
{
    let n = lane_size * 2 + lane_size / 2;
    let mut data: Vec<DType> = get_data(n);
    let (min, max) = naive_minmax(&data);
    // Move the extremes to the remainder
    let min_index = data.iter().position(|v| *v == min).unwrap();
    data.swap(min_index, n - 1);
    let max_index = data.iter().position(|v| *v == max).unwrap();
    data.swap(max_index, n - 2);
    assert_eq!(data[n - 1], min);
    assert_eq!(data[n - 2], max);

    let (min_simd, max_simd) = unsafe { simd_f(&data) };
    assert_eq!(min_simd, min);
    assert_eq!(max_simd, max);
}

/// Test for strided data whether the SIMD function returns the same result as the
/// naive reduction of the explicit subsequence.
pub(crate) fn test_strided_minmax<DType>(
    get_data: fn(usize) -> Vec<DType>,
    simd_strided_f: unsafe fn(*const u8, usize, usize) -> (DType, DType),
    lane_size: usize,
) where
    DType: MinMaxDType + std::fmt::Debug,
{
    let data: Vec<DType> = get_data(lane_size * 5 * 4 + 3);
    for step in 1..=5 {
        let stride = step * std::mem::size_of::<DType>();
        let max_len = (data.len() - 1) / step + 1;
        for len in [lane_size, lane_size + 1, lane_size * 2 - 1, lane_size * 3, max_len] {
            let expected: Vec<DType> = data.iter().step_by(step).take(len).copied().collect();
            assert_eq!(expected.len(), len);
            let result = unsafe { simd_strided_f(data.as_ptr() as *const u8, len, stride) };
            assert_eq!(
                result,
                naive_minmax(&expected),
                "step {} length {}",
                step,
                len
            );
        }
    }
}

// ------- Float tests for minmax

const FLOAT_ARR_LEN: usize = 1024 + 3;

/// Test that infinities are returned (and are not replaced by some initial value)
pub(crate) fn test_return_infs_minmax<DType>(
    get_data: fn(usize) -> Vec<DType>,
    simd_f: unsafe fn(&[DType]) -> (DType, DType),
) where
    DType: MinMaxDType + FloatCore + std::fmt::Debug,
{
    // Case 1: all elements are +inf
    let data: Vec<DType> = vec![DType::infinity(); FLOAT_ARR_LEN];
    let (min_simd, max_simd) = unsafe { simd_f(&data) };
    assert_eq!(min_simd, DType::infinity());
    assert_eq!(max_simd, DType::infinity());

    // Case 2: all elements are -inf
    let data: Vec<DType> = vec![DType::neg_infinity(); FLOAT_ARR_LEN];
    let (min_simd, max_simd) = unsafe { simd_f(&data) };
    assert_eq!(min_simd, DType::neg_infinity());
    assert_eq!(max_simd, DType::neg_infinity());

    // Case 3: add some +inf and -inf in the middle
    let mut data: Vec<DType> = get_data(FLOAT_ARR_LEN);
    data[100] = DType::infinity();
    data[200] = DType::neg_infinity();
    let (min_simd, max_simd) = unsafe { simd_f(&data) };
    assert_eq!(min_simd, DType::neg_infinity());
    assert_eq!(max_simd, DType::infinity());

    // Case 4: all elements are +inf except for the last one (which is part of the
    // remainder for every register size)
    let mut data: Vec<DType> = vec![DType::infinity(); FLOAT_ARR_LEN];
    data[FLOAT_ARR_LEN - 1] = DType::zero();
    let (min_simd, max_simd) = unsafe { simd_f(&data) };
    assert_eq!(min_simd, DType::zero());
    assert_eq!(max_simd, DType::infinity());
}

/// Test an increasing array of `lane_size + 4` elements, so the last four elements
/// end up in the (scalar) remainder.
pub(crate) fn test_increasing_with_tail_minmax<DType>(
    from_usize: fn(usize) -> DType,
    simd_f: unsafe fn(&[DType]) -> (DType, DType),
    lane_size: usize,
) where
    DType: MinMaxDType + std::fmt::Debug,
{
    let n = lane_size + 4;
    let data: Vec<DType> = (0..n).map(from_usize).collect();
    let (min_simd, max_simd) = unsafe { simd_f(&data) };
    assert_eq!(min_simd, from_usize(0));
    assert_eq!(max_simd, from_usize(n - 1));

    let data: Vec<DType> = (0..n).rev().map(from_usize).collect();
    let (min_simd, max_simd) = unsafe { simd_f(&data) };
    assert_eq!(min_simd, from_usize(0));
    assert_eq!(max_simd, from_usize(n - 1));
}
