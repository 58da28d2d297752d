/// Implementation of the minmax operations for f64 (same approach as for f32, with
/// half the lanes per register).
///
#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
use super::config::SIMDInstructionSet;
#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
use super::generic::{impl_SIMDMinMax, SIMDMinMax, SIMDOps};
#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
use super::generic::{impl_SIMDStridedMinMax, SIMDStridedMinMax, SIMDStridedOps};
#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// --------------------------------------- AVX2 ----------------------------------------

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod avx2 {
    use super::super::config::AVX2;
    use super::*;
    use crate::utils::read_at;

    const LANE_SIZE: usize = AVX2::LANE_SIZE_64;

    impl SIMDOps<f64, __m256d, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m256d) -> [f64; LANE_SIZE] {
            std::mem::transmute::<__m256d, [f64; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const f64) -> __m256d {
            _mm256_loadu_pd(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m256d, b: __m256d) -> __m256d {
            _mm256_min_pd(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m256d, b: __m256d) -> __m256d {
            _mm256_max_pd(a, b)
        }
    }

    impl SIMDStridedOps<f64, __m256d, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> __m256d {
            // This is faster than _mm256_i64gather_pd on the tested platforms
            _mm256_set_pd(
                read_at(data, 0),
                read_at(data, stride),
                read_at(data, 2 * stride),
                read_at(data, 3 * stride),
            )
        }
    }

    // Requires just AVX (and thus not necessarily AVX2)
    impl_SIMDMinMax!(f64, __m256d, LANE_SIZE, AVX2, "avx");
    impl_SIMDStridedMinMax!(f64, __m256d, LANE_SIZE, AVX2, "avx");

    // ------------------------------------ TESTS --------------------------------------

}

// --------------------------------------- AVX512 --------------------------------------

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(minmax_avx512)]
mod avx512 {
    use super::super::config::AVX512;
    use super::*;

    const LANE_SIZE: usize = AVX512::LANE_SIZE_64;

    impl SIMDOps<f64, __m512d, LANE_SIZE> for AVX512 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m512d) -> [f64; LANE_SIZE] {
            std::mem::transmute::<__m512d, [f64; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const f64) -> __m512d {
            _mm512_loadu_pd(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m512d, b: __m512d) -> __m512d {
            _mm512_min_pd(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m512d, b: __m512d) -> __m512d {
            _mm512_max_pd(a, b)
        }
    }

    impl_SIMDMinMax!(f64, __m512d, LANE_SIZE, AVX512, "avx512f");

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::scalar::{ScalarMinMax, SCALAR};
        use crate::simd::test_utils::*;

        extern crate dev_utils;
        use dev_utils::utils::SampleUniformFullRange;

        fn get_array_f64(n: usize) -> Vec<f64> {
            f64::get_random_array(n)
        }

        fn before_each() -> bool {
            is_x86_feature_detected!("avx512f")
        }

        #[test]
        fn test_both_versions_return_the_same_results() {
            if !before_each() {
                return;
            }
            test_long_array_minmax(get_array_f64, SCALAR::minmax, AVX512::minmax);
        }

        #[test]
        fn test_many_random_runs() {
            if !before_each() {
                return;
            }
            test_random_runs_minmax(get_array_f64, SCALAR::minmax, AVX512::minmax);
        }

        #[test]
        fn test_every_remainder() {
            if !before_each() {
                return;
            }
            test_every_remainder_minmax(get_array_f64, AVX512::minmax, LANE_SIZE);
            test_extremes_in_remainder_minmax(get_array_f64, AVX512::minmax, LANE_SIZE);
        }

        #[test]
        fn test_return_infs() {
            if !before_each() {
                return;
            }
            test_return_infs_minmax(get_array_f64, AVX512::minmax);
        }

        #[test]
        fn test_increasing_with_tail() {
            if !before_each() {
                return;
            }
            test_increasing_with_tail_minmax(|i| i as f64, AVX512::minmax, LANE_SIZE);
        }
    }
}

// ---------------------------------------- NEON ---------------------------------------

#[cfg(target_arch = "aarch64")]
mod neon {
    use super::super::config::NEON;
    use super::super::generic::_load_strided_lanes;
    use super::*;

    const LANE_SIZE: usize = NEON::LANE_SIZE_64;

    impl SIMDOps<f64, float64x2_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: float64x2_t) -> [f64; LANE_SIZE] {
            std::mem::transmute::<float64x2_t, [f64; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const f64) -> float64x2_t {
            vld1q_f64(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: float64x2_t, b: float64x2_t) -> float64x2_t {
            vminq_f64(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: float64x2_t, b: float64x2_t) -> float64x2_t {
            vmaxq_f64(a, b)
        }
    }

    impl SIMDStridedOps<f64, float64x2_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> float64x2_t {
            let lanes: [f64; LANE_SIZE] = _load_strided_lanes(data, stride);
            vld1q_f64(lanes.as_ptr())
        }
    }

    impl_SIMDMinMax!(f64, float64x2_t, LANE_SIZE, NEON, "neon");
    impl_SIMDStridedMinMax!(f64, float64x2_t, LANE_SIZE, NEON, "neon");

    // ------------------------------------ TESTS --------------------------------------

}
