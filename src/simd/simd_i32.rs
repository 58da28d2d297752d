/// Implementation of the minmax operations for i32.
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

    const LANE_SIZE: usize = AVX2::LANE_SIZE_32;

    impl SIMDOps<i32, __m256i, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m256i) -> [i32; LANE_SIZE] {
            std::mem::transmute::<__m256i, [i32; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const i32) -> __m256i {
            _mm256_loadu_si256(data as *const __m256i)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m256i, b: __m256i) -> __m256i {
            _mm256_min_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m256i, b: __m256i) -> __m256i {
            _mm256_max_epi32(a, b)
        }
    }

    impl SIMDStridedOps<i32, __m256i, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> __m256i {
            _mm256_set_epi32(
                read_at(data, 0),
                read_at(data, stride),
                read_at(data, 2 * stride),
                read_at(data, 3 * stride),
                read_at(data, 4 * stride),
                read_at(data, 5 * stride),
                read_at(data, 6 * stride),
                read_at(data, 7 * stride),
            )
        }
    }

    impl_SIMDMinMax!(i32, __m256i, LANE_SIZE, AVX2, "avx2");
    impl_SIMDStridedMinMax!(i32, __m256i, LANE_SIZE, AVX2, "avx2");

    // ------------------------------------ TESTS --------------------------------------

}

// --------------------------------------- AVX512 --------------------------------------

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(minmax_avx512)]
mod avx512 {
    use super::super::config::AVX512;
    use super::*;

    const LANE_SIZE: usize = AVX512::LANE_SIZE_32;

    impl SIMDOps<i32, __m512i, LANE_SIZE> for AVX512 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m512i) -> [i32; LANE_SIZE] {
            std::mem::transmute::<__m512i, [i32; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const i32) -> __m512i {
            _mm512_loadu_epi32(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m512i, b: __m512i) -> __m512i {
            _mm512_min_epi32(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m512i, b: __m512i) -> __m512i {
            _mm512_max_epi32(a, b)
        }
    }

    impl_SIMDMinMax!(i32, __m512i, LANE_SIZE, AVX512, "avx512f");

    // ------------------------------------ TESTS --------------------------------------

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::scalar::{ScalarMinMax, SCALAR};
        use crate::simd::test_utils::*;

        extern crate dev_utils;
        use dev_utils::utils;

        fn get_array_i32(n: usize) -> Vec<i32> {
            utils::get_random_array(n, i32::MIN, i32::MAX)
        }

        fn before_each() -> bool {
            is_x86_feature_detected!("avx512f")
        }

        #[test]
        fn test_both_versions_return_the_same_results() {
            if !before_each() {
                return;
            }
            test_long_array_minmax(get_array_i32, SCALAR::minmax, AVX512::minmax);
        }

        #[test]
        fn test_many_random_runs() {
            if !before_each() {
                return;
            }
            test_random_runs_minmax(get_array_i32, SCALAR::minmax, AVX512::minmax);
        }

        #[test]
        fn test_every_remainder() {
            if !before_each() {
                return;
            }
            test_every_remainder_minmax(get_array_i32, AVX512::minmax, LANE_SIZE);
            test_extremes_in_remainder_minmax(get_array_i32, AVX512::minmax, LANE_SIZE);
        }

        #[test]
        fn test_increasing_with_tail() {
            if !before_each() {
                return;
            }
            test_increasing_with_tail_minmax(|i| i as i32, AVX512::minmax, LANE_SIZE);
        }
    }
}

// ---------------------------------------- NEON ---------------------------------------

#[cfg(target_arch = "aarch64")]
mod neon {
    use super::super::config::NEON;
    use super::super::generic::_load_strided_lanes;
    use super::*;

    const LANE_SIZE: usize = NEON::LANE_SIZE_32;

    impl SIMDOps<i32, int32x4_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: int32x4_t) -> [i32; LANE_SIZE] {
            std::mem::transmute::<int32x4_t, [i32; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const i32) -> int32x4_t {
            vld1q_s32(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: int32x4_t, b: int32x4_t) -> int32x4_t {
            vminq_s32(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: int32x4_t, b: int32x4_t) -> int32x4_t {
            vmaxq_s32(a, b)
        }
    }

    impl SIMDStridedOps<i32, int32x4_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> int32x4_t {
            let lanes: [i32; LANE_SIZE] = _load_strided_lanes(data, stride);
            vld1q_s32(lanes.as_ptr())
        }
    }

    impl_SIMDMinMax!(i32, int32x4_t, LANE_SIZE, NEON, "neon");
    impl_SIMDStridedMinMax!(i32, int32x4_t, LANE_SIZE, NEON, "neon");

    // ------------------------------------ TESTS --------------------------------------

}
