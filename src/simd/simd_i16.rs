/// Implementation of the minmax operations for i16.
///
/// Integers have a total order, so the lane-wise min / max instructions give exactly
/// the result of the scalar comparisons.
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

    const LANE_SIZE: usize = AVX2::LANE_SIZE_16;

    impl SIMDOps<i16, __m256i, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m256i) -> [i16; LANE_SIZE] {
            std::mem::transmute::<__m256i, [i16; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const i16) -> __m256i {
            _mm256_loadu_si256(data as *const __m256i)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m256i, b: __m256i) -> __m256i {
            _mm256_min_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m256i, b: __m256i) -> __m256i {
            _mm256_max_epi16(a, b)
        }
    }

    impl SIMDStridedOps<i16, __m256i, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> __m256i {
            _mm256_set_epi16(
                read_at(data, 0),
                read_at(data, stride),
                read_at(data, 2 * stride),
                read_at(data, 3 * stride),
                read_at(data, 4 * stride),
                read_at(data, 5 * stride),
                read_at(data, 6 * stride),
                read_at(data, 7 * stride),
                read_at(data, 8 * stride),
                read_at(data, 9 * stride),
                read_at(data, 10 * stride),
                read_at(data, 11 * stride),
                read_at(data, 12 * stride),
                read_at(data, 13 * stride),
                read_at(data, 14 * stride),
                read_at(data, 15 * stride),
            )
        }
    }

    impl_SIMDMinMax!(i16, __m256i, LANE_SIZE, AVX2, "avx2");
    impl_SIMDStridedMinMax!(i16, __m256i, LANE_SIZE, AVX2, "avx2");

    // ------------------------------------ TESTS --------------------------------------

}

// --------------------------------------- AVX512 --------------------------------------

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(minmax_avx512)]
mod avx512 {
    use super::super::config::AVX512;
    use super::*;

    const LANE_SIZE: usize = AVX512::LANE_SIZE_16;

    impl SIMDOps<i16, __m512i, LANE_SIZE> for AVX512 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m512i) -> [i16; LANE_SIZE] {
            std::mem::transmute::<__m512i, [i16; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const i16) -> __m512i {
            _mm512_loadu_epi16(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m512i, b: __m512i) -> __m512i {
            _mm512_min_epi16(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m512i, b: __m512i) -> __m512i {
            _mm512_max_epi16(a, b)
        }
    }

    // 16-bit min / max are part of AVX512BW
    impl_SIMDMinMax!(i16, __m512i, LANE_SIZE, AVX512, "avx512bw");

    // ------------------------------------ TESTS --------------------------------------

}

// ---------------------------------------- NEON ---------------------------------------

#[cfg(target_arch = "aarch64")]
mod neon {
    use super::super::config::NEON;
    use super::super::generic::_load_strided_lanes;
    use super::*;

    const LANE_SIZE: usize = NEON::LANE_SIZE_16;

    impl SIMDOps<i16, int16x8_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: int16x8_t) -> [i16; LANE_SIZE] {
            std::mem::transmute::<int16x8_t, [i16; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const i16) -> int16x8_t {
            vld1q_s16(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: int16x8_t, b: int16x8_t) -> int16x8_t {
            vminq_s16(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: int16x8_t, b: int16x8_t) -> int16x8_t {
            vmaxq_s16(a, b)
        }
    }

    impl SIMDStridedOps<i16, int16x8_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> int16x8_t {
            let lanes: [i16; LANE_SIZE] = _load_strided_lanes(data, stride);
            vld1q_s16(lanes.as_ptr())
        }
    }

    impl_SIMDMinMax!(i16, int16x8_t, LANE_SIZE, NEON, "neon");
    impl_SIMDStridedMinMax!(i16, int16x8_t, LANE_SIZE, NEON, "neon");

    // ------------------------------------ TESTS --------------------------------------

}
