/// Implementation of the minmax operations for f32.
///
/// The running min and max registers are updated with the ordered min / max
/// instructions; NaN handling is whatever those instructions do (on x86 the second
/// operand is returned when either operand is NaN).
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

    impl SIMDOps<f32, __m256, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m256) -> [f32; LANE_SIZE] {
            std::mem::transmute::<__m256, [f32; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const f32) -> __m256 {
            _mm256_loadu_ps(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m256, b: __m256) -> __m256 {
            _mm256_min_ps(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m256, b: __m256) -> __m256 {
            _mm256_max_ps(a, b)
        }
    }

    impl SIMDStridedOps<f32, __m256, LANE_SIZE> for AVX2 {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> __m256 {
            // This is faster than _mm256_i32gather_ps on the tested platforms
            _mm256_set_ps(
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

    // Requires just AVX (and thus not necessarily AVX2)
    impl_SIMDMinMax!(f32, __m256, LANE_SIZE, AVX2, "avx");
    impl_SIMDStridedMinMax!(f32, __m256, LANE_SIZE, AVX2, "avx");

    // ------------------------------------ TESTS --------------------------------------

}

// --------------------------------------- AVX512 --------------------------------------

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[cfg(minmax_avx512)]
mod avx512 {
    use super::super::config::AVX512;
    use super::*;

    const LANE_SIZE: usize = AVX512::LANE_SIZE_32;

    impl SIMDOps<f32, __m512, LANE_SIZE> for AVX512 {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: __m512) -> [f32; LANE_SIZE] {
            std::mem::transmute::<__m512, [f32; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const f32) -> __m512 {
            _mm512_loadu_ps(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: __m512, b: __m512) -> __m512 {
            _mm512_min_ps(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: __m512, b: __m512) -> __m512 {
            _mm512_max_ps(a, b)
        }
    }

    impl_SIMDMinMax!(f32, __m512, LANE_SIZE, AVX512, "avx512f");

    // ------------------------------------ TESTS --------------------------------------

}

// ---------------------------------------- NEON ---------------------------------------

#[cfg(target_arch = "aarch64")]
mod neon {
    use super::super::config::NEON;
    use super::super::generic::_load_strided_lanes;
    use super::*;

    const LANE_SIZE: usize = NEON::LANE_SIZE_32;

    impl SIMDOps<f32, float32x4_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _reg_to_arr(reg: float32x4_t) -> [f32; LANE_SIZE] {
            std::mem::transmute::<float32x4_t, [f32; LANE_SIZE]>(reg)
        }

        #[inline(always)]
        unsafe fn _mm_loadu(data: *const f32) -> float32x4_t {
            vld1q_f32(data)
        }

        #[inline(always)]
        unsafe fn _mm_min(a: float32x4_t, b: float32x4_t) -> float32x4_t {
            vminq_f32(a, b)
        }

        #[inline(always)]
        unsafe fn _mm_max(a: float32x4_t, b: float32x4_t) -> float32x4_t {
            vmaxq_f32(a, b)
        }
    }

    impl SIMDStridedOps<f32, float32x4_t, LANE_SIZE> for NEON {
        #[inline(always)]
        unsafe fn _mm_load_strided(data: *const u8, stride: usize) -> float32x4_t {
            let lanes: [f32; LANE_SIZE] = _load_strided_lanes(data, stride);
            vld1q_f32(lanes.as_ptr())
        }
    }

    impl_SIMDMinMax!(f32, float32x4_t, LANE_SIZE, NEON, "neon");
    impl_SIMDStridedMinMax!(f32, float32x4_t, LANE_SIZE, NEON, "neon");

    // ------------------------------------ TESTS --------------------------------------

}
