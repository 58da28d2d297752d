/// This module contains the structs that represent the SIMD instruction sets and a
/// trait that is used to get the lane size for a given datatype.
///
/// More info on SIMD:
/// https://github.com/rust-lang/portable-simd/blob/master/beginners-guide.md#target-features
///

/// SIMD instruction set trait - used to store the register size and get the lane size
/// for a given datatype
pub trait SIMDInstructionSet {
    /// The size of the register in bits
    const REGISTER_SIZE: usize;

    // Set the const lanesize for each datatype
    const LANE_SIZE_16: usize = Self::REGISTER_SIZE / (std::mem::size_of::<u16>() * 8);
    const LANE_SIZE_32: usize = Self::REGISTER_SIZE / (std::mem::size_of::<u32>() * 8);
    const LANE_SIZE_64: usize = Self::REGISTER_SIZE / (std::mem::size_of::<u64>() * 8);

    fn get_lane_size<DType>() -> usize {
        Self::REGISTER_SIZE / (std::mem::size_of::<DType>() * 8)
    }
}

// ----------------------------------- x86_64 / x86 ------------------------------------

/// AVX2 instruction set (256-bit registers) - this is implemented for:
/// - f32 and f64 (see simd_f32.rs and simd_f64.rs) - requires just AVX
/// - i16 and i32 (see simd_i16.rs and simd_i32.rs) - requires AVX2
///
/// This is also the register that is used for strided data.
pub struct AVX2;

impl SIMDInstructionSet for AVX2 {
    /// AVX(2) register size is 256 bits
    /// AVX:  https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#Advanced_Vector_Extensions
    /// AVX2: https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#AVX2
    const REGISTER_SIZE: usize = 256;
}

/// AVX512 instruction set (512-bit registers) - this is implemented for:
/// - f32, f64 and i32 - requires AVX512F
/// - i16 - requires AVX512BW
///
/// Only compiled with Rust 1.89 and above, or with the `nightly_simd` feature.
pub struct AVX512;

impl SIMDInstructionSet for AVX512 {
    /// AVX512 register size is 512 bits
    /// https://en.wikipedia.org/wiki/Advanced_Vector_Extensions#AVX-512
    const REGISTER_SIZE: usize = 512;
}

// -------------------------------------- aarch64 --------------------------------------

/// NEON instruction set (128-bit registers) - this is implemented (on aarch64) for
/// f32, f64, i16 and i32, both for contiguous and for strided data.
pub struct NEON;

impl SIMDInstructionSet for NEON {
    /// NEON register size is 128 bits
    /// https://en.wikipedia.org/wiki/ARM_architecture#Advanced_SIMD_(Neon)
    const REGISTER_SIZE: usize = 128;
}

// ======================================= TESTS =======================================
