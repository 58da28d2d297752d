mod config;
pub use config::*;
mod generic;
pub use generic::*;
#[cfg(test)]
mod test_utils;
// FLOAT
#[cfg(feature = "float")]
mod simd_f32;
#[cfg(feature = "float")]
mod simd_f64;
// SIGNED INT
mod simd_i16;
mod simd_i32;
