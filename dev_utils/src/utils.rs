use std::ops::{Add, Sub};

use rand::distr::uniform::SampleUniform;
use rand::distr::Uniform;
use rand::{rng, Rng};

// worst case array for the pairwise loop: alternates between a decreasing min and an
// increasing max, so every pair updates both bounds
pub fn get_worst_case_array<T>(n: usize, step: T) -> Vec<T>
where
    T: Copy + Default + Sub<Output = T> + Add<Output = T>,
{
    let mut arr: Vec<T> = Vec::with_capacity(n);
    let mut min_value: T = Default::default();
    let mut max_value: T = Default::default();
    for i in 0..n {
        if i % 2 == 0 {
            arr.push(min_value);
            min_value = min_value - step;
        } else {
            arr.push(max_value);
            max_value = max_value + step;
        }
    }
    arr
}

// random array that samples uniformly between low and high (inclusive)
pub fn get_random_array<T>(n: usize, low: T, high: T) -> Vec<T>
where
    T: Copy + SampleUniform,
{
    let rng = rng();
    let uni = Uniform::new_inclusive(low, high).unwrap();
    rng.sample_iter(uni).take(n).collect()
}

// the reference: two separate passes, one for the min and one for the max
pub fn naive_minmax<T: Copy + PartialOrd>(data: &[T]) -> (T, T) {
    assert!(!data.is_empty());
    let mut min = data[0];
    for &v in data {
        if v < min {
            min = v;
        }
    }
    let mut max = data[0];
    for &v in data {
        if v > max {
            max = v;
        }
    }
    (min, max)
}

pub trait SampleUniformFullRange: Sized {
    // random array that samples over the full range of Self
    fn get_random_array(n: usize) -> Vec<Self>;
}

macro_rules! impl_full_range_uniform {
    ($($t:ty),*) => {
        $(
            impl SampleUniformFullRange for $t {
                fn get_random_array(n: usize) -> Vec<Self> {
                    get_random_array(n, <$t>::MIN, <$t>::MAX)
                }
            }
        )*
    };
}

// Uniform::new_inclusive(MIN, MAX) overflows for floats, so random bit patterns are
// used instead (NaNs are replaced with 0.0)
macro_rules! impl_full_range_uniform_float {
    ($($t:ty, $t_bits:ty),*) => {
        $(
            impl SampleUniformFullRange for $t {
                fn get_random_array(n: usize) -> Vec<Self> {
                    let mut rng = rng();
                    (0..n)
                        .map(|_| <$t>::from_bits(rng.random::<$t_bits>()))
                        .map(|x| if x.is_nan() { 0.0 } else { x })
                        .collect()
                }
            }
        )*
    };
}

impl_full_range_uniform!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_full_range_uniform_float!(f32, u32, f64, u64);
