// Array lengths used by the benchmarks

pub const ARRAY_LENGTH_SHORT: usize = 1_000;
pub const ARRAY_LENGTH_LONG: usize = 1_000_000;

// Element steps used by the strided benchmarks (1 is contiguous)
pub const STEPS: [usize; 4] = [1, 2, 3, 8];
