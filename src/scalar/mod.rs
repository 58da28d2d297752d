//! Scalar (pairwise) implementation of the minmax functions.

mod generic;
pub use generic::{ScalarMinMax, SCALAR};
