//! Errors reported by the safe entry points.
//!
//! The reductions themselves never fail; only the construction of views over
//! borrowed data is validated.

use thiserror::Error;

/// Errors that can occur when describing the sequence to reduce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinMaxError {
    /// A step of zero only makes sense for views of at most one element.
    #[error("a zero step is invalid for a view of {len} elements")]
    ZeroStep {
        /// The requested number of elements.
        len: usize,
    },
    /// The view addresses elements outside of the borrowed data.
    #[error(
        "a view of {len} elements with step {step} starting at offset {offset} \
         does not fit in {available} elements"
    )]
    OutOfBounds {
        offset: usize,
        len: usize,
        step: isize,
        available: usize,
    },
    /// The data is too short for the requested matrix shape.
    #[error("shape ({rows}, {cols}) does not fit in {available} elements")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = MinMaxError::ZeroStep { len: 3 };
        assert_eq!(err.to_string(), "a zero step is invalid for a view of 3 elements");

        let err = MinMaxError::OutOfBounds {
            offset: 1,
            len: 4,
            step: 2,
            available: 6,
        };
        assert_eq!(
            err.to_string(),
            "a view of 4 elements with step 2 starting at offset 1 does not fit in 6 elements"
        );

        let err = MinMaxError::ShapeMismatch {
            rows: 2,
            cols: 3,
            available: 5,
        };
        assert_eq!(err.to_string(), "shape (2, 3) does not fit in 5 elements");
    }
}
