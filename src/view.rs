//! A validated strided view over borrowed data.

use std::mem::size_of;

use crate::capabilities::{capabilities, Capabilities};
use crate::dispatch::{minmax_strided_with, MinMaxDispatch};
use crate::dtype::{empty_result, MinMaxDType};
use crate::error::MinMaxError;

/// Every `step`-th element of a slice, starting at `offset`.
///
/// The step is counted in elements and may be negative, in which case the view
/// walks backwards from `offset`. All addressed elements are checked to lie
/// inside the slice when the view is built.
///
/// ```
/// use minmax::StridedView;
///
/// let data = [3, 1, 4, 1, 5, 9, 2, 6];
/// let view = StridedView::new(&data, 1, 4, 2).unwrap(); // 1, 1, 9, 6
/// assert_eq!(view.minmax(), (1, 9));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StridedView<'a, T> {
    data: &'a [T],
    offset: usize,
    len: usize,
    step: isize,
}

impl<'a, T: MinMaxDType> StridedView<'a, T> {
    /// View `len` elements of `data`, `step` elements apart, starting at `offset`.
    ///
    /// The step of a view with at most one element is never used and is stored as 1.
    pub fn new(data: &'a [T], offset: usize, len: usize, step: isize) -> Result<Self, MinMaxError> {
        if len == 0 {
            return Ok(StridedView {
                data,
                offset: 0,
                len,
                step: 1,
            });
        }
        if step == 0 && len > 1 {
            return Err(MinMaxError::ZeroStep { len });
        }
        let out_of_bounds = MinMaxError::OutOfBounds {
            offset,
            len,
            step,
            available: data.len(),
        };
        if offset >= data.len() {
            return Err(out_of_bounds);
        }
        // Index of the last addressed element
        let last = isize::try_from(len - 1)
            .ok()
            .and_then(|n| n.checked_mul(step))
            .and_then(|delta| (offset as isize).checked_add(delta));
        match last {
            Some(last) if last >= 0 && (last as usize) < data.len() => Ok(StridedView {
                data,
                offset,
                len,
                step: if len == 1 { 1 } else { step },
            }),
            _ => Err(out_of_bounds),
        }
    }

    /// View all elements of `data`, front to back.
    pub fn contiguous(data: &'a [T]) -> Self {
        StridedView {
            data,
            offset: 0,
            len: data.len(),
            step: 1,
        }
    }

    /// View all elements of `data`, back to front.
    pub fn reversed(data: &'a [T]) -> Self {
        StridedView {
            data,
            offset: data.len().saturating_sub(1),
            len: data.len(),
            step: -1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The distance in bytes between two consecutive elements of the view.
    pub fn stride_bytes(&self) -> isize {
        self.step * size_of::<T>() as isize
    }

    /// The `i`-th element of the view.
    pub fn get(&self, i: usize) -> Option<T> {
        if i >= self.len {
            return None;
        }
        // In bounds, as checked at construction
        let index = self.offset as isize + i as isize * self.step;
        Some(self.data[index as usize])
    }

    /// Iterate over the elements of the view.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

impl<'a, T: MinMaxDispatch> StridedView<'a, T> {
    /// Get the minimum and maximum value of the view.
    pub fn minmax(&self) -> (T, T) {
        self.minmax_with(capabilities())
    }

    /// Get the minimum and maximum value of the view, using only the extensions in
    /// `caps`.
    pub fn minmax_with(&self, caps: &Capabilities) -> (T, T) {
        if self.is_empty() {
            return empty_result();
        }
        let first = &self.data[self.offset] as *const T;
        unsafe { minmax_strided_with(caps, first, self.len, self.stride_bytes()) }
    }
}
