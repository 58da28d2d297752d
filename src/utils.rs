// ------ Raw (byte addressed) reads

/// Read the element that lives `offset` bytes past `data`.
///
/// Strided views are byte addressed, so the element is not guaranteed to be
/// aligned to its type: an unaligned read is used.
#[inline(always)]
pub(crate) unsafe fn read_at<T: Copy>(data: *const u8, offset: usize) -> T {
    data.add(offset).cast::<T>().read_unaligned()
}

// ------ Horizontal reduction

// Note: the lanes of the min register and the lanes of the max register are folded
// separately, as each register only holds meaningful values for its own bound.

/// Fold the lanes of a min and a max register (spilled to arrays) into a single
/// (min, max) pair, starting from `init`.
///
/// When `init` is `None` the fold is seeded with lane 0, so the result is always
/// one of the lane values.
#[inline(always)]
pub(crate) fn fold_lanes<T: Copy + PartialOrd>(
    min_lanes: &[T],
    max_lanes: &[T],
    init: Option<(T, T)>,
) -> (T, T) {
    assert_eq!(min_lanes.len(), max_lanes.len());
    let (mut low, mut high) = init.unwrap_or((min_lanes[0], max_lanes[0]));
    for i in 0..min_lanes.len() {
        if min_lanes[i] < low {
            low = min_lanes[i];
        }
        if max_lanes[i] > high {
            high = max_lanes[i];
        }
    }
    (low, high)
}
