use crate::{shapes::Rect, P2};

/// Index of the first quarter of `rect` that contains `point`, checked in the order
/// top-left, top-right, bottom-left, bottom-right. Points on a shared edge go to
/// the earliest quarter that touches them.
pub(crate) fn determine_quadrant(rect: &Rect, point: &P2) -> Option<usize> {
    rect.quarter().iter().position(|q| q.contains(point))
}
