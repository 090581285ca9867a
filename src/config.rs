use nalgebra::point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{shapes::Rect, Error, Result};

/// Subdivision depth used by [`Config::default`]
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What happens when a point lands in an occupied leaf that is already at the
/// maximum depth
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DepthOverflow {
    /// Refuse the insert with [`Error::DepthExceeded`]
    #[default]
    Reject,
    /// Keep the point in the capped leaf next to its resident point
    Collide,
}

/// Construction parameters for a [`QuadTree`](crate::QuadTree)
///
/// ## Fields
/// - `boundary`: The fixed extent of the tree. Points outside it are never stored.
/// - `max_depth`: The deepest level a node may be created at, the root being level 0.
///   `None` lets the tree subdivide without limit.
/// - `overflow`: Policy for collisions in leaves at `max_depth`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub boundary: Rect,
    pub max_depth: Option<usize>,
    pub overflow: DepthOverflow,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boundary: Rect::new(point![0.0, 0.0], point![100.0, 100.0]),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            overflow: DepthOverflow::default(),
        }
    }
}

impl Config {
    pub fn with_boundary(mut self, boundary: Rect) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_overflow(mut self, overflow: DepthOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Check that the boundary is finite and has a non-zero area
    pub fn validate(&self) -> Result<()> {
        let Self { boundary, .. } = self;
        let corners = [boundary.start(), boundary.end()];
        if corners.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(Error::InvalidBoundary(format!(
                "corners must be finite, got {:?} to {:?}",
                corners[0], corners[1]
            )));
        }
        if boundary.width() <= 0.0 || boundary.height() <= 0.0 {
            return Err(Error::InvalidBoundary(format!(
                "boundary must have a non-zero area, got {} x {}",
                boundary.width(),
                boundary.height()
            )));
        }
        Ok(())
    }

    /// Whether a node at `depth` is too deep to subdivide
    pub(crate) fn is_depth_capped(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }
}
