//! A point-region quadtree.
//!
//! Every node covers an axis-aligned [`Rect`] and stores at most one item. The
//! second item that lands in an occupied leaf splits it into four quadrants.
//! The tree answers point lookups, rectangle containment queries and
//! nearest-within-radius searches.
//!
//! ```
//! use nalgebra::point;
//! use prquadtree::QuadTree;
//!
//! let qt = QuadTree::from_points([point![10.0, 20.0], point![5.0, 15.0]]);
//! let (nearest, distance) = qt.find_nearest_point_within_radius(&point![20.0, 20.0], 15.0);
//! assert_eq!(nearest, Some(point![10.0, 20.0]));
//! assert_eq!(distance, 10.0);
//! ```

use nalgebra::Point2;

mod config;
mod error;
mod quadtree;
mod shapes;
mod util;

pub use config::{Config, DepthOverflow, DEFAULT_MAX_DEPTH};
pub use error::{Error, Result};
pub use quadtree::QuadTree;
pub use shapes::{Circle, Rect};

/// 2d point with `f64` coordinates
pub type P2 = Point2<f64>;

/// Trait for getting a 2d point position of data stored in the [`QuadTree`]
pub trait Point {
    /// Get 2d point position
    fn point(&self) -> P2;
}

impl Point for P2 {
    fn point(&self) -> P2 {
        *self
    }
}
