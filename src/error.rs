use thiserror::Error;

/// Reasons a point could not be stored in the [`QuadTree`](crate::QuadTree)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("point ({x}, {y}) lies outside the tree boundary")]
    OutOfBounds { x: f64, y: f64 },

    #[error("node at maximum depth {max_depth} cannot subdivide")]
    DepthExceeded { max_depth: usize },

    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),
}

pub type Result<T> = std::result::Result<T, Error>;
