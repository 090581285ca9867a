use nalgebra as na;
use tracing::{debug, trace};

use crate::{
    config::{Config, DepthOverflow},
    shapes::{Circle, Rect},
    util::determine_quadrant,
    Error, Point, Result, P2,
};

/// A point-region QuadTree for spatial indexing of 2D points.
///
/// Every node stores at most one item. The root is created on the first insert and
/// always covers the configured boundary, which never grows.
#[derive(Debug)]
pub struct QuadTree<T> {
    root: Option<Node<T>>,
    config: Config,
    len: usize,
}

impl<T: Point + Clone> Default for QuadTree<T> {
    fn default() -> Self {
        Self {
            root: None,
            config: Config::default(),
            len: 0,
        }
    }
}

impl<T: Point + Clone> QuadTree<T> {
    /// Create a new empty quadtree covering `boundary`, with the default depth limit
    pub fn new(boundary: Rect) -> Self {
        Self {
            config: Config::default().with_boundary(boundary),
            ..Self::default()
        }
    }

    /// Create a new empty quadtree from a validated [`Config`]
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root: None,
            config,
            len: 0,
        })
    }

    /// Build a tree over the default boundary by inserting `points` in order
    pub fn from_points<I: IntoIterator<Item = T>>(points: I) -> Self {
        points.into_iter().collect()
    }

    /// Insert a point into the quadtree
    ///
    /// **Returns** a boolean value indicating if the item was inserted successfully.
    /// Points outside the boundary, or refused by the depth limit, are dropped.
    pub fn insert(&mut self, item: &T) -> bool {
        match self.try_insert(item) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "dropping point");
                false
            }
        }
    }

    /// Insert a point into the quadtree, reporting why it was not stored
    pub fn try_insert(&mut self, item: &T) -> Result<()> {
        let config = &self.config;
        let root = self.root.get_or_insert_with(|| {
            debug!(boundary = ?config.boundary, "creating root node");
            Node::Empty {
                boundary: config.boundary,
            }
        });
        root.insert(item, 0, config)?;
        self.len += 1;
        Ok(())
    }

    /// Find the item held by the first leaf whose boundary contains `point`.
    ///
    /// This walks boundaries only: the returned item is whatever occupies the leaf
    /// covering `point`, which need not equal `point`.
    pub fn search(&self, point: &P2) -> Option<&T> {
        self.root.as_ref()?.search(point)
    }

    /// Collect the items of every node whose own boundary contains both corners of the
    /// query region.
    ///
    /// Traversal stops at the first node that fails this test, so items below it are
    /// skipped even when they lie inside the region. Items kept by subdivided nodes are
    /// reported too. The order of the results is unspecified.
    pub fn range_query(&self, top_left: &P2, bottom_right: &P2) -> Vec<T> {
        let mut results = Vec::new();
        if let Some(root) = &self.root {
            root.range_query(top_left, bottom_right, &mut results);
        }
        results
    }

    /// Nearest candidate to `center` among the [`range_query`](Self::range_query)
    /// results for the square `center ± radius`.
    ///
    /// **Returns** the item and its Euclidean distance, or `(None, f64::INFINITY)` when
    /// there are no candidates. Candidates in the corners of the square are not filtered
    /// out, so the returned distance may exceed `radius`.
    pub fn find_nearest_point_within_radius(&self, center: &P2, radius: f64) -> (Option<T>, f64) {
        let square = Circle::new(*center, radius).bounding_rect();
        let mut nearest = None;
        let mut min_distance = f64::INFINITY;

        for item in self.range_query(&square.top_left(), &square.bottom_right()) {
            let distance = na::distance(&item.point(), center);
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(item);
            }
        }

        (nearest, min_distance)
    }

    /// Range query candidates for the square around `center` that also lie within
    /// `radius` of it
    pub fn within_radius(&self, center: &P2, radius: f64) -> Vec<T> {
        let circle = Circle::new(*center, radius);
        let square = circle.bounding_rect();
        let mut results = self.range_query(&square.top_left(), &square.bottom_right());
        results.retain(|item| circle.contains(&item.point()));
        results
    }

    /// Number of items stored in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Depth of the deepest node, the root being at depth 0
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    /// Return the point at the center of the boundary
    pub fn center(&self) -> P2 {
        self.config.boundary.center()
    }

    /// Get the boundary rect of the quadtree
    pub fn boundary(&self) -> &Rect {
        &self.config.boundary
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<T: Point + Clone> FromIterator<T> for QuadTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut qt = Self::default();
        qt.extend(iter);
        qt
    }
}

impl<T: Point + Clone> Extend<T> for QuadTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(&item);
        }
    }
}

/// QuadTree node enum
///
/// ## Variants
/// - `Internal`: Subdivided area. `resident` is the item the node held before it split;
///   it is not moved into a child.
/// - `External`: Leaf holding one item. `collisions` is only filled in leaves at the
///   depth limit under [`DepthOverflow::Collide`].
/// - `Empty`: Leaf without any data.
#[derive(Debug)]
enum Node<T> {
    Internal {
        boundary: Rect,
        resident: T,
        children: [Box<Self>; 4],
    },
    External {
        boundary: Rect,
        resident: T,
        collisions: Vec<T>,
    },
    Empty {
        boundary: Rect,
    },
}

impl<T: Point + Clone> Node<T> {
    fn insert(&mut self, item: &T, depth: usize, config: &Config) -> Result<()> {
        let point = item.point();

        if !self.boundary().contains(&point) {
            return Err(Error::OutOfBounds {
                x: point.x,
                y: point.y,
            });
        }

        match self {
            &mut Self::Empty { boundary } => {
                *self = Self::External {
                    boundary,
                    resident: item.clone(),
                    collisions: Vec::new(),
                };
                return Ok(());
            }
            Self::External { collisions, .. } if config.is_depth_capped(depth) => {
                return match config.overflow {
                    DepthOverflow::Reject => Err(Error::DepthExceeded {
                        // capped implies a limit is set
                        max_depth: config.max_depth.unwrap_or(depth),
                    }),
                    DepthOverflow::Collide => {
                        collisions.push(item.clone());
                        Ok(())
                    }
                };
            }
            Self::External { .. } => {
                trace!(boundary = ?self.boundary(), depth, "subdividing node");
                self.subdivide();
            }
            Self::Internal { .. } => (),
        }

        match self {
            Self::Internal {
                boundary, children, ..
            } => match determine_quadrant(boundary, &point) {
                Some(q) => children[q].insert(item, depth + 1, config),
                None => Err(Error::OutOfBounds {
                    x: point.x,
                    y: point.y,
                }),
            },
            _ => Ok(()),
        }
    }

    fn search(&self, point: &P2) -> Option<&T> {
        match self {
            Self::External {
                boundary, resident, ..
            } if boundary.contains(point) => Some(resident),
            Self::Internal {
                boundary, children, ..
            } => match determine_quadrant(boundary, point) {
                Some(q) => children[q].search(point),
                None => None,
            },
            _ => None,
        }
    }

    fn range_query(&self, top_left: &P2, bottom_right: &P2, results: &mut Vec<T>) {
        if !self.boundary().contains_both(top_left, bottom_right) {
            return;
        }

        match self {
            Self::External {
                resident,
                collisions,
                ..
            } => {
                results.push(resident.clone());
                results.extend(collisions.iter().cloned());
            }
            Self::Internal {
                resident, children, ..
            } => {
                results.push(resident.clone());
                for child in children {
                    child.range_query(top_left, bottom_right, results);
                }
            }
            Self::Empty { .. } => (),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Internal { children, .. } => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    fn boundary(&self) -> &Rect {
        match self {
            Self::Empty { boundary } => boundary,
            Self::External { boundary, .. } => boundary,
            Self::Internal { boundary, .. } => boundary,
        }
    }

    /// Turn an occupied leaf into an internal node with four empty children.
    /// The resident item stays on this node.
    fn subdivide(&mut self) {
        if let Self::External {
            boundary, resident, ..
        } = self
        {
            let children = boundary
                .quarter()
                .map(|r| Box::new(Self::Empty { boundary: r }));
            let node = Self::Internal {
                boundary: *boundary,
                resident: resident.clone(),
                children,
            };
            *self = node;
        }
    }
}
