use nalgebra::{self as na, point, vector};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::P2;

/// Represents an axis-aligned rectangle defined by two points: the start and the end.
/// It is used to define boundaries for QuadTree nodes and provides utility functions
/// for geometric calculations.
///
/// `start` is the minimum corner and `end` the maximum corner. "Top" is the side with
/// the larger y value, so the top-left corner is `(start.x, end.y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    start: P2,
    center: P2,
    end: P2,
}

impl Rect {
    /// Create a new rect from any two opposite corners
    pub fn new(a: P2, b: P2) -> Self {
        let start = a.inf(&b);
        let end = a.sup(&b);
        Self {
            start,
            center: na::center(&start, &end),
            end,
        }
    }

    /// Get the start (minimum) point of the rect
    pub fn start(&self) -> P2 {
        self.start
    }

    /// Get the end (maximum) point of the rect
    pub fn end(&self) -> P2 {
        self.end
    }

    /// Get the center point of the rect
    pub fn center(&self) -> P2 {
        self.center
    }

    pub fn top_left(&self) -> P2 {
        point![self.start.x, self.end.y]
    }

    pub fn bottom_right(&self) -> P2 {
        point![self.end.x, self.start.y]
    }

    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    /// Check if a point exists within the rect, edges included
    pub fn contains(&self, point: &P2) -> bool {
        *point >= self.start && *point <= self.end
    }

    /// Check if both corners of a query region lie within the rect
    pub fn contains_both(&self, a: &P2, b: &P2) -> bool {
        self.contains(a) && self.contains(b)
    }

    /// Quarter the rect to produce four smaller rects, ordered
    /// top-left, top-right, bottom-left, bottom-right.
    ///
    /// Child corners are taken verbatim from the parent's corners and center, so
    /// the quarters tile the parent exactly and repeated calls agree bit for bit.
    pub fn quarter(&self) -> [Self; 4] {
        let &Rect { start, center, end } = self;

        [
            Rect::new(point![start.x, center.y], point![center.x, end.y]),
            Rect::new(center, end),
            Rect::new(start, center),
            Rect::new(point![center.x, start.y], point![end.x, center.y]),
        ]
    }
}

/// Represents a circle defined by a center point and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    center: P2,
    radius: f64,
    start: P2,
    end: P2,
}

impl Circle {
    /// Create a new circle with a center point and radius
    pub fn new(center: P2, radius: f64) -> Self {
        let v = vector![radius, radius];
        let start = center - v;
        let end = center + v;
        Self {
            center,
            radius,
            start,
            end,
        }
    }

    pub fn center(&self) -> P2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The square `center ± radius` circumscribing the circle
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(self.start, self.end)
    }

    /// Check if a point lies inside the circle or on its perimeter
    pub fn contains(&self, point: &P2) -> bool {
        na::distance(&self.center, point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use crate::util::tests::{make_circle, make_rect};
    use nalgebra::point;

    use super::*;

    #[test]
    fn rect_properties() {
        let rect = make_rect(0.0, 0.0, 10.0, 20.0);
        assert_eq!(rect.start(), point![0.0, 0.0], "Start should be at (0, 0)");
        assert_eq!(rect.end(), point![10.0, 20.0], "End should be at (10, 20)");
        assert_eq!(rect.center(), point![5.0, 10.0], "Center should be at (5, 10)");
        assert_eq!(rect.top_left(), point![0.0, 20.0], "Top is the larger y");
        assert_eq!(rect.bottom_right(), point![10.0, 0.0]);
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 20.0);
    }

    #[test]
    fn rect_normalizes_corners() {
        let from_top_left = Rect::new(point![0.0, 10.0], point![10.0, 0.0]);
        let from_start = make_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            from_top_left, from_start,
            "Opposite corners in any order should describe the same rect"
        );
    }

    #[test]
    fn rect_contains_point() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        assert!(
            rect.contains(&point![5.0, 5.0]),
            "Rect should contain point (5.0, 5.0)"
        );
        assert!(
            !rect.contains(&point![-1.0, 5.0]),
            "Rect should not contain point (-1.0, 5.0)"
        );
        assert!(
            !rect.contains(&point![5.0, 10.5]),
            "Rect should not contain point (5.0, 10.5)"
        );
        assert!(
            rect.contains(&point![0.0, 0.0]),
            "Rect should contain its start point (0.0, 0.0)"
        );
        assert!(
            rect.contains(&point![10.0, 0.0]),
            "Rect should contain its bottom-right corner"
        );
        assert!(
            rect.contains(&point![10.0, 10.0]),
            "Rect should contain its end point (10.0, 10.0)"
        );
    }

    #[test]
    fn rect_contains_both_corners() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_both(&point![1.0, 9.0], &point![9.0, 1.0]));
        assert!(
            !rect.contains_both(&point![1.0, 9.0], &point![11.0, 1.0]),
            "A single corner outside fails the gate"
        );
    }

    #[test]
    fn quartering_rect() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        let quarters = rect.quarter();
        assert_eq!(
            quarters[0],
            make_rect(0.0, 5.0, 5.0, 10.0),
            "Top-left quarter should match expected dimensions"
        );
        assert_eq!(
            quarters[1],
            make_rect(5.0, 5.0, 10.0, 10.0),
            "Top-right quarter should match expected dimensions"
        );
        assert_eq!(
            quarters[2],
            make_rect(0.0, 0.0, 5.0, 5.0),
            "Bottom-left quarter should match expected dimensions"
        );
        assert_eq!(
            quarters[3],
            make_rect(5.0, 0.0, 10.0, 5.0),
            "Bottom-right quarter should match expected dimensions"
        );
    }

    #[test]
    fn quarters_reconstruct_parent() {
        let rect = make_rect(0.3, 1.7, 97.1, 13.9);
        let [tl, tr, bl, br] = rect.quarter();

        assert_eq!(tl.top_left(), rect.top_left());
        assert_eq!(tr.end(), rect.end());
        assert_eq!(bl.start(), rect.start());
        assert_eq!(br.bottom_right(), rect.bottom_right());

        // shared edges meet exactly at the parent's center
        for q in [tl, tr, bl, br] {
            assert!(q.contains(&rect.center()), "Every quarter touches the center");
        }
        assert_eq!(tl.end().x, tr.start().x);
        assert_eq!(bl.end().y, tl.start().y);
        assert_eq!(br.start().x, bl.end().x);

        let area: f64 = [tl, tr, bl, br].iter().map(|q| q.width() * q.height()).sum();
        assert!((area - rect.width() * rect.height()).abs() < 1e-9);
    }

    #[test]
    fn quartering_is_deterministic() {
        let rect = make_rect(0.1, 0.2, 33.3, 66.7);
        let first = rect.quarter();
        for _ in 0..10 {
            assert_eq!(rect.quarter(), first, "Repeated quartering should not drift");
        }
        assert_eq!(
            first[0].quarter(),
            rect.quarter()[0].quarter(),
            "Nested quartering should not drift either"
        );
    }

    #[test]
    fn circle_properties_and_bounds() {
        let circle = make_circle(20.0, 20.0, 15.0);
        assert_eq!(circle.center(), point![20.0, 20.0]);
        assert_eq!(circle.radius(), 15.0, "Radius should be 15.0");
        let bounds = circle.bounding_rect();
        assert_eq!(bounds.top_left(), point![5.0, 35.0]);
        assert_eq!(bounds.bottom_right(), point![35.0, 5.0]);
    }

    #[test]
    fn circle_contains_point() {
        let circle = make_circle(5.0, 5.0, 5.0);
        assert!(
            circle.contains(&point![5.0, 5.0]),
            "Circle should contain its center point"
        );
        assert!(
            circle.contains(&point![0.0, 5.0]),
            "Circle should contain point on its perimeter"
        );
        assert!(
            !circle.contains(&point![0.0, 0.0]),
            "Circle should not contain the corners of its bounding square"
        );
    }
}
