//! 2D segment and polygon primitives
//!
//! Everything here is a pure function over `Vec2`. Comparisons against zero are
//! exact: the collision modes feed these sprite-sized boxes and bullet paths,
//! and colinear cases are resolved through `on_segment` rather than tolerances.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// 2D cross product (z component of the 3D cross)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x - b.x, a.y - b.y)
}

/// Orientation of the triple (p, q, r) in a y-up frame
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val == 0.0 {
        Orientation::Colinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` lies inside the bounding box of segment `p`-`r`.
///
/// Only meaningful once the caller knows the three points are colinear.
pub fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segment `p1`-`q1` touches segment `p2`-`q2`, including colinear overlap
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // General case: each segment straddles the other's line
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Colinear cases: an endpoint of one lies on the other
    (o1 == Orientation::Colinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Colinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Colinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Colinear && on_segment(p2, q1, q2))
}

/// Ray-casting point-in-polygon test.
///
/// A horizontal ray runs from `point` towards +x. An edge counts as a crossing
/// only if it straddles the ray under the half-open rule `(a.y > p.y) != (b.y > p.y)`,
/// so a ray through a shared vertex is counted once. A point on an edge counts
/// as inside. Polygons with fewer than three vertices contain nothing.
pub fn point_in_polygon(polygon: &[Vec2], point: Vec2) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];

        if orientation(a, point, b) == Orientation::Colinear && on_segment(a, point, b) {
            return true;
        }

        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }
    }

    inside
}

/// Whether the path `from`→`to` crosses any edge of `polygon` this tick.
///
/// Each edge `a + t·(b - a)` is solved against `from + u·(to - from)`; a hit
/// needs both parameters in `[0, 1]`. Parallel pairs fall back to the
/// orientation test so colinear overlap still counts.
pub fn segment_hits_polygon(polygon: &[Vec2], from: Vec2, to: Vec2) -> bool {
    let n = polygon.len();
    if n < 2 {
        return false;
    }

    let s = subtract(to, from);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let r = subtract(b, a);

        let denom = cross(r, s);
        if denom == 0.0 {
            if segments_intersect(a, b, from, to) {
                return true;
            }
            continue;
        }

        let offset = subtract(from, a);
        let t = cross(offset, s) / denom;
        let u = cross(offset, r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            return true;
        }
    }

    false
}

/// Axis-aligned rectangle in play field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Inclusive containment
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Corners in winding order, usable as a polygon
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}
