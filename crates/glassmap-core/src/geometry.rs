use serde::{Deserialize, Serialize};

/// A 2D point in substrate coordinates. Unit-agnostic: callers keep both
/// sides of a geometric test on the same grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Cross product of (b - a) x (c - a). Sign gives the turn direction.
fn cross(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether `p` lies on the closed segment [a, b].
fn point_on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    if cross(a, b, p) != 0.0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Whether the closed segments [a1, a2] and [b1, b2] share any point.
/// Touching endpoints and collinear overlap both count.
pub fn segments_intersect(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    point_on_segment(a1, b1, b2)
        || point_on_segment(a2, b1, b2)
        || point_on_segment(b1, a1, a2)
        || point_on_segment(b2, a1, a2)
}

/// A closed polygon ring. The vertex list always ends with a copy of the
/// first vertex, so edges are consecutive vertex pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build a closed ring from a vertex sequence, appending the first
    /// vertex if the sequence is open. No simplicity validation: a
    /// self-intersecting ring yields undefined (but non-panicking) test
    /// results, which is the layout-data quality contract.
    pub fn closed(mut vertices: Vec<Point>) -> Self {
        if vertices.first() != vertices.last() {
            if let Some(&first) = vertices.first() {
                vertices.push(first);
            }
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&self.vertices)
    }

    fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.vertices.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Whether `p` lies on the ring itself.
    pub fn on_boundary(&self, p: &Point) -> bool {
        self.edges().any(|(a, b)| point_on_segment(p, a, b))
    }

    /// Ray-cast parity of `p` against the ring, ignoring boundary cases.
    /// Half-open edge rule so shared vertices are not double-counted.
    fn ray_cast(&self, p: &Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y <= p.y && b.y > p.y) || (b.y <= p.y && a.y > p.y) {
                let x_int = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x_int > p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Boundary-inclusive containment.
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.vertices.len() < 4 {
            return false;
        }
        self.on_boundary(p) || self.ray_cast(p)
    }

    /// Boundary-exclusive ("strictly within") containment.
    pub fn contains_point_strict(&self, p: &Point) -> bool {
        if self.vertices.len() < 4 {
            return false;
        }
        !self.on_boundary(p) && self.ray_cast(p)
    }

    /// Whether an open polyline shares any point with this polygon
    /// (interior or boundary).
    pub fn intersects_polyline(&self, points: &[Point]) -> bool {
        if self.vertices.len() < 4 || points.is_empty() {
            return false;
        }
        // A polyline entirely inside the polygon crosses no edge; any one
        // vertex inside settles it.
        if points.iter().any(|p| self.contains_point(p)) {
            return true;
        }
        points.windows(2).any(|w| {
            self.edges()
                .any(|(a, b)| segments_intersect(&w[0], &w[1], a, b))
        })
    }

    /// Whether two filled polygons share any point (interior or boundary).
    pub fn intersects_polygon(&self, other: &Polygon) -> bool {
        if self.vertices.len() < 4 || other.vertices.len() < 4 {
            return false;
        }
        if let (Some(a), Some(b)) = (self.bbox(), other.bbox()) {
            if !a.intersects(&b) {
                return false;
            }
        }
        // Containment either way, or any crossing edge pair.
        if other.vertices.iter().any(|p| self.contains_point(p)) {
            return true;
        }
        if self.vertices.iter().any(|p| other.contains_point(p)) {
            return true;
        }
        self.edges().any(|(a1, a2)| {
            other
                .edges()
                .any(|(b1, b2)| segments_intersect(a1, a2, b1, b2))
        })
    }
}
