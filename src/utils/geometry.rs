// src/utils/geometry.rs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Z component of `(a - self) x (b - self)`.
    pub fn cross(&self, a: &Point2D, b: &Point2D) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}

/// Unsigned area of a triangle.
pub fn triangle_area(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    a.cross(b, c).abs() / 2.0
}

/// Unsigned shoelace area of a closed ring (last point joins the first).
pub fn shoelace_area(ring: &[Point2D]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let p = &ring[i];
            let q = &ring[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice.abs() / 2.0
}

/// True if `p` lies inside the triangle or on its edges, in either winding.
pub fn point_in_triangle(p: &Point2D, a: &Point2D, b: &Point2D, c: &Point2D) -> bool {
    let d1 = a.cross(b, p);
    let d2 = b.cross(c, p);
    let d3 = c.cross(a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
