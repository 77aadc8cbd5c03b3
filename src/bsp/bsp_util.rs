// src/bsp/bsp_util.rs
// Fixed-point arithmetic and bounding boxes shared by the BSP index.

use serde::Serialize;

/// 16.16 fixed-point value.
pub type Fixed = i32;

pub const FRACBITS: u32 = 16;
pub const FRACUNIT: Fixed = 1 << FRACBITS;

/// Multiplies two 16.16 values, keeping the result in 16.16.
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    ((a as i64 * b as i64) >> FRACBITS) as Fixed
}

/// Widens a 16-bit record field to fixed point.
pub fn from_raw(value: i16) -> Fixed {
    (value as Fixed) << FRACBITS
}

/// Converts map units to fixed point, saturating to the range a WAD can
/// store so far-away points cannot wrap around to the other side.
pub fn to_fixed(units: i32) -> Fixed {
    units.clamp(i16::MIN as i32, i16::MAX as i32) << FRACBITS
}

/// An axis-aligned box, inclusive on every edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Smallest box holding every point, or `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut points = points.into_iter();
        let (x, y) = points.next()?;
        let mut bbox = BoundingBox::new(x, y, x, y);
        for (x, y) in points {
            bbox.expand_point(x, y);
        }
        Some(bbox)
    }

    /// Decodes a node child box stored as `[top, bottom, left, right]`.
    pub fn from_node_box(raw: &[i16; 4]) -> Self {
        BoundingBox {
            min_x: from_raw(raw[2]),
            min_y: from_raw(raw[1]),
            max_x: from_raw(raw[3]),
            max_y: from_raw(raw[0]),
        }
    }

    pub fn expand_point(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn area(&self) -> i64 {
        (self.max_x as i64 - self.min_x as i64) * (self.max_y as i64 - self.min_y as i64)
    }

    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_mul() {
        assert_eq!(fixed_mul(FRACUNIT, FRACUNIT), FRACUNIT);
        assert_eq!(fixed_mul(3 * FRACUNIT, FRACUNIT / 2), 3 * FRACUNIT / 2);
        assert_eq!(fixed_mul(-2 * FRACUNIT, 5 * FRACUNIT), -10 * FRACUNIT);
    }

    #[test]
    fn test_to_fixed_saturates() {
        assert_eq!(to_fixed(32), 32 << 16);
        assert_eq!(to_fixed(-5), -5 << 16);
        assert_eq!(to_fixed(100_000), (i16::MAX as i32) << 16);
        assert_eq!(to_fixed(-100_000), (i16::MIN as i32) << 16);
    }

    #[test]
    fn test_bbox_from_points() {
        assert_eq!(BoundingBox::from_points(Vec::new()), None);
        let bbox = BoundingBox::from_points(vec![(3, -1), (-7, 4), (0, 9)]).unwrap();
        assert_eq!(bbox.as_tuple(), (-7, -1, 3, 9));
        assert_eq!(bbox.area(), 10 * 10);
        assert!(bbox.contains_point(3, 9));
        assert!(!bbox.contains_point(4, 0));
    }

    #[test]
    fn test_node_box_order() {
        let bbox = BoundingBox::from_node_box(&[64, 0, -32, 16]);
        assert_eq!(bbox.as_tuple(), (-32 << 16, 0, 16 << 16, 64 << 16));
    }
}
