// src/polygon/triangulate.rs

use serde::Serialize;

use crate::map::Vertex;
use crate::polygon::WallLoop;
use crate::utils::geometry::{point_in_triangle, triangle_area, Point2D};

/// The derived polygon of one sector: its wall loops (outer boundary first)
/// and a triangulation indexing into the map's vertices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectorMesh {
    pub(crate) loops: Vec<Vec<u32>>,
    pub(crate) triangles: Vec<[u32; 3]>,
    pub(crate) ambiguous_vertices: usize,
}

impl SectorMesh {
    /// Vertex loops, outer boundary first, holes after.
    pub fn loops(&self) -> &[Vec<u32>] {
        &self.loops
    }

    /// Triangles as map vertex indices.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Vertices that start more than one wall of this sector.
    pub fn ambiguous_vertices(&self) -> usize {
        self.ambiguous_vertices
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Sum of the triangle areas, in square map units.
    pub fn area(&self, vertices: &[Vertex]) -> f64 {
        self.points(vertices)
            .map(|[a, b, c]| triangle_area(&a, &b, &c))
            .sum()
    }

    /// True if the point is inside (or on the edge of) any triangle.
    pub fn contains(&self, vertices: &[Vertex], x: f64, y: f64) -> bool {
        let p = Point2D::new(x, y);
        self.points(vertices)
            .any(|[a, b, c]| point_in_triangle(&p, &a, &b, &c))
    }

    fn points<'a>(&'a self, vertices: &'a [Vertex]) -> impl Iterator<Item = [Point2D; 3]> + 'a {
        self.triangles.iter().filter_map(move |triangle| {
            let mut points = [Point2D::new(0.0, 0.0); 3];
            for (point, &index) in points.iter_mut().zip(triangle) {
                let v = vertices.get(index as usize)?;
                *point = Point2D::new(v.raw_x as f64, v.raw_y as f64);
            }
            Some(points)
        })
    }
}

/// Ear-cuts the loops (first is the outer boundary, the rest are holes).
///
/// Returns triangles as map vertex indices, or `None` if earcut rejected
/// the input.
pub fn triangulate(loops: &[WallLoop], vertices: &[Vertex]) -> Option<Vec<[u32; 3]>> {
    let total: usize = loops.iter().map(|l| l.vertices.len()).sum();
    let mut coords = Vec::with_capacity(total * 2);
    let mut flat = Vec::with_capacity(total);
    let mut holes = Vec::with_capacity(loops.len().saturating_sub(1));

    for (index, wall_loop) in loops.iter().enumerate() {
        if index > 0 {
            holes.push(flat.len());
        }
        for &v in &wall_loop.vertices {
            let vertex = vertices.get(v)?;
            coords.push(vertex.raw_x as f64);
            coords.push(vertex.raw_y as f64);
            flat.push(v as u32);
        }
    }
    if flat.len() < 3 {
        return Some(Vec::new());
    }

    let indices = earcutr::earcut(&coords, &holes, 2).ok()?;
    Some(
        indices
            .chunks_exact(3)
            .map(|tri| [flat[tri[0]], flat[tri[1]], flat[tri[2]]])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::geometry::shoelace_area;
    use assert_approx_eq::assert_approx_eq;

    fn closed(vertices: Vec<usize>) -> WallLoop {
        WallLoop { vertices, closed: true }
    }

    fn mesh(loops: &[WallLoop], vertices: &[Vertex]) -> SectorMesh {
        SectorMesh {
            loops: loops
                .iter()
                .map(|l| l.vertices.iter().map(|&v| v as u32).collect())
                .collect(),
            triangles: triangulate(loops, vertices).unwrap(),
            ambiguous_vertices: 0,
        }
    }

    #[test]
    fn test_square_area() {
        let vertices = vec![
            Vertex::new(0, 0),
            Vertex::new(64, 0),
            Vertex::new(64, 64),
            Vertex::new(0, 64),
        ];
        let m = mesh(&[closed(vec![0, 1, 2, 3])], &vertices);
        assert_eq!(m.triangles().len(), 2);
        assert_approx_eq!(m.area(&vertices), 4096.0);
        assert!(m.contains(&vertices, 32.0, 32.0));
        assert!(!m.contains(&vertices, 65.0, 32.0));
    }

    #[test]
    fn test_star_shaped_area_matches_shoelace() {
        // An L-shaped, concave sector.
        let vertices = vec![
            Vertex::new(0, 0),
            Vertex::new(0, 128),
            Vertex::new(64, 128),
            Vertex::new(64, 64),
            Vertex::new(128, 64),
            Vertex::new(128, 0),
        ];
        let ring: Vec<_> = vertices
            .iter()
            .map(|v| Point2D::new(v.raw_x as f64, v.raw_y as f64))
            .collect();
        let m = mesh(&[closed((0..6).collect())], &vertices);
        assert_eq!(m.triangles().len(), 4);
        assert_approx_eq!(m.area(&vertices), shoelace_area(&ring));
        assert!(!m.contains(&vertices, 100.0, 100.0));
    }

    #[test]
    fn test_hole_is_subtracted() {
        let vertices = vec![
            Vertex::new(0, 0),
            Vertex::new(0, 128),
            Vertex::new(128, 128),
            Vertex::new(128, 0),
            Vertex::new(32, 32),
            Vertex::new(96, 32),
            Vertex::new(96, 96),
            Vertex::new(32, 96),
        ];
        let m = mesh(&[closed(vec![0, 1, 2, 3]), closed(vec![4, 5, 6, 7])], &vertices);
        assert_approx_eq!(m.area(&vertices), 128.0 * 128.0 - 64.0 * 64.0);
        assert!(!m.contains(&vertices, 64.0, 64.0));
        assert!(m.contains(&vertices, 16.0, 64.0));
    }

    #[test]
    fn test_too_few_vertices() {
        let vertices = vec![Vertex::new(0, 0), Vertex::new(1, 0)];
        assert_eq!(triangulate(&[closed(vec![0, 1])], &vertices), Some(Vec::new()));
        assert_eq!(triangulate(&[closed(vec![0, 1, 7])], &vertices), None);
    }
}
