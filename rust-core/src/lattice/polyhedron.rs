use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::interfaces::EdgeMode;
use crate::lattice::convex_hull::ConvexHull;

/// ε that controls the numerical tolerance of [`Polyhedron::contains`], relative
/// to the size of the polyhedron.
const EPS: f64 = 1.0e-10;

/// A convex polyhedron, e.g. a Brillouin zone, in a form ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyhedron {
    /// Vertices (Cartesian coordinates)
    pub vertices: Vec<Vector3<f64>>,
    /// Edges as pairs of vertex indices, smaller index first
    pub edges: Vec<(usize, usize)>,
    /// Polygonal faces as lists of vertex indices, counter-clockwise seen from outside
    pub faces: Vec<Vec<usize>>,
    /// Enclosed volume
    pub measure: f64,
}

impl Polyhedron {
    /// Create a new empty polyhedron
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            measure: 0.0,
        }
    }

    /// Take vertices, faces and volume from a hull; `edge_mode` selects which edges are kept.
    ///
    /// Only hull vertices are kept: interior or duplicate input points are dropped
    /// and edge/face indices refer to the compacted vertex list.
    pub fn from_hull(hull: &ConvexHull, edge_mode: EdgeMode) -> Self {
        let hull_vertices = hull.vertex_indices();
        let mut compact_index = vec![usize::MAX; hull.points().len()];
        for (new_index, &old_index) in hull_vertices.iter().enumerate() {
            compact_index[old_index] = new_index;
        }

        let edges = match edge_mode {
            EdgeMode::Triangulated => hull.triangulated_edges(),
            EdgeMode::Polygonal => hull.polygonal_edges(),
        };
        // vertex_indices() is sorted, so remapping keeps (smaller, larger) order
        let edges = edges
            .into_iter()
            .map(|(i, j)| (compact_index[i], compact_index[j]))
            .collect();
        let faces = hull
            .polygonal_faces()
            .into_iter()
            .map(|face| face.into_iter().map(|i| compact_index[i]).collect())
            .collect();

        Self {
            vertices: hull_vertices.iter().map(|&i| hull.points()[i]).collect(),
            edges,
            faces,
            measure: hull.volume(),
        }
    }

    /// Whether `point` lies inside the polyhedron or on its boundary.
    /// Face winding does not matter.
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        // A polyhedron must have at least one face with ≥3 vertices
        if self.faces.is_empty() {
            return false;
        }

        // Cheap approximate interior point: the arithmetic mean of all vertices.
        let centroid = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v)
            / self.vertices.len() as f64;
        let size = self
            .vertices
            .iter()
            .map(|v| (v - centroid).norm())
            .fold(0.0_f64, f64::max);

        for face in &self.faces {
            if face.len() < 3 {
                continue;
            } // degenerate face

            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];

            let mut normal = (v1 - v0).cross(&(v2 - v0));
            let length = normal.norm();
            if length == 0.0 {
                continue;
            }
            normal /= length;

            // Ensure the normal points *outward*.
            if normal.dot(&(centroid - v0)) > 0.0 {
                normal = -normal;
            }

            if normal.dot(&(point - v0)) > EPS * size {
                return false;
            }
        }
        true
    }

    /// Get the enclosed volume
    pub fn measure(&self) -> f64 {
        self.measure
    }

    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Number of edges meeting at each vertex.
    pub fn vertex_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertices.len()];
        for &(a, b) in &self.edges {
            degrees[a] += 1;
            degrees[b] += 1;
        }
        degrees
    }
}

impl Default for Polyhedron {
    fn default() -> Self {
        Self::new()
    }
}
