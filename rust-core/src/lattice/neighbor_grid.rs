// Neighbor grid: integer combinations of the reciprocal basis that seed the Voronoi decomposition

use nalgebra::Vector3;

use crate::config::DEFAULT_SHELL;
use crate::lattice::base_matrix::LatticeMatrix;

/// Lattice points m₁b₁ + m₂b₂ + m₃b₃ with every mᵢ in `-shell..=shell`.
///
/// Points are enumerated with m₁ outermost and m₃ innermost, so the origin
/// sits exactly in the middle of the list (index 13 for the 3x3x3 grid).
#[derive(Debug, Clone)]
pub struct NeighborGrid {
    points: Vec<Vector3<f64>>,
    coefficients: Vec<[i32; 3]>,
    shell: usize,
    basis: LatticeMatrix,
}

impl NeighborGrid {
    /// The 27-point grid (coefficients in {-1, 0, 1}).
    pub fn new(basis: &LatticeMatrix) -> Self {
        Self::with_shell(basis, DEFAULT_SHELL)
    }

    pub fn with_shell(basis: &LatticeMatrix, shell: usize) -> Self {
        let [vector_b1, vector_b2, vector_b3] = basis.base_vectors();
        let shell_limit = shell as i32;
        let side = 2 * shell + 1;

        let mut points = Vec::with_capacity(side * side * side);
        let mut coefficients = Vec::with_capacity(side * side * side);
        for n in -shell_limit..=shell_limit {
            for m in -shell_limit..=shell_limit {
                for l in -shell_limit..=shell_limit {
                    let point = (n as f64) * vector_b1 + (m as f64) * vector_b2 + (l as f64) * vector_b3;
                    points.push(point);
                    coefficients.push([n, m, l]);
                }
            }
        }

        NeighborGrid {
            points,
            coefficients,
            shell,
            basis: basis.clone(),
        }
    }

    /// Index of the (0, 0, 0) combination.
    pub fn origin_index(&self) -> usize {
        (self.points.len() - 1) / 2
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Integer coefficients of each point, aligned with [`NeighborGrid::points`].
    pub fn coefficients(&self) -> &[[i32; 3]] {
        &self.coefficients
    }

    /// The basis the grid was generated from.
    pub fn basis(&self) -> &LatticeMatrix {
        &self.basis
    }

    pub fn shell(&self) -> usize {
        self.shell
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
