// Definitions that are used throughout all modules

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_SHELL;

// Enumeration to track the space type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    Real,
    Reciprocal,
}

/// Scaling of the reciprocal basis: aᵢ·bⱼ = 2π·δᵢⱼ or aᵢ·bⱼ = δᵢⱼ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReciprocalConvention {
    #[default]
    TwoPi,
    Unit,
}

impl ReciprocalConvention {
    pub fn factor(&self) -> f64 {
        match self {
            ReciprocalConvention::TwoPi => 2.0 * PI,
            ReciprocalConvention::Unit => 1.0,
        }
    }
}

/// Neighbor shell used to seed the Voronoi decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellStrategy {
    /// The 3x3x3 grid; an insufficient shell is an error.
    #[default]
    Fixed,
    /// Grow the grid one shell at a time until the origin cell is verified.
    Adaptive { max_shell: usize },
}

impl ShellStrategy {
    pub fn adaptive() -> Self {
        ShellStrategy::Adaptive {
            max_shell: DEFAULT_MAX_SHELL,
        }
    }
}

/// Edge set reported for the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Every edge of the triangulated hull, including diagonals across flat faces.
    #[default]
    Triangulated,
    /// Coplanar triangles merged first; only true polyhedron edges.
    Polygonal,
}

/// Serde adapter writing a `Matrix3` as three row arrays.
///
/// nalgebra's own serialization is a flat column-major list, which is not
/// what consumers of the zone record expect.
pub mod matrix_rows {
    use nalgebra::Matrix3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(matrix: &Matrix3<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: [[f64; 3]; 3] = std::array::from_fn(|i| std::array::from_fn(|j| matrix[(i, j)]));
        rows.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Matrix3<f64>, D::Error> {
        let rows = <[[f64; 3]; 3]>::deserialize(deserializer)?;
        Ok(Matrix3::from_fn(|i, j| rows[i][j]))
    }
}
