use log::debug;
use nalgebra::{Matrix3, Vector3};

use crate::config::DETERMINANT_TOLERANCE;
use crate::errors::BrillouinZoneError;
use crate::interfaces::{ReciprocalConvention, Space};

/// A non-degenerate 3x3 basis whose **rows** are the lattice vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeMatrix {
    base_matrix: Matrix3<f64>,
    space: Space,
}

impl LatticeMatrix {
    pub fn from_rows(
        base_1: Vector3<f64>,
        base_2: Vector3<f64>,
        base_3: Vector3<f64>,
        space: Space,
    ) -> Result<Self, BrillouinZoneError> {
        let preliminary_base_matrix =
            Matrix3::from_rows(&[base_1.transpose(), base_2.transpose(), base_3.transpose()]);
        Self::from_matrix(preliminary_base_matrix, space)
    }

    pub fn from_matrix(matrix: Matrix3<f64>, space: Space) -> Result<Self, BrillouinZoneError> {
        if matrix.iter().any(|value| !value.is_finite()) {
            return Err(BrillouinZoneError::degenerate_lattice(
                "Basis contains non-finite entries.",
            ));
        }

        // Linearly non-dependent (also catches zero vectors). The determinant is
        // normalized by the row lengths so that uniformly tiny or huge cells pass.
        let normalized = normalized_determinant(&matrix);
        if normalized.abs() < DETERMINANT_TOLERANCE {
            return Err(BrillouinZoneError::degenerate_lattice(format!(
                "Normalized determinant {normalized:.3e} is below {DETERMINANT_TOLERANCE:e}. \
                 Vectors are either zero or linearly dependent."
            )));
        }

        Ok(LatticeMatrix {
            base_matrix: matrix,
            space,
        })
    }

    pub fn from_array(rows: [[f64; 3]; 3], space: Space) -> Result<Self, BrillouinZoneError> {
        Self::from_matrix(Matrix3::from_fn(|i, j| rows[i][j]), space)
    }

    /// Build the dual basis. Applied to a reciprocal basis it returns the real-space one.
    ///
    /// Rows satisfy aᵢ·bⱼ = f·δᵢⱼ with f = 2π or 1 depending on `convention`,
    /// i.e. B = f·(A⁻¹)ᵀ.
    pub fn reciprocal(&self, convention: ReciprocalConvention) -> Result<LatticeMatrix, BrillouinZoneError> {
        let inverse = self.base_matrix.try_inverse().ok_or_else(|| {
            BrillouinZoneError::degenerate_lattice("Basis matrix is not invertible.")
        })?;
        let reciprocal = convention.factor() * inverse.transpose();
        debug!(
            "Reciprocal basis built ({:?} convention), det = {:.6e}",
            convention,
            reciprocal.determinant()
        );

        // Pass the result through the constructor to ensure all checks are performed
        Self::from_matrix(
            reciprocal,
            match self.space {
                Space::Real => Space::Reciprocal,
                Space::Reciprocal => Space::Real,
            },
        )
    }

    pub fn base_matrix(&self) -> &Matrix3<f64> {
        &self.base_matrix
    }

    pub fn space(&self) -> Space {
        self.space
    }

    pub fn determinant(&self) -> f64 {
        self.base_matrix.determinant()
    }

    /// Volume of the cell spanned by the basis.
    pub fn volume(&self) -> f64 {
        self.determinant().abs()
    }

    pub fn base_vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.base_matrix.row(0).transpose(),
            self.base_matrix.row(1).transpose(),
            self.base_matrix.row(2).transpose(),
        ]
    }

    /// Fractional coordinates (f₁, f₂, f₃) to the Cartesian point Σ fᵢ·vᵢ.
    pub fn frac_to_cart(&self, v_frac: Vector3<f64>) -> Vector3<f64> {
        self.base_matrix.transpose() * v_frac
    }

    /// Distance between adjacent lattice planes spanned by the two other vectors, per basis vector.
    ///
    /// A lattice point with coefficient |mᵢ| is at least |mᵢ|·dᵢ away from the origin.
    pub fn plane_spacings(&self) -> [f64; 3] {
        let [v1, v2, v3] = self.base_vectors();
        let volume = self.volume();
        [
            volume / v2.cross(&v3).norm(),
            volume / v3.cross(&v1).norm(),
            volume / v1.cross(&v2).norm(),
        ]
    }
}

// |det M| divided by the product of the row norms; 0 for a zero row
fn normalized_determinant(matrix: &Matrix3<f64>) -> f64 {
    let norm_product: f64 = (0..3).map(|i| matrix.row(i).norm()).product();
    if norm_product == 0.0 {
        return 0.0;
    }
    matrix.determinant() / norm_product
}
