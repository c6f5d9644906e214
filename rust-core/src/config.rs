// Constants and per-call settings

use serde::{Deserialize, Serialize};

use crate::errors::BrillouinZoneError;
use crate::interfaces::{EdgeMode, ReciprocalConvention, ShellStrategy};

// Tolerances
pub const DETERMINANT_TOLERANCE: f64 = 1e-8; // Normalized |det| below this marks a degenerate basis
pub const GEOMETRY_TOLERANCE: f64 = 1e-9; // Plane/vertex tolerance in normalized (unit-scale) coordinates
pub const MAX_GEOMETRY_TOLERANCE: f64 = 1e-4; // Largest accepted geometric tolerance
pub const MERGE_FACTOR: f64 = 10.0; // Vertex merging and coplanar grouping distance, in units of the tolerance

// Neighbor shell
pub const DEFAULT_SHELL: usize = 1; // 3x3x3 grid
pub const DEFAULT_MAX_SHELL: usize = 3; // Iteration cap for the adaptive strategy
pub const MAX_ADAPTIVE_SHELL: usize = 8; // Largest max_shell accepted from a configuration

// Half-width of the bounding cube used to close Voronoi regions, in units of the largest site norm
pub const BOUNDING_BOX_SCALE: f64 = 100.0;

/// Settings for a single Brillouin zone computation.
///
/// Every field has a default, so a partial JSON object such as
/// `{"edges": "polygonal"}` deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrillouinZoneConfig {
    /// Scaling of the reciprocal basis (2π or 1).
    pub convention: ReciprocalConvention,
    /// How many neighbor shells seed the Voronoi decomposition.
    pub shell: ShellStrategy,
    /// Which edges are reported.
    pub edges: EdgeMode,
    /// Geometric tolerance relative to the size of the zone.
    pub tolerance: f64,
}

impl Default for BrillouinZoneConfig {
    fn default() -> Self {
        Self {
            convention: ReciprocalConvention::TwoPi,
            shell: ShellStrategy::Fixed,
            edges: EdgeMode::Triangulated,
            tolerance: GEOMETRY_TOLERANCE,
        }
    }
}

impl BrillouinZoneConfig {
    pub fn with_convention(mut self, convention: ReciprocalConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_shell(mut self, shell: ShellStrategy) -> Self {
        self.shell = shell;
        self
    }

    pub fn with_edges(mut self, edges: EdgeMode) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Reject settings the geometry cannot work with.
    pub fn validate(&self) -> Result<(), BrillouinZoneError> {
        validate_tolerance(self.tolerance)?;
        if let ShellStrategy::Adaptive { max_shell } = self.shell {
            if max_shell > MAX_ADAPTIVE_SHELL {
                return Err(BrillouinZoneError::invalid_config(format!(
                    "max_shell {max_shell} exceeds the limit of {MAX_ADAPTIVE_SHELL}."
                )));
            }
        }
        Ok(())
    }
}

/// A geometric tolerance must be finite and lie in (0, [`MAX_GEOMETRY_TOLERANCE`]].
pub fn validate_tolerance(tolerance: f64) -> Result<(), BrillouinZoneError> {
    if !tolerance.is_finite() || tolerance <= 0.0 || tolerance > MAX_GEOMETRY_TOLERANCE {
        return Err(BrillouinZoneError::invalid_config(format!(
            "Tolerance {tolerance:e} must be finite and in (0, {MAX_GEOMETRY_TOLERANCE:e}]."
        )));
    }
    Ok(())
}
