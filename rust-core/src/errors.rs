//! Failure taxonomy of the Brillouin zone kernel.
//!
//! Every failure is deterministic for a given input; none of them is
//! downgraded to partial output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building a Brillouin zone.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BrillouinZoneError {
    /// The real-space basis is (numerically) singular; reciprocal vectors are undefined.
    #[error("Degenerate lattice: {message}")]
    DegenerateLattice {
        /// Description of the degeneracy.
        message: String,
    },
    /// The origin's Voronoi region is not enclosed by the neighbor shell.
    #[error("Unbounded Voronoi region: {message}")]
    UnboundedRegion {
        /// Description of why the region could not be trusted.
        message: String,
    },
    /// Too few non-coplanar vertices to span a 3D polyhedron.
    #[error("Degenerate convex hull: {message}")]
    DegenerateHull {
        /// Description of the degeneracy.
        message: String,
    },
    /// A setting is outside the range the geometry can work with.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Which setting and why.
        message: String,
    },
}

/// Classification of a [`BrillouinZoneError`] without its message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DegenerateLattice,
    UnboundedRegion,
    DegenerateHull,
    InvalidConfig,
}

impl BrillouinZoneError {
    pub fn degenerate_lattice(message: impl Into<String>) -> Self {
        Self::DegenerateLattice {
            message: message.into(),
        }
    }

    pub fn unbounded_region(message: impl Into<String>) -> Self {
        Self::UnboundedRegion {
            message: message.into(),
        }
    }

    pub fn degenerate_hull(message: impl Into<String>) -> Self {
        Self::DegenerateHull {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DegenerateLattice { .. } => ErrorKind::DegenerateLattice,
            Self::UnboundedRegion { .. } => ErrorKind::UnboundedRegion,
            Self::DegenerateHull { .. } => ErrorKind::DegenerateHull,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// The diagnostic message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::DegenerateLattice { message }
            | Self::UnboundedRegion { message }
            | Self::DegenerateHull { message }
            | Self::InvalidConfig { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_message() {
        let error = BrillouinZoneError::degenerate_hull("only 3 vertices");
        assert_eq!(error.kind(), ErrorKind::DegenerateHull);
        assert_eq!(error.message(), "only 3 vertices");
        assert_eq!(error.to_string(), "Degenerate convex hull: only 3 vertices");
    }
}
