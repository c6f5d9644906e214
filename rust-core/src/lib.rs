//! First Brillouin zone construction
//!
//! This library turns a real-space lattice into its reciprocal basis, isolates the
//! Voronoi cell of the reciprocal-lattice origin, and returns that cell as a convex
//! polyhedron (vertices, edges, faces) annotated with externally supplied
//! high-symmetry points and path.

pub mod brillouin_zone;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod lattice;
pub mod symmetries;

pub use brillouin_zone::{compute_brillouin_zone, compute_brillouin_zone_from_rows, BrillouinZone};
pub use config::BrillouinZoneConfig;
pub use errors::{BrillouinZoneError, ErrorKind};

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, BrillouinZoneError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
