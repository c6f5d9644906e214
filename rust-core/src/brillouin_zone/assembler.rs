use log::{debug, info};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::BrillouinZoneConfig;
use crate::errors::BrillouinZoneError;
use crate::interfaces::Space;
use crate::lattice::base_matrix::LatticeMatrix;
use crate::lattice::convex_hull::{ConvexHull, Edge};
use crate::lattice::polyhedron::Polyhedron;
use crate::lattice::voronoi_cells::compute_brillouin_zone_region;
use crate::symmetries::high_symmetry_points::{HighSymmetryData, PathSegment};

/// The first Brillouin zone of a lattice, annotated with high-symmetry points.
///
/// Serializes to the record consumed by renderers:
/// `vertices`, `edges`, `kpoints`, `path`, `reciprocal_lattice`, plus the
/// polygonal `faces` and the enclosed `volume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrillouinZone {
    /// Cartesian reciprocal-space coordinates of the zone's vertices
    pub vertices: Vec<Vector3<f64>>,
    /// Edges as (smaller, larger) vertex indices
    pub edges: BTreeSet<Edge>,
    /// Pass-through k-points and path
    #[serde(flatten)]
    pub annotations: HighSymmetryData,
    /// Rows are the reciprocal basis vectors used for the construction
    #[serde(with = "crate::interfaces::matrix_rows")]
    pub reciprocal_lattice: Matrix3<f64>,
    /// Polygonal faces, counter-clockwise seen from outside
    #[serde(default)]
    pub faces: Vec<Vec<usize>>,
    /// Enclosed volume
    #[serde(default)]
    pub volume: f64,
}

impl BrillouinZone {
    /// Aggregate the pieces of a zone. Pure; never fails.
    pub fn assemble(
        vertices: Vec<Vector3<f64>>,
        edges: BTreeSet<Edge>,
        reciprocal: &LatticeMatrix,
        annotations: HighSymmetryData,
    ) -> Self {
        BrillouinZone {
            vertices,
            edges,
            annotations,
            reciprocal_lattice: *reciprocal.base_matrix(),
            faces: Vec::new(),
            volume: 0.0,
        }
    }

    /// Aggregate a zone from its polyhedron, keeping faces and volume as well.
    pub fn from_polyhedron(
        polyhedron: Polyhedron,
        reciprocal: &LatticeMatrix,
        annotations: HighSymmetryData,
    ) -> Self {
        let Polyhedron {
            vertices,
            edges,
            faces,
            measure,
        } = polyhedron;
        BrillouinZone {
            faces,
            volume: measure,
            ..Self::assemble(vertices, edges.into_iter().collect(), reciprocal, annotations)
        }
    }

    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    pub fn kpoints(&self) -> &BTreeMap<String, Vector3<f64>> {
        &self.annotations.kpoints
    }

    pub fn path(&self) -> &[(String, String)] {
        &self.annotations.path
    }

    pub fn reciprocal_lattice(&self) -> &Matrix3<f64> {
        &self.reciprocal_lattice
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// High-symmetry points in Cartesian coordinates.
    pub fn kpoints_cartesian(&self) -> BTreeMap<String, Vector3<f64>> {
        self.annotations.cartesian_points(&self.reciprocal_lattice)
    }

    /// Path legs in Cartesian coordinates.
    pub fn path_segments(&self) -> Vec<PathSegment> {
        self.annotations.path_segments(&self.reciprocal_lattice)
    }

    /// The zone as a [`Polyhedron`].
    pub fn polyhedron(&self) -> Polyhedron {
        Polyhedron {
            vertices: self.vertices.clone(),
            edges: self.edges.iter().copied().collect(),
            faces: self.faces.clone(),
            measure: self.volume,
        }
    }

    /// Check if a Cartesian k-point lies in the zone (boundary included).
    pub fn contains(&self, k_point: Vector3<f64>) -> bool {
        self.polyhedron().contains(k_point)
    }
}

/// Build the first Brillouin zone of a real-space lattice.
///
/// Runs reciprocal basis → neighbor grid → origin Voronoi cell → convex hull →
/// edge set in order; the first failure is returned unchanged. The configuration
/// is checked before any geometry is computed.
pub fn compute_brillouin_zone(
    lattice: &LatticeMatrix,
    annotations: HighSymmetryData,
    config: &BrillouinZoneConfig,
) -> Result<BrillouinZone, BrillouinZoneError> {
    config.validate()?;
    let reciprocal = lattice.reciprocal(config.convention)?;

    let cell = compute_brillouin_zone_region(&reciprocal, config.shell, config.tolerance)?;
    let hull = ConvexHull::compute(&cell.vertices, config.tolerance)?;
    let polyhedron = Polyhedron::from_hull(&hull, config.edges);
    debug!(
        "Brillouin zone: {} vertices, {} edges ({:?}), {} faces",
        polyhedron.vertices.len(),
        polyhedron.edges.len(),
        config.edges,
        polyhedron.faces.len()
    );

    let zone = BrillouinZone::from_polyhedron(polyhedron, &reciprocal, annotations);
    info!(
        "Brillouin zone built from shell {}: {} vertices, {} edges, volume {:.6e}",
        cell.shell,
        zone.vertices.len(),
        zone.edges.len(),
        zone.volume
    );
    Ok(zone)
}

/// [`compute_brillouin_zone`] for a lattice given as three row vectors.
pub fn compute_brillouin_zone_from_rows(
    rows: [[f64; 3]; 3],
    annotations: HighSymmetryData,
    config: &BrillouinZoneConfig,
) -> Result<BrillouinZone, BrillouinZoneError> {
    let lattice = LatticeMatrix::from_array(rows, Space::Real)?;
    compute_brillouin_zone(&lattice, annotations, config)
}
