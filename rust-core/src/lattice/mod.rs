// Lattice module: real/reciprocal bases, neighbor grids, Voronoi cells and convex hulls
// This module holds the geometric kernel behind the Brillouin zone construction

// ======================== MODULE DECLARATIONS ========================
pub mod base_matrix;
pub mod convex_hull;
pub mod lattice_construction;
pub mod neighbor_grid;
pub mod polyhedron;
pub mod voronoi_cells;

// Test modules
mod _tests_base_matrix;
mod _tests_polyhedron;

// ======================== BASES ========================
pub use base_matrix::LatticeMatrix; // struct - validated 3x3 basis, rows are the lattice vectors
// LatticeMatrix impl methods:
//   from_rows(b1, b2, b3, space) -> Result<Self>                  - validates and builds a basis
//   from_matrix(matrix, space) -> Result<Self>                    - same, from a row-vector matrix
//   from_array(rows, space) -> Result<Self>                       - same, from nested arrays
//   reciprocal(&self, convention) -> Result<LatticeMatrix>        - dual basis, aᵢ·bⱼ = 2π·δᵢⱼ (or δᵢⱼ)
//   base_vectors(&self) -> [Vector3<f64>; 3]                      - the three rows
//   frac_to_cart(&self, v_frac) -> Vector3<f64>                   - Σ fᵢ·vᵢ
//   plane_spacings(&self) -> [f64; 3]                             - lattice plane distances per vector
//   determinant / volume / base_matrix / space                    - accessors

// ======================== NEIGHBOR GRID ========================
pub use neighbor_grid::NeighborGrid; // struct - (2n+1)³ integer combinations of a basis
// NeighborGrid impl methods:
//   new(basis) -> Self                     - 27-point grid, origin at index 13
//   with_shell(basis, shell) -> Self       - larger grids for adaptive growth
//   origin_index(&self) -> usize           - index of the (0,0,0) combination
//   points / coefficients / shell / basis  - accessors

// ======================== VORONOI CELL CONSTRUCTION ========================
pub use voronoi_cells::{
    OriginCell,                     // struct - origin cell vertices plus the shell that produced them
    VoronoiDiagram,                 // struct - shared vertex table and one region per site
    VoronoiRegion,                  // struct - vertex list (with at-infinity marker) and neighboring sites
    VoronoiVertex,                  // enum - Finite(index) or AtInfinity
    compute_brillouin_zone_region,  // fn(basis: &LatticeMatrix, strategy: ShellStrategy, tolerance: f64) -> Result<OriginCell>
    extract_brillouin_zone_region,  // fn(grid: &NeighborGrid, tolerance: f64) -> Result<Vec<Vector3<f64>>>
};

// ======================== CONVEX HULL & EDGES ========================
pub use convex_hull::{
    ConvexHull, // struct - incremental 3D hull over a point set
    Edge,       // type - (usize, usize), smaller index first
    HullFacet,  // struct - outward-oriented triangle
};
// ConvexHull impl methods:
//   compute(points, tolerance) -> Result<Self>    - fails with DegenerateHull below 4 spanning points
//   triangulated_edges(&self) -> BTreeSet<Edge>   - all triangle edges (diagonals on flat faces included)
//   polygonal_faces(&self) -> Vec<Vec<usize>>     - coplanar triangles merged into polygons
//   polygonal_edges(&self) -> BTreeSet<Edge>      - true polyhedron edges
//   volume(&self) -> f64                          - enclosed volume
//   contains(&self, point) -> bool                - point-in-hull test

// ======================== GEOMETRIC POLYHEDRONS ========================
pub use polyhedron::Polyhedron; // struct - vertices, edges, faces and volume of a convex polyhedron

// ======================== LATTICE CONSTRUCTION UTILITIES ========================
pub use lattice_construction::{
    body_centered_cubic_lattice, // fn(a: f64) -> Result<LatticeMatrix> - primitive BCC cell
    face_centered_cubic_lattice, // fn(a: f64) -> Result<LatticeMatrix> - primitive FCC cell
    hexagonal_lattice,           // fn(a: f64, c: f64) -> Result<LatticeMatrix>
    orthorhombic_lattice,        // fn(a: f64, b: f64, c: f64) -> Result<LatticeMatrix>
    scale_lattice,               // fn(lattice: &LatticeMatrix, scale: f64) -> Result<LatticeMatrix>
    simple_cubic_lattice,        // fn(a: f64) -> Result<LatticeMatrix>
    tetragonal_lattice,          // fn(a: f64, c: f64) -> Result<LatticeMatrix>
    transform_lattice,           // fn(lattice: &LatticeMatrix, m: &Matrix3<f64>) -> Result<LatticeMatrix>
    triclinic_lattice,           // fn(a, b, c, alpha, beta, gamma) -> Result<LatticeMatrix>
};
