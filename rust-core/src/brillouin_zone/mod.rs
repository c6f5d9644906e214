// Brillouin zone assembly: the five-stage pipeline and its result record

// ======================== MODULE DECLARATIONS ========================
pub mod assembler;

mod _tests_assembler;

// ======================== PIPELINE & RESULT ========================
pub use assembler::{
    BrillouinZone,                    // struct - vertices, edges, kpoints, path, reciprocal lattice (+ faces, volume)
    compute_brillouin_zone,           // fn(lattice: &LatticeMatrix, annotations: HighSymmetryData, config: &BrillouinZoneConfig) -> Result<BrillouinZone>
    compute_brillouin_zone_from_rows, // fn(rows: [[f64; 3]; 3], annotations, config) -> Result<BrillouinZone>
};
