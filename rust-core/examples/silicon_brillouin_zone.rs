/// Example: the first Brillouin zone of silicon (FCC, a = 5.431 Å)
///
/// Builds the zone with the standard FCC high-symmetry points and path,
/// prints its geometry and writes the JSON record consumed by renderers.
use brillouin_zone::interfaces::EdgeMode;
use brillouin_zone::lattice::face_centered_cubic_lattice;
use brillouin_zone::symmetries::{GAMMA, HighSymmetryData};
use brillouin_zone::{BrillouinZoneConfig, compute_brillouin_zone};
use nalgebra::Vector3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== First Brillouin zone of silicon ===\n");

    let lattice = face_centered_cubic_lattice(5.431)?;

    // Fractional coordinates with respect to the primitive reciprocal basis
    let annotations = HighSymmetryData::new()
        .with_point(GAMMA, Vector3::new(0.0, 0.0, 0.0))
        .with_point("X", Vector3::new(0.5, 0.0, 0.5))
        .with_point("L", Vector3::new(0.5, 0.5, 0.5))
        .with_point("W", Vector3::new(0.5, 0.25, 0.75))
        .with_point("K", Vector3::new(0.375, 0.375, 0.75))
        .with_point("U", Vector3::new(0.625, 0.25, 0.625))
        .with_segment(GAMMA, "X")
        .with_segment("X", "U")
        .with_segment("K", GAMMA)
        .with_segment(GAMMA, "L")
        .with_segment("L", "W")
        .with_segment("W", "X");

    let config = BrillouinZoneConfig::default().with_edges(EdgeMode::Polygonal);
    let zone = compute_brillouin_zone(&lattice, annotations, &config)?;

    println!("1. Geometry:");
    println!("   Vertices: {}", zone.vertices().len());
    println!("   Edges:    {}", zone.edges().len());
    println!("   Faces:    {}", zone.faces.len());
    println!("   Volume:   {:.6} Å⁻³\n", zone.volume());

    println!("2. High-symmetry points (Cartesian, Å⁻¹):");
    for (label, k_point) in zone.kpoints_cartesian() {
        println!(
            "   {:>5}: ({:8.4}, {:8.4}, {:8.4})  inside: {}",
            label,
            k_point.x,
            k_point.y,
            k_point.z,
            zone.contains(k_point)
        );
    }

    println!("\n3. Path:");
    for segment in zone.path_segments() {
        println!(
            "   {} -> {}: {:.4} Å⁻¹",
            segment.start_label,
            segment.end_label,
            segment.length()
        );
    }

    println!("\n4. JSON record:");
    println!("{}", serde_json::to_string(&zone)?);
    Ok(())
}
