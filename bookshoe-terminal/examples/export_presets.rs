/// Example: Export every shoe variant with its default settings
///
/// Usage: cargo run --example export_presets -- path/to/output-dir
use bookshoe_core::{stl, Designer, MemoryStore, StlFormat, Variant};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

fn main() -> io::Result<()> {
    let out_dir = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("presets"));
    fs::create_dir_all(&out_dir)?;

    for variant in Variant::ALL {
        let designer = Designer::open(MemoryStore::new(), Some(variant));
        let bytes = designer.export_mesh(StlFormat::Binary);

        // Read the export back to be sure it is well formed
        let mesh = stl::parse_stl(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Bad STL export: {}", e)))?;

        fs::write(out_dir.join(format!("{variant}.stl")), &bytes)?;
        fs::write(out_dir.join(format!("{variant}.json")), designer.export_settings())?;

        println!("{:<24} {:>3} triangles", variant.label(), mesh.triangle_count());
    }

    println!("Wrote presets to {}", out_dir.display());
    Ok(())
}
