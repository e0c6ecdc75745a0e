/// Example: Load a mesh and report how many triangles each preset selects
///
/// Usage: cargo run --example preset_report -- path/to/file.obj

use std::env;

use meshlight_core::{highlight_mask, load_mesh, Mesh, Preset, Transform};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => {
            println!("Loading mesh file: {}", path);
            load_mesh(path)?
        }
        None => {
            eprintln!("Usage: {} <mesh-file>", args[0]);
            eprintln!("\nNo mesh file provided, using default cube...");
            Mesh::cube(1.0)
        }
    };

    let mesh = Transform::reorient(&mesh);
    println!(
        "Loaded {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    for preset in Preset::ALL {
        let selected = highlight_mask(&mesh, &preset.selection_box())
            .into_iter()
            .filter(|&inside| inside)
            .count();
        println!("{:<8} {:>8} triangles", preset, selected);
    }

    Ok(())
}
