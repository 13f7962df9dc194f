//! Geometry generator binary
//!
//! Generates an icosphere at a given level and writes it to an OBJ file.

use clap::{Parser, ValueEnum};
use icosphere_lod::{obj_export, BaseMesh, IcoSphere, IcoSphereOptions};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Base {
    Tetrahedron,
    Octahedron,
    Icosahedron,
}

impl From<Base> for BaseMesh {
    fn from(base: Base) -> Self {
        match base {
            Base::Tetrahedron => BaseMesh::tetrahedron(),
            Base::Octahedron => BaseMesh::octahedron(),
            Base::Icosahedron => BaseMesh::icosahedron(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "icosphere-gen")]
#[command(about = "Generate a subdivided sphere and write it as OBJ")]
struct Cli {
    /// Subdivision level.
    #[arg(short, long, default_value_t = 3)]
    level: usize,

    /// Base mesh to subdivide.
    #[arg(short, long, value_enum, default_value_t = Base::Tetrahedron)]
    base: Base,

    /// Output file.
    #[arg(short, long, default_value = "icosphere.obj")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let sphere = match IcoSphere::with_base_mesh(
        cli.base.into(),
        IcoSphereOptions {
            max_level: cli.level,
            initial_level: cli.level,
        },
    ) {
        Ok(sphere) => sphere,
        Err(e) => {
            eprintln!("Error generating sphere: {}", e);
            std::process::exit(1);
        }
    };

    println!("Generated sphere with:");
    println!("  {} vertices", sphere.referenced_vertex_count());
    println!("  {} triangles", sphere.triangle_count());

    if let Err(e) = obj_export::write_obj_file(&cli.output, "icosphere", &sphere) {
        eprintln!("Error writing OBJ file: {}", e);
        std::process::exit(1);
    } else {
        println!("Wrote mesh to {}", cli.output.display());
    }
}
