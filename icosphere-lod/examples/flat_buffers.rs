use icosphere_lod::{tri_mesh_buffers, IcoSphere, IcoSphereOptions};

fn main() -> anyhow::Result<()> {
    let sphere = IcoSphere::new(IcoSphereOptions {
        max_level: 2,
        initial_level: 2,
    })?;

    // Disconnected triangles with face normals.
    let (indices, points, normals) =
        tri_mesh_buffers::to_triangle_mesh_buffers(sphere.positions(), sphere.indices())?;

    println!("o flat_icosphere");

    for p in &points {
        println!("v {} {} {}", p[0], p[1], p[2]);
    }

    for n in &normals {
        println!("vn {} {} {}", n[0], n[1], n[2]);
    }

    for triangle in indices.chunks(3) {
        print!("f");
        for index in triangle {
            print!(" {}//{}", index + 1, index + 1);
        }
        println!();
    }

    Ok(())
}
