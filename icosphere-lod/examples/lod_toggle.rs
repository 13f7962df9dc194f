use icosphere_lod::{IcoSphere, IcoSphereOptions};

fn main() -> anyhow::Result<()> {
    // Pre-seed six levels, the way an interactive viewer would on startup.
    let mut sphere = IcoSphere::new(IcoSphereOptions {
        max_level: 8,
        initial_level: 6,
    })?;

    let capacity = sphere.capacity();
    println!(
        "buffers: {} bytes positions, {} bytes indices",
        capacity.position_buffer_size(),
        capacity.index_buffer_size()
    );

    // Simulated '-' '-' '+' '+' '+' '+' '+' clicks.
    let steps = [false, false, true, true, true, true, true];

    for increase in steps {
        let change = if increase {
            sphere.increase()?
        } else {
            sphere.decrease()?
        };

        println!(
            "{:>12}: level {} (calculated {}), {} triangles, {} vertices",
            change.to_string(),
            sphere.display_level(),
            sphere.calculated_level(),
            sphere.triangle_count(),
            sphere.vertex_count()
        );
    }

    Ok(())
}
