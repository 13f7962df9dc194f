//! Tests for the level controller.


use icosphere_lod::{BaseMesh, Error, IcoSphere, IcoSphereOptions, LevelChange};
use test_utils::*;

fn sphere(max_level: usize, initial_level: usize) -> IcoSphere {
    IcoSphere::new(IcoSphereOptions {
        max_level,
        initial_level,
    })
    .expect("Failed to create IcoSphere")
}

/// Invariants that must hold after every transition.
fn assert_invariants(sphere: &IcoSphere) {
    assert_indices_valid(sphere.indices(), sphere.vertex_count());
    assert_indices_valid(sphere.indices(), sphere.referenced_vertex_count());
    assert!(sphere.calculated_level() >= sphere.display_level());
    assert!(sphere.display_level() <= sphere.max_level());
    assert!(sphere.vertex_count() <= sphere.capacity().vertices());
    assert!(sphere.indices().len() <= sphere.capacity().index_len());
}

#[test]
fn test_options_default() {
    let options = IcoSphereOptions::default();
    assert_eq!(options.max_level, 8);
    assert_eq!(options.initial_level, 0);
}

#[test]
fn test_initial_state() {
    let sphere = sphere(8, 0);

    assert_eq!(sphere.display_level(), 0);
    assert_eq!(sphere.calculated_level(), 0);
    assert_eq!(sphere.positions(), BaseMesh::tetrahedron().positions());
    assert_eq!(sphere.indices(), BaseMesh::tetrahedron().indices());
}

#[test]
fn test_transitions() -> anyhow::Result<()> {
    let mut sphere = sphere(8, 0);

    assert_eq!(sphere.increase()?, LevelChange::Subdivided);
    assert_eq!(sphere.increase()?, LevelChange::Subdivided);
    assert_eq!((sphere.display_level(), sphere.calculated_level()), (2, 2));
    assert_eq!(sphere.vertex_count(), 64);

    assert_eq!(sphere.decrease()?, LevelChange::Coarsened);
    assert_eq!(sphere.decrease()?, LevelChange::Coarsened);
    assert_eq!((sphere.display_level(), sphere.calculated_level()), (0, 2));
    // Coarsening never drops vertices.
    assert_eq!(sphere.vertex_count(), 64);
    assert_eq!(sphere.indices(), BaseMesh::tetrahedron().indices());

    assert_eq!(sphere.increase()?, LevelChange::Resubdivided);
    assert_eq!(sphere.increase()?, LevelChange::Resubdivided);
    assert_eq!(sphere.increase()?, LevelChange::Subdivided);
    assert_eq!((sphere.display_level(), sphere.calculated_level()), (3, 3));
    assert_eq!(sphere.vertex_count(), 256);
    Ok(())
}

#[test]
fn test_disabled_transitions() -> anyhow::Result<()> {
    let mut sphere = sphere(1, 0);

    assert_eq!(sphere.decrease()?, LevelChange::Unchanged);
    assert_eq!(sphere.display_level(), 0);

    assert_eq!(sphere.increase()?, LevelChange::Subdivided);
    let indices = sphere.indices().to_vec();
    assert_eq!(sphere.increase()?, LevelChange::Unchanged);
    assert_eq!(sphere.display_level(), 1);
    assert_eq!(sphere.indices(), indices);
    Ok(())
}

#[test]
fn test_toggle_reproduces_indices() -> anyhow::Result<()> {
    let mut sphere = sphere(6, 0);
    let mut reference = vec![sphere.indices().to_vec()];

    for _ in 0..6 {
        sphere.increase()?;
        reference.push(sphere.indices().to_vec());
    }
    let positions = sphere.positions().to_vec();

    for level in (0..6).rev() {
        sphere.decrease()?;
        assert_eq!(sphere.indices(), reference[level]);
    }
    for level in 1..=6 {
        sphere.increase()?;
        assert_eq!(sphere.indices(), reference[level]);
    }

    // Revisiting levels never computes new vertices.
    assert_eq!(sphere.positions(), positions);
    Ok(())
}

#[test]
fn test_initial_level_matches_stepping() -> anyhow::Result<()> {
    let seeded = sphere(8, 4);

    let mut stepped = sphere(8, 0);
    for _ in 0..4 {
        stepped.increase()?;
    }

    assert_eq!(seeded.display_level(), 4);
    assert_eq!(seeded.calculated_level(), 4);
    assert_eq!(seeded.positions(), stepped.positions());
    assert_eq!(seeded.indices(), stepped.indices());
    Ok(())
}

#[test]
fn test_set_level() -> anyhow::Result<()> {
    let mut sphere = sphere(5, 0);

    sphere.set_level(4)?;
    assert_eq!(sphere.display_level(), 4);
    assert_eq!(sphere.triangle_count(), 4usize.pow(5));

    sphere.set_level(1)?;
    assert_eq!(sphere.display_level(), 1);
    assert_eq!(sphere.calculated_level(), 4);
    assert_eq!(sphere.triangle_count(), 16);

    assert!(matches!(
        sphere.set_level(6),
        Err(Error::LevelOutOfRange { level: 6, max: 5 })
    ));
    assert_eq!(sphere.display_level(), 1);
    Ok(())
}

#[test]
fn test_max_level_out_of_range() {
    let result = IcoSphere::new(IcoSphereOptions {
        max_level: 40,
        initial_level: 0,
    });
    assert!(matches!(result, Err(Error::LevelOutOfRange { .. })));
}

#[test]
fn test_capacity_bound_random_walk() -> anyhow::Result<()> {
    let mut sphere = sphere(8, 0);
    assert_eq!(sphere.capacity().index_len(), 3 * 4usize.pow(9));
    assert_eq!(sphere.capacity().vertices(), 4usize.pow(9));

    // Deterministic LCG biased towards going up so the top levels get hit.
    let mut state = 0x2545_f491_u32;
    for _ in 0..120 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        if state >> 28 < 10 {
            sphere.increase()?;
        } else {
            sphere.decrease()?;
        }

        assert_invariants(&sphere);
        assert!(sphere.indices().len() <= 3 * 4usize.pow(9));
        assert!(sphere.vertex_count() <= 4usize.pow(9));
    }
    Ok(())
}

#[test]
fn test_full_range_stays_within_capacity() -> anyhow::Result<()> {
    let mut sphere = sphere(8, 0);

    for _ in 0..2 {
        sphere.set_level(8)?;
        assert_invariants(&sphere);
        assert_eq!(sphere.vertex_count(), sphere.capacity().vertices());
        assert_eq!(sphere.indices().len(), sphere.capacity().index_len());

        sphere.set_level(0)?;
        assert_invariants(&sphere);
    }
    Ok(())
}

#[test]
fn test_index_storage_is_never_reallocated() -> anyhow::Result<()> {
    let mut sphere = sphere(5, 0);
    let storage = sphere.indices().as_ptr();

    for level in [5, 0, 3, 1, 5] {
        sphere.set_level(level)?;
        assert_eq!(sphere.indices().as_ptr(), storage, "level {level}");
    }
    Ok(())
}

#[test]
fn test_other_base_meshes() -> anyhow::Result<()> {
    for base in [BaseMesh::octahedron(), BaseMesh::icosahedron()] {
        let base_triangles = base.triangle_count();
        let mut sphere = IcoSphere::with_base_mesh(
            base,
            IcoSphereOptions {
                max_level: 4,
                initial_level: 4,
            },
        )?;
        let top = sphere.indices().to_vec();

        sphere.set_level(0)?;
        assert_eq!(sphere.triangle_count(), base_triangles);

        for _ in 0..4 {
            assert_eq!(sphere.increase()?, LevelChange::Resubdivided);
            assert_invariants(&sphere);
        }
        assert_eq!(sphere.indices(), top);
        assert!(triangles(sphere.indices()).all(|t| faces_outward(sphere.positions(), t)));
    }
    Ok(())
}

#[test]
fn test_byte_views() {
    let sphere = sphere(3, 2);

    assert_eq!(sphere.positions_flat().len(), 3 * sphere.vertex_count());
    assert_eq!(sphere.position_bytes().len(), 12 * sphere.vertex_count());
    assert_eq!(sphere.index_bytes().len(), 4 * sphere.indices().len());
    assert_eq!(&sphere.positions_flat()[..3], &[0.0, 0.0, 1.0]);
}

#[test]
fn test_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IcoSphere>();
}
