//! Wavefront OBJ export.
//!
//! Writes the current display level of an [`IcoSphere`] or any position/index
//! pair. Vertex normals are the positions themselves, which is exact for
//! points on the unit sphere.
use std::{fs::File, io::Write, path::Path};

use crate::{subdivide::validate_indices, IcoSphere, Point, Result};

/// Write `positions` and `indices` as an OBJ object named `name`.
///
/// Faces use 1-based indexing and reference position and normal by the same
/// index.
///
/// # Examples
///
/// ```
/// use icosphere_lod::{obj_export::write_obj, BaseMesh};
///
/// let base = BaseMesh::tetrahedron();
/// let mut obj = Vec::new();
/// write_obj(&mut obj, "tetrahedron", base.positions(), base.indices())?;
///
/// let obj = String::from_utf8(obj).unwrap();
/// assert!(obj.contains("f 1//1 2//2 3//3"));
/// # Ok::<(), icosphere_lod::Error>(())
/// ```
pub fn write_obj<W: Write>(
    writer: &mut W,
    name: &str,
    positions: &[Point],
    indices: &[u32],
) -> Result<()> {
    validate_indices(indices, positions.len())?;

    writeln!(
        writer,
        "# {} vertices, {} triangles",
        positions.len(),
        indices.len() / 3
    )?;
    writeln!(writer, "o {name}")?;

    for p in positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    for p in positions {
        let n = p.normalized();
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    for triangle in indices.chunks_exact(3) {
        let v0 = triangle[0] as usize + 1;
        let v1 = triangle[1] as usize + 1;
        let v2 = triangle[2] as usize + 1;
        writeln!(writer, "f {v0}//{v0} {v1}//{v1} {v2}//{v2}")?;
    }

    Ok(())
}

/// Write the current display level of `sphere` to an OBJ file at `path`.
///
/// Vertices the current level does not reference are left out.
pub fn write_obj_file(path: impl AsRef<Path>, name: &str, sphere: &IcoSphere) -> Result<()> {
    let mut file = std::io::BufWriter::new(File::create(path)?);

    write_obj(
        &mut file,
        name,
        &sphere.positions()[..sphere.referenced_vertex_count()],
        sphere.indices(),
    )?;

    file.flush()?;
    Ok(())
}
