//! Mesh file loading with format detection.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::geometry::Mesh;
use crate::{obj, stl};

/// Supported mesh file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    /// Wavefront OBJ, ASCII
    Obj,
    /// STL, binary or ASCII
    Stl,
}

impl MeshFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "stl" => Some(Self::Stl),
            _ => None,
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Stl => "stl",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Obj => f.write_str("OBJ"),
            Self::Stl => f.write_str("STL"),
        }
    }
}

/// Output of a format parser before the triangle check
#[derive(Debug, Clone)]
pub struct ParsedMesh {
    pub mesh: Mesh,
    /// Cells that were not triangles (quads, polygons, polylines)
    pub ignored_cells: usize,
}

/// Load a triangle mesh from disk, detecting the format from the extension.
///
/// Only triangular faces are kept. Fails when the file is missing, cannot be
/// parsed, or yields no triangles at all.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| LoadError::UnknownFormat {
        extension: path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })?;

    log::info!("Loading {} mesh from: {}.", format, path.display());

    let data = std::fs::read(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(err),
    })?;

    parse_mesh(format, &data)
}

/// Parse mesh bytes that are already in memory.
pub fn parse_mesh(format: MeshFormat, data: &[u8]) -> Result<Mesh, LoadError> {
    let parsed = match format {
        MeshFormat::Obj => obj::parse_obj(std::str::from_utf8(data)?)?,
        MeshFormat::Stl => stl::parse_stl(data)?,
    };

    finish(parsed)
}

fn finish(parsed: ParsedMesh) -> Result<Mesh, LoadError> {
    let ParsedMesh {
        mesh,
        ignored_cells,
    } = parsed;

    if ignored_cells > 0 {
        log::warn!(
            "Ignored {} non-triangular cells; only triangles are used.",
            ignored_cells
        );
    }

    if mesh.triangles.is_empty() {
        return Err(LoadError::NoTriangles);
    }

    if let Some((face, index)) = mesh.first_invalid_index() {
        return Err(LoadError::IndexOutOfRange {
            face,
            index: index as i64,
            vertex_count: mesh.vertex_count(),
        });
    }

    log::debug!(
        "Mesh loaded, vertices = {}, triangles = {}.",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}
