//! Error types for the mesh pipeline.

use std::path::PathBuf;
use thiserror::Error;

use crate::loader::MeshFormat;

/// Errors raised while turning a mesh file into a [`Mesh`](crate::Mesh).
///
/// Loading is the only fallible step of the pipeline; everything downstream
/// is total over a well-formed mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("mesh file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("unknown mesh format: .{extension}")]
    UnknownFormat { extension: String },

    #[error("malformed {format} data at line {line}: {message}")]
    Malformed {
        format: MeshFormat,
        line: usize,
        message: String,
    },

    #[error("invalid {format} content: {message}")]
    InvalidContent { format: MeshFormat, message: String },

    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },

    #[error("mesh contains no triangular faces")]
    NoTriangles,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("mesh text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl LoadError {
    pub fn invalid_content(format: MeshFormat, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            format,
            message: message.into(),
        }
    }
}

/// A color string that could not be turned into numeric channels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("unrecognized color syntax: {input:?}")]
    Unparseable { input: String },

    #[error("color channel {value} out of range [0, 255] in {input:?}")]
    ChannelOutOfRange { input: String, value: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown selection preset {name:?} (expected one of: forearm, foot, head, custom)")]
pub struct UnknownPreset {
    pub name: String,
}

/// Failure of one pipeline request.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
}
