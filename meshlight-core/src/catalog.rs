//! Model ids and where their files live.

use std::path::{Path, PathBuf};

use crate::loader::MeshFormat;

/// Display labels of the bundled reference models
pub const REFERENCE_MODELS: [&str; 5] = [
    "Homer Simpson",
    "Stanford Bunny",
    "XYZ Dragon",
    "Lucy",
    "Human",
];

pub const DEFAULT_MODEL: &str = "xyz_dragon";

/// `"Stanford Bunny"` -> `"stanford_bunny"`
pub fn model_id(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub id: String,
    pub label: &'static str,
}

/// Resolves model ids to `<data_dir>/<id>.obj`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    data_dir: PathBuf,
}

impl ModelCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path for `id`; ids outside the reference list resolve the same way
    pub fn resolve(&self, id: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", id, MeshFormat::Obj.extension()))
    }

    pub fn models(&self) -> Vec<ModelEntry> {
        REFERENCE_MODELS
            .iter()
            .map(|&label| ModelEntry {
                id: model_id(label),
                label,
            })
            .collect()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new("data")
    }
}
