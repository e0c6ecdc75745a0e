/// Meshlight Core Library - Mesh loading, selection and coloring
///
/// This library provides the stateless core of the viewer: OBJ/STL loading,
/// the fixed display reorientation, box selection, face and gradient
/// coloring, and the wireframe overlay. It produces buffers for an external
/// renderer and never draws anything itself.

pub mod catalog;
pub mod classify;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod loader;
pub mod obj;
pub mod pipeline;
pub mod selection;
pub mod stl;
pub mod transform;
pub mod wireframe;

// Re-export commonly used types
pub use catalog::{ModelCatalog, DEFAULT_MODEL};
pub use classify::{classify_faces, highlight_mask};
pub use color::{Color, Rgb};
pub use config::Config;
pub use error::{ColorError, ConfigError, LoadError, PipelineError, UnknownPreset};
pub use geometry::{Mesh, Triangle};
pub use gradient::{map_gradient, GradientScale, INTENSITY_FLOOR};
pub use loader::{load_mesh, parse_mesh, MeshFormat};
pub use pipeline::{
    render, ColorSpec, MeshBuffers, MeshSource, Pipeline, RenderOutput, RenderRequest,
    RenderStyle, Shading,
};
pub use selection::{is_inside, AxisRange, Preset, SelectionBox};
pub use transform::{Transform, TILT_ANGLE, TURN_ANGLE};
pub use wireframe::{extract_wireframe, WireframeBuffer};
