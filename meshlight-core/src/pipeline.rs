//! One request in, one render payload out.
//!
//! [`Pipeline::run`] loads the mesh, reorients it, colors it and traces its
//! wireframe. Nothing is cached between requests: a new UI interaction is a
//! new [`RenderRequest`], and a superseded result is simply dropped by the
//! caller.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::ModelCatalog;
use crate::classify::classify_faces;
use crate::color::{Color, WIREFRAME_COLOR};
use crate::config::Config;
use crate::error::{LoadError, PipelineError};
use crate::geometry::Mesh;
use crate::gradient::{map_gradient, GradientScale};
use crate::loader::{self, MeshFormat};
use crate::selection::SelectionBox;
use crate::transform::Transform;
use crate::wireframe::{extract_wireframe, WireframeBuffer};

/// How faces are colored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorSpec {
    /// Binary per-face coloring against the selection box
    Highlight { base: Color, highlight: Color },
    /// Per-vertex gradient by height; the selection box is not used
    Gradient { low: Color, high: Color },
}

/// Where the mesh comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshSource {
    Path(PathBuf),
    /// Resolved through the pipeline's [`ModelCatalog`]
    Model(String),
    /// Mesh text already in memory
    Inline { format: MeshFormat, contents: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub mesh: MeshSource,
    pub selection: SelectionBox,
    pub colors: ColorSpec,
}

/// Vertex coordinates and triangle corners as parallel columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
}

impl MeshBuffers {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut buffers = Self::default();
        for p in &mesh.vertices {
            buffers.x.push(p.x);
            buffers.y.push(p.y);
            buffers.z.push(p.z);
        }
        for &[a, b, c] in &mesh.triangles {
            buffers.i.push(a);
            buffers.j.push(b);
            buffers.k.push(c);
        }
        buffers
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Shading {
    /// One color per triangle
    FaceColors(Vec<Color>),
    Gradient(GradientScale),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient: f64,
    pub diffuse: f64,
    pub fresnel: f64,
    pub specular: f64,
    pub roughness: f64,
    pub facenormalsepsilon: f64,
    pub vertexnormalsepsilon: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.18,
            diffuse: 1.0,
            fresnel: 0.1,
            specular: 1.0,
            roughness: 0.05,
            facenormalsepsilon: 1e-15,
            vertexnormalsepsilon: 1e-15,
        }
    }
}

/// Fixed presentation settings the renderer needs alongside the buffers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub wireframe_color: Color,
    pub wireframe_width: f64,
    pub lighting: Lighting,
    pub light_position: [f64; 3],
    pub flat_shading: bool,
}

impl RenderStyle {
    pub fn for_colors(colors: &ColorSpec) -> Self {
        Self {
            wireframe_color: Color::from(WIREFRAME_COLOR),
            wireframe_width: 1.0,
            lighting: Lighting::default(),
            light_position: [100.0, 200.0, 500.0],
            flat_shading: matches!(colors, ColorSpec::Gradient { .. }),
        }
    }
}

/// Everything the external renderer consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub mesh: MeshBuffers,
    pub shading: Shading,
    pub wireframe: WireframeBuffer,
    pub style: RenderStyle,
}

/// Color and trace an already reoriented mesh
pub fn render(mesh: &Mesh, selection: &SelectionBox, colors: &ColorSpec) -> RenderOutput {
    let shading = match colors {
        ColorSpec::Highlight { base, highlight } => {
            let faces = classify_faces(mesh, selection, base, highlight);
            let highlighted = faces.iter().filter(|c| *c == highlight).count();
            log::debug!(
                "Highlighted {} of {} triangles.",
                highlighted,
                faces.len()
            );
            Shading::FaceColors(faces)
        }
        ColorSpec::Gradient { low, high } => Shading::Gradient(map_gradient(mesh, low, high)),
    };

    RenderOutput {
        mesh: MeshBuffers::from_mesh(mesh),
        shading,
        wireframe: extract_wireframe(mesh),
        style: RenderStyle::for_colors(colors),
    }
}

/// Stateless request runner; holds only where models live
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    catalog: ModelCatalog,
}

impl Pipeline {
    pub fn new(catalog: ModelCatalog) -> Self {
        Self { catalog }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.catalog())
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Read the raw, not yet reoriented mesh
    pub fn load(&self, source: &MeshSource) -> Result<Mesh, LoadError> {
        match source {
            MeshSource::Path(path) => loader::load_mesh(path),
            MeshSource::Model(id) => loader::load_mesh(self.catalog.resolve(id)),
            MeshSource::Inline { format, contents } => {
                loader::parse_mesh(*format, contents.as_bytes())
            }
        }
    }

    /// Load and reorient
    pub fn prepare(&self, source: &MeshSource) -> Result<Mesh, LoadError> {
        Ok(Transform::reorient(&self.load(source)?))
    }

    pub fn run(&self, request: &RenderRequest) -> Result<RenderOutput, PipelineError> {
        let mesh = self.prepare(&request.mesh)?;
        Ok(render(&mesh, &request.selection, &request.colors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn inline(contents: &str) -> MeshSource {
        MeshSource::Inline {
            format: MeshFormat::Obj,
            contents: contents.to_string(),
        }
    }

    fn highlight_spec() -> ColorSpec {
        ColorSpec::Highlight {
            base: Color::from("rgb(207,181,59)"),
            highlight: Color::from("rgb(1, 0, 79)"),
        }
    }

    #[test]
    fn test_render_highlight() {
        let mesh = Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let selection = SelectionBox::new((-1.0, 2.0), (-1.0, 2.0), (-1.0, 1.0));
        let out = render(&mesh, &selection, &highlight_spec());

        assert_eq!(
            out.shading,
            Shading::FaceColors(vec![Color::from("rgb(1, 0, 79)")])
        );
        assert_eq!(out.mesh.i, vec![0]);
        assert_eq!(out.mesh.k, vec![2]);
        assert_eq!(out.wireframe.len(), 5);
        assert!(!out.style.flat_shading);
    }

    #[test]
    fn test_run_reorients_before_coloring() {
        let request = RenderRequest {
            mesh: inline(TRIANGLE_OBJ),
            selection: SelectionBox::new((-1.0, 2.0), (-1.0, 2.0), (-1.0, 1.0)),
            colors: highlight_spec(),
        };
        let out = Pipeline::default().run(&request).unwrap();

        let r = Transform::reorientation();
        let turned = r * nalgebra::Vector3::new(0.0, 1.0, 0.0);
        assert!((out.mesh.x[2] - turned.x).abs() < 1e-12);
        assert!((out.mesh.z[2] - turned.z).abs() < 1e-12);
        assert_eq!(
            out.shading,
            Shading::FaceColors(vec![Color::from("rgb(1, 0, 79)")])
        );
    }

    #[test]
    fn test_gradient_ignores_selection() {
        let colors = ColorSpec::Gradient {
            low: Color::from("rgb(0, 0, 255)"),
            high: Color::from("rgb(255, 255, 255)"),
        };
        let pipeline = Pipeline::default();
        let narrow = RenderRequest {
            mesh: inline(TRIANGLE_OBJ),
            selection: SelectionBox::new((0.0, 0.0), (0.0, 0.0), (0.0, 0.0)),
            colors: colors.clone(),
        };
        let wide = RenderRequest {
            selection: SelectionBox::new((-9.0, 9.0), (-9.0, 9.0), (-9.0, 9.0)),
            ..narrow.clone()
        };

        let a = pipeline.run(&narrow).unwrap();
        let b = pipeline.run(&wide).unwrap();
        assert_eq!(a, b);
        assert!(a.style.flat_shading);
        match a.shading {
            Shading::Gradient(scale) => assert_eq!(scale.intensity, a.mesh.z),
            other => panic!("expected gradient, got {:?}", other),
        }
    }

    #[test]
    fn test_load_error_surfaces() {
        let request = RenderRequest {
            mesh: inline("v 0 0 0\n"),
            selection: SelectionBox::default(),
            colors: highlight_spec(),
        };
        assert!(matches!(
            Pipeline::default().run(&request),
            Err(PipelineError::Load(LoadError::NoTriangles))
        ));
    }

    #[test]
    fn test_model_source_uses_catalog() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lucy.obj"), TRIANGLE_OBJ).unwrap();

        let pipeline = Pipeline::new(ModelCatalog::new(dir.path()));
        let mesh = pipeline.load(&MeshSource::Model("lucy".to_string())).unwrap();
        assert_eq!(mesh.triangle_count(), 1);

        assert!(matches!(
            pipeline.load(&MeshSource::Model("homer_simpson".to_string())),
            Err(LoadError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_payload_json_shape() {
        let request = RenderRequest {
            mesh: inline(TRIANGLE_OBJ),
            selection: SelectionBox::default(),
            colors: highlight_spec(),
        };
        let out = Pipeline::default().run(&request).unwrap();
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["shading"]["kind"], "face_colors");
        assert_eq!(json["shading"]["data"][0], "rgb(207,181,59)");
        assert!(json["wireframe"]["z"][4].is_null());
        assert_eq!(json["style"]["wireframe_color"], "rgb(70,70,70)");
    }

    #[test]
    fn test_request_deserializes() {
        let request: RenderRequest = serde_json::from_str(
            r##"{
                "mesh": {"model": "human"},
                "selection": {
                    "x": {"min": -0.05, "max": 0.45},
                    "y": {"min": 0.25, "max": 0.44},
                    "z": {"min": -0.36, "max": 0.0}
                },
                "colors": {"mode": "gradient", "low": "rgb(0, 0, 255)", "high": "#fff"}
            }"##,
        )
        .unwrap();

        assert_eq!(request.mesh, MeshSource::Model("human".to_string()));
        assert_eq!(request.selection, SelectionBox::default());
        assert!(matches!(request.colors, ColorSpec::Gradient { .. }));
    }
}
