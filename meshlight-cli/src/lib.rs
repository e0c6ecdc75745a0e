/// Command-line front-end for the mesh pipeline
///
/// Each invocation is one pipeline request. The render payload goes to
/// stdout (or `--out`) as JSON for whatever plotter draws it.
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use meshlight_core::{
    highlight_mask, Color, ColorSpec, Config, MeshSource, Pipeline, Preset, RenderOutput,
    RenderRequest, SelectionBox,
};

#[derive(Debug, Parser)]
#[command(
    name = "meshlight",
    version,
    about = "Prepare highlighted or gradient-shaded mesh payloads for a 3D plotter"
)]
pub struct Cli {
    /// TOML config file (data directory, default model, default colors)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Color the triangles that lie inside a selection box
    Highlight(HighlightArgs),
    /// Shade the mesh with a two-color height gradient
    Gradient(GradientArgs),
    /// Print mesh statistics after reorientation
    Info(InfoArgs),
    /// List the reference models and the files they resolve to
    Models,
}

#[derive(Debug, Args)]
pub struct MeshArgs {
    /// Model id from the catalog, e.g. stanford_bunny
    #[arg(long, conflicts_with = "file")]
    pub model: Option<String>,

    /// Mesh file (.obj or .stl)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BoxArgs {
    /// Start from a named box: forearm, foot, head or custom
    #[arg(long)]
    pub preset: Option<Preset>,

    /// X range, inclusive
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true
    )]
    pub x: Option<Vec<f64>>,

    /// Y range, inclusive
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true
    )]
    pub y: Option<Vec<f64>>,

    /// Z range, exclusive
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        value_names = ["MIN", "MAX"],
        allow_negative_numbers = true
    )]
    pub z: Option<Vec<f64>>,
}

impl BoxArgs {
    pub fn is_given(&self) -> bool {
        self.preset.is_some() || self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    /// The preset box (forearm by default) with any explicit axes laid over it
    pub fn selection(&self) -> SelectionBox {
        let mut selection = self.preset.unwrap_or_default().selection_box();
        if let Some(&[min, max]) = self.x.as_deref() {
            selection.x = (min, max).into();
        }
        if let Some(&[min, max]) = self.y.as_deref() {
            selection.y = (min, max).into();
        }
        if let Some(&[min, max]) = self.z.as_deref() {
            selection.z = (min, max).into();
        }
        selection
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Write the payload here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Indent the JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct HighlightArgs {
    #[command(flatten)]
    pub mesh: MeshArgs,

    #[command(flatten)]
    pub selection: BoxArgs,

    /// Color of faces outside the box
    #[arg(long)]
    pub base: Option<String>,

    /// Color of faces fully inside the box
    #[arg(long)]
    pub highlight: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct GradientArgs {
    #[command(flatten)]
    pub mesh: MeshArgs,

    /// Color at the intensity floor
    #[arg(long)]
    pub low: Option<String>,

    /// Color at the highest vertex
    #[arg(long)]
    pub high: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub mesh: MeshArgs,

    // Counted only when a preset or axis is given
    #[command(flatten)]
    pub selection: BoxArgs,
}

/// Main application struct for one command-line request
pub struct App {
    config: Config,
    pipeline: Pipeline,
}

impl App {
    pub fn new(config: Config) -> Self {
        let pipeline = Pipeline::from_config(&config);
        Self { config, pipeline }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        Ok(Self::new(config))
    }

    pub fn execute<W: Write>(&self, command: &Command, out: &mut W) -> Result<()> {
        match command {
            Command::Highlight(args) => {
                let defaults = &self.config.highlight;
                let request = RenderRequest {
                    mesh: self.mesh_source(&args.mesh),
                    selection: args.selection.selection(),
                    colors: ColorSpec::Highlight {
                        base: pick(&args.base, &defaults.base),
                        highlight: pick(&args.highlight, &defaults.highlight),
                    },
                };
                let output = self.render(&request)?;
                self.emit(&output, &args.output, out)
            }
            Command::Gradient(args) => {
                let defaults = &self.config.gradient;
                let request = RenderRequest {
                    mesh: self.mesh_source(&args.mesh),
                    selection: SelectionBox::default(),
                    colors: ColorSpec::Gradient {
                        low: pick(&args.low, &defaults.low),
                        high: pick(&args.high, &defaults.high),
                    },
                };
                let output = self.render(&request)?;
                self.emit(&output, &args.output, out)
            }
            Command::Info(args) => self.info(args, out),
            Command::Models => {
                let catalog = self.pipeline.catalog();
                for model in catalog.models() {
                    writeln!(
                        out,
                        "{:<16}{:<18}{}",
                        model.id,
                        model.label,
                        catalog.resolve(&model.id).display()
                    )?;
                }
                Ok(())
            }
        }
    }

    fn mesh_source(&self, args: &MeshArgs) -> MeshSource {
        match (&args.file, &args.model) {
            (Some(path), _) => MeshSource::Path(path.clone()),
            (None, Some(id)) => MeshSource::Model(id.clone()),
            (None, None) => MeshSource::Model(self.config.default_model.clone()),
        }
    }

    fn render(&self, request: &RenderRequest) -> Result<RenderOutput> {
        self.pipeline
            .run(request)
            .with_context(|| format!("failed to process {}", describe(&request.mesh)))
    }

    fn emit<W: Write>(&self, output: &RenderOutput, args: &OutputArgs, out: &mut W) -> Result<()> {
        let json = if args.pretty {
            serde_json::to_string_pretty(output)?
        } else {
            serde_json::to_string(output)?
        };

        match &args.out {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("Wrote render payload to: {}.", path.display());
            }
            None => writeln!(out, "{}", json)?,
        }
        Ok(())
    }

    fn info<W: Write>(&self, args: &InfoArgs, out: &mut W) -> Result<()> {
        let source = self.mesh_source(&args.mesh);
        let mesh = self
            .pipeline
            .prepare(&source)
            .with_context(|| format!("failed to process {}", describe(&source)))?;

        writeln!(out, "mesh:      {}", describe(&source))?;
        writeln!(out, "vertices:  {}", mesh.vertex_count())?;
        writeln!(out, "triangles: {}", mesh.triangle_count())?;
        if let Some((min, max)) = mesh.bounds() {
            writeln!(out, "x:         [{:.4}, {:.4}]", min.x, max.x)?;
            writeln!(out, "y:         [{:.4}, {:.4}]", min.y, max.y)?;
            writeln!(out, "z:         [{:.4}, {:.4}]", min.z, max.z)?;
        }

        if args.selection.is_given() {
            let highlighted = highlight_mask(&mesh, &args.selection.selection())
                .into_iter()
                .filter(|&inside| inside)
                .count();
            writeln!(
                out,
                "selected:  {} of {}",
                highlighted,
                mesh.triangle_count()
            )?;
        }
        Ok(())
    }
}

fn pick(flag: &Option<String>, fallback: &Color) -> Color {
    flag.as_deref().map(Color::from).unwrap_or_else(|| fallback.clone())
}

fn describe(source: &MeshSource) -> String {
    match source {
        MeshSource::Path(path) => path.display().to_string(),
        MeshSource::Model(id) => format!("model {}", id),
        MeshSource::Inline { format, .. } => format!("inline {} mesh", format),
    }
}

/// Run a parsed command line against stdout
pub fn run(cli: Cli) -> Result<()> {
    let app = App::from_cli(&cli)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    app.execute(&cli.command, &mut handle)?;
    handle.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshlight_core::AxisRange;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("meshlight").chain(args.iter().copied())).unwrap()
    }

    fn triangle_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("tri.obj");
        fs::write(&path, TRIANGLE_OBJ).unwrap();
        path
    }

    fn execute(cli: &Cli) -> String {
        let mut out = Vec::new();
        App::from_cli(cli)
            .unwrap()
            .execute(&cli.command, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_axis_flags_override_preset() {
        let cli = parse(&["highlight", "--preset", "head", "--z", "-1", "1.5"]);
        let Command::Highlight(args) = cli.command else {
            panic!("expected highlight");
        };

        let selection = args.selection.selection();
        assert_eq!(selection.x, Preset::Head.selection_box().x);
        assert_eq!(selection.z, AxisRange::new(-1.0, 1.5));
    }

    #[test]
    fn test_repeated_axis_flag_is_rejected() {
        assert!(Cli::try_parse_from([
            "meshlight", "highlight", "--x", "-1", "2", "--x", "-3", "4",
        ])
        .is_err());

        let cli = parse(&["highlight", "--x", "-3", "4"]);
        let Command::Highlight(args) = cli.command else {
            panic!("expected highlight");
        };
        assert_eq!(args.selection.selection().x, AxisRange::new(-3.0, 4.0));
    }

    #[test]
    fn test_default_box_is_forearm() {
        let cli = parse(&["highlight"]);
        let Command::Highlight(args) = cli.command else {
            panic!("expected highlight");
        };
        assert!(!args.selection.is_given());
        assert_eq!(args.selection.selection(), Preset::Forearm.selection_box());
    }

    #[test]
    fn test_rejects_unknown_preset_and_conflicting_sources() {
        assert!(Cli::try_parse_from(["meshlight", "highlight", "--preset", "elbow"]).is_err());
        assert!(Cli::try_parse_from([
            "meshlight", "info", "--model", "lucy", "--file", "lucy.obj"
        ])
        .is_err());
    }

    #[test]
    fn test_highlight_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = triangle_file(&dir);
        let cli = parse(&[
            "highlight",
            "--file",
            path.to_str().unwrap(),
            "--x",
            "-1",
            "2",
            "--y",
            "-1",
            "2",
            "--z",
            "-1",
            "1",
            "--highlight",
            "#ff0000",
        ]);

        let json: serde_json::Value = serde_json::from_str(&execute(&cli)).unwrap();
        assert_eq!(json["shading"]["kind"], "face_colors");
        assert_eq!(json["shading"]["data"][0], "#ff0000");
        assert_eq!(json["wireframe"]["x"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_gradient_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = triangle_file(&dir);
        let out_path = dir.path().join("payload.json");
        let cli = parse(&[
            "gradient",
            "--file",
            path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
            "--pretty",
        ]);

        assert_eq!(execute(&cli), "");
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(json["shading"]["kind"], "gradient");
        assert_eq!(json["shading"]["data"]["cmin"], -7.0);
        assert_eq!(json["shading"]["data"]["low"], "rgb(0, 0, 255)");
    }

    #[test]
    fn test_info_counts_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = triangle_file(&dir);
        let cli = parse(&[
            "info",
            "--file",
            path.to_str().unwrap(),
            "--x",
            "-1",
            "2",
            "--y",
            "-1",
            "2",
            "--z",
            "-1",
            "1",
        ]);

        let text = execute(&cli);
        assert!(text.contains("vertices:  3"));
        assert!(text.contains("triangles: 1"));
        assert!(text.contains("selected:  1 of 1"));
    }

    #[test]
    fn test_models_use_config_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("meshlight.toml");
        fs::write(&config_path, "data_dir = \"/srv/meshes\"\n").unwrap();

        let cli = parse(&["--config", config_path.to_str().unwrap(), "models"]);
        let text = execute(&cli);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("/srv/meshes/xyz_dragon.obj"));
    }

    #[test]
    fn test_missing_model_reports_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let cli = parse(&["highlight", "--model", "lucy"]);

        let err = App::new(config)
            .execute(&cli.command, &mut Vec::new())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("model lucy"));
    }
}
