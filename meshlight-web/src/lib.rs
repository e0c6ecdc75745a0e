/// Meshlight Web - WASM bindings for a JavaScript plotting front-end
///
/// The page hands over OBJ text and the current widget values; each call
/// runs one pipeline request and returns the render payload as a plain JS
/// object. Wireframe breaks arrive as `null`.
use meshlight_core::{
    Color, ColorSpec, MeshFormat, MeshSource, Pipeline, Preset, RenderOutput, RenderRequest,
    SelectionBox,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebPipeline {
    pipeline: Pipeline,
}

#[wasm_bindgen]
impl WebPipeline {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebPipeline {
        WebPipeline {
            pipeline: Pipeline::default(),
        }
    }

    /// Color the faces of `obj_text` that lie inside the box
    #[allow(clippy::too_many_arguments)]
    pub fn render_highlight(
        &self,
        obj_text: &str,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        z_min: f64,
        z_max: f64,
        base: &str,
        highlight: &str,
    ) -> Result<JsValue, JsValue> {
        let selection = SelectionBox::new((x_min, x_max), (y_min, y_max), (z_min, z_max));
        let output = self
            .highlight_output(obj_text, selection, base, highlight)
            .map_err(|e| JsValue::from_str(&e))?;
        to_js(&output)
    }

    /// Shade `obj_text` with a two-color height gradient
    pub fn render_gradient(&self, obj_text: &str, low: &str, high: &str) -> Result<JsValue, JsValue> {
        let output = self
            .gradient_output(obj_text, low, high)
            .map_err(|e| JsValue::from_str(&e))?;
        to_js(&output)
    }
}

impl WebPipeline {
    fn highlight_output(
        &self,
        obj_text: &str,
        selection: SelectionBox,
        base: &str,
        highlight: &str,
    ) -> Result<RenderOutput, String> {
        self.run(
            obj_text,
            selection,
            ColorSpec::Highlight {
                base: Color::from(base),
                highlight: Color::from(highlight),
            },
        )
    }

    fn gradient_output(&self, obj_text: &str, low: &str, high: &str) -> Result<RenderOutput, String> {
        self.run(
            obj_text,
            SelectionBox::default(),
            ColorSpec::Gradient {
                low: Color::from(low),
                high: Color::from(high),
            },
        )
    }

    fn run(
        &self,
        obj_text: &str,
        selection: SelectionBox,
        colors: ColorSpec,
    ) -> Result<RenderOutput, String> {
        let request = RenderRequest {
            mesh: MeshSource::Inline {
                format: MeshFormat::Obj,
                contents: obj_text.to_string(),
            },
            selection,
            colors,
        };
        self.pipeline.run(&request).map_err(|e| e.to_string())
    }
}

impl Default for WebPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Selection box for a named preset, as `{x: {min, max}, y: ..., z: ...}`
#[wasm_bindgen]
pub fn preset_box(name: &str) -> Result<JsValue, JsValue> {
    let preset: Preset = name.parse().map_err(|e: meshlight_core::UnknownPreset| {
        JsValue::from_str(&e.to_string())
    })?;
    to_js(&preset.selection_box())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // json_compatible turns None into null rather than undefined
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}
