//! Two-stop color gradient keyed by vertex height.

use serde::{Deserialize, Serialize};

use crate::color::{Color, Rgb};
use crate::error::ColorError;
use crate::geometry::Mesh;

/// Lower end of the intensity window. Scalars at or below it map to the low
/// color, whatever the mesh's own minimum is.
pub const INTENSITY_FLOOR: f64 = -7.0;

/// Per-vertex intensities plus the scale that turns them into colors.
///
/// The renderer interpolates per vertex itself; [`GradientScale::sample`] is
/// there for consumers that need concrete colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientScale {
    pub low: Color,
    pub high: Color,
    pub cmin: f64,
    pub cmax: f64,
    /// One value per vertex, index-aligned with the mesh's vertices
    pub intensity: Vec<f64>,
}

impl GradientScale {
    /// Position of `scalar` inside the window, clamped to `[0, 1]`
    pub fn normalize(&self, scalar: f64) -> f64 {
        let span = self.cmax - self.cmin;
        if span <= 0.0 {
            return 0.0;
        }
        ((scalar - self.cmin) / span).clamp(0.0, 1.0)
    }

    pub fn sample(&self, scalar: f64) -> Result<Rgb, ColorError> {
        let low = self.low.to_rgb()?;
        let high = self.high.to_rgb()?;
        Ok(low.lerp(&high, self.normalize(scalar)))
    }

    /// Concrete color for every vertex
    pub fn vertex_colors(&self) -> Result<Vec<Rgb>, ColorError> {
        let low = self.low.to_rgb()?;
        let high = self.high.to_rgb()?;
        Ok(self
            .intensity
            .iter()
            .map(|&s| low.lerp(&high, self.normalize(s)))
            .collect())
    }
}

/// Build the gradient for an already reoriented mesh, using each vertex's Z
/// as its intensity.
pub fn map_gradient(mesh: &Mesh, low: &Color, high: &Color) -> GradientScale {
    let intensity: Vec<f64> = mesh.vertices.iter().map(|p| p.z).collect();
    let cmax = intensity
        .iter()
        .copied()
        .fold(None, |max: Option<f64>, z| Some(max.map_or(z, |m| m.max(z))))
        .unwrap_or(INTENSITY_FLOOR);

    GradientScale {
        low: low.clone(),
        high: high.clone(),
        cmin: INTENSITY_FLOOR,
        cmax,
        intensity,
    }
}
