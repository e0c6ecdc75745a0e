//! Axis-aligned selection boxes.
//!
//! The X and Y bounds are inclusive while the Z bounds are exclusive. Points
//! sitting exactly on a Z face of the box are outside it; points on an X or Y
//! face are inside. Highlighted regions at the boundaries depend on this, so
//! the two kinds of interval must not be unified.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::UnknownPreset;

/// One axis of a selection box. `min > max` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min <= v <= max`
    pub fn contains_closed(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// `min < v < max`
    pub fn contains_open(&self, v: f64) -> bool {
        v > self.min && v < self.max
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionBox {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl SelectionBox {
    pub fn new(x: impl Into<AxisRange>, y: impl Into<AxisRange>, z: impl Into<AxisRange>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        is_inside(point, self)
    }
}

/// Closed on X and Y, open on Z.
pub fn is_inside(point: &Point3<f64>, selection: &SelectionBox) -> bool {
    selection.x.contains_closed(point.x)
        && selection.y.contains_closed(point.y)
        && selection.z.contains_open(point.z)
}

/// Named selection boxes for the reference body mesh
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Forearm,
    Foot,
    Head,
    /// The whole reference body
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Forearm, Preset::Foot, Preset::Head, Preset::Custom];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Forearm => "forearm",
            Self::Foot => "foot",
            Self::Head => "head",
            Self::Custom => "custom",
        }
    }

    pub fn selection_box(&self) -> SelectionBox {
        match self {
            Self::Forearm => SelectionBox::new((-0.05, 0.45), (0.25, 0.44), (-0.36, 0.0)),
            Self::Foot => SelectionBox::new((-0.78, 0.0), (-0.4, 0.44), (-0.83, -0.63)),
            Self::Head => SelectionBox::new((0.22, 0.45), (0.22, 0.44), (0.4, 0.68)),
            Self::Custom => SelectionBox::new((-0.78, 0.45), (-0.56, 0.44), (-0.83, 0.68)),
        }
    }
}

impl Default for SelectionBox {
    fn default() -> Self {
        Preset::default().selection_box()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPreset {
                name: s.to_string(),
            })
    }
}
