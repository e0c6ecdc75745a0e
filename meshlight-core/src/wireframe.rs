//! Wireframe overlay as three polyline streams.

use serde::{Deserialize, Serialize};

use crate::geometry::Mesh;

/// Points emitted per triangle: A, B, C, A, then one break
pub const ENTRIES_PER_TRIANGLE: usize = 5;

/// Parallel X, Y and Z streams for a line renderer.
///
/// `None` is a pen-up break and serializes as `null`; consecutive `Some`
/// entries are joined by a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireframeBuffer {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
}

impl WireframeBuffer {
    pub fn with_capacity(entries: usize) -> Self {
        Self {
            x: Vec::with_capacity(entries),
            y: Vec::with_capacity(entries),
            z: Vec::with_capacity(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn push(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }
}

/// Trace every triangle as a closed loop, in triangle order
pub fn extract_wireframe(mesh: &Mesh) -> WireframeBuffer {
    let mut buffer = WireframeBuffer::with_capacity(ENTRIES_PER_TRIANGLE * mesh.triangle_count());

    for index in 0..mesh.triangle_count() {
        let corners = mesh.triangle_points(index);
        for k in 0..4 {
            let p = corners[k % 3];
            buffer.push(Some(p.x), Some(p.y), Some(p.z));
        }
        buffer.push(None, None, None);
    }

    buffer
}
