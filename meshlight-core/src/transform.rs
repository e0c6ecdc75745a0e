/// Fixed reorientation applied to every loaded mesh
use std::f64::consts::PI;

use nalgebra::{Matrix3, Point3};

use crate::geometry::Mesh;

/// Tilt about the X axis, applied first (θ1)
pub const TILT_ANGLE: f64 = PI / 4.0;

/// Turn about the Z axis, applied after the tilt (θ2)
pub const TURN_ANGLE: f64 = 4.0 * PI / 9.0 + PI / 4.0;

/// Rotation builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Right-handed rotation about the X axis
    pub fn rotation_x(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0,   c,  -s,
            0.0,   s,   c,
        );
        matrix
    }

    /// Right-handed rotation about the Z axis
    pub fn rotation_z(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix3::new(
              c,  -s, 0.0,
              s,   c, 0.0,
            0.0, 0.0, 1.0,
        );
        matrix
    }

    /// `Rz(TURN_ANGLE) * Rx(TILT_ANGLE)`
    pub fn reorientation() -> Matrix3<f64> {
        Self::rotation_z(TURN_ANGLE) * Self::rotation_x(TILT_ANGLE)
    }

    /// Apply `matrix` to every vertex, keeping vertex order and triangles
    pub fn apply(matrix: &Matrix3<f64>, mesh: &Mesh) -> Mesh {
        let vertices = mesh
            .vertices
            .iter()
            .map(|p| Point3::from(matrix * p.coords))
            .collect();

        Mesh::from_parts(vertices, mesh.triangles.clone())
    }

    /// Rotate a freshly loaded mesh into display orientation
    pub fn reorient(mesh: &Mesh) -> Mesh {
        Self::apply(&Self::reorientation(), mesh)
    }
}
