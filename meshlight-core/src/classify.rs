//! Per-triangle highlighting against a selection box.

use crate::color::Color;
use crate::geometry::Mesh;
use crate::selection::{is_inside, SelectionBox};

/// `true` for each triangle whose three corners are all inside `selection`.
///
/// Index `i` of the result belongs to triangle `i`.
pub fn highlight_mask(mesh: &Mesh, selection: &SelectionBox) -> Vec<bool> {
    mesh.triangles
        .iter()
        .map(|tri| tri.iter().all(|&v| is_inside(&mesh.vertices[v], selection)))
        .collect()
}

/// One color per triangle: `highlight` for fully contained triangles, `base`
/// for everything else, partially contained ones included.
pub fn classify_faces(
    mesh: &Mesh,
    selection: &SelectionBox,
    base: &Color,
    highlight: &Color,
) -> Vec<Color> {
    highlight_mask(mesh, selection)
        .into_iter()
        .map(|inside| if inside { highlight.clone() } else { base.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn base() -> Color {
        Color::from("rgb(207,181,59)")
    }

    fn highlight() -> Color {
        Color::from("rgb(1, 0, 79)")
    }

    fn unit_triangle() -> Mesh {
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_triangle_inside_box_is_highlighted() {
        let selection = SelectionBox::new((-1.0, 2.0), (-1.0, 2.0), (-1.0, 1.0));
        let colors = classify_faces(&unit_triangle(), &selection, &base(), &highlight());
        assert_eq!(colors, vec![highlight()]);
    }

    #[test]
    fn test_triangle_on_open_z_bound_is_not_highlighted() {
        // z = 0 is not strictly below z_max = 0
        let selection = SelectionBox::new((-1.0, 2.0), (-1.0, 2.0), (-1.0, 0.0));
        let colors = classify_faces(&unit_triangle(), &selection, &base(), &highlight());
        assert_eq!(colors, vec![base()]);

        let selection = SelectionBox::new((-1.0, 2.0), (-1.0, 2.0), (0.0, 1.0));
        assert_eq!(highlight_mask(&unit_triangle(), &selection), vec![false]);
    }

    #[test]
    fn test_triangle_on_closed_x_bounds_is_highlighted() {
        // x spans exactly [0, 1], y exactly [0, 1]
        let selection = SelectionBox::new((0.0, 1.0), (0.0, 1.0), (-1.0, 1.0));
        assert_eq!(highlight_mask(&unit_triangle(), &selection), vec![true]);
    }

    #[test]
    fn test_partial_containment_is_not_highlighted() {
        // Only the corner at x = 1 falls outside
        let selection = SelectionBox::new((-1.0, 0.5), (-1.0, 2.0), (-1.0, 1.0));
        assert_eq!(highlight_mask(&unit_triangle(), &selection), vec![false]);
    }

    #[test]
    fn test_buffer_sized_by_triangle_count() {
        let cube = Mesh::cube(2.0);
        let selection = SelectionBox::new((-5.0, 5.0), (-5.0, 5.0), (-5.0, 5.0));
        let colors = classify_faces(&cube, &selection, &base(), &highlight());

        assert_eq!(colors.len(), cube.triangle_count());
        assert_ne!(colors.len(), cube.vertex_count());
        assert!(colors.iter().all(|c| *c == highlight()));
    }

    #[test]
    fn test_mixed_faces_keep_triangle_order() {
        // Select the +z half of a cube: only the two front triangles are
        // entirely inside
        let cube = Mesh::cube(2.0);
        let selection = SelectionBox::new((-1.0, 1.0), (-1.0, 1.0), (0.0, 2.0));
        let mask = highlight_mask(&cube, &selection);

        let expected: Vec<bool> = (0..12).map(|i| i < 2).collect();
        assert_eq!(mask, expected);
    }

    #[test]
    fn test_inverted_box_gives_all_base() {
        let selection = SelectionBox::new((2.0, -2.0), (-2.0, 2.0), (-2.0, 2.0));
        let colors = classify_faces(&Mesh::cube(2.0), &selection, &base(), &highlight());
        assert_eq!(colors, vec![base(); 12]);
    }
}
