/// Wavefront OBJ parser
///
/// Reads `v` and `f` statements; everything else (normals, texture
/// coordinates, groups, materials) is skipped. Only three-corner faces become
/// triangles; larger polygons and `l` polylines are counted as ignored cells.
use nalgebra::Point3;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{i64 as index, space0, space1},
    combinator::{all_consuming, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::LoadError;
use crate::geometry::Mesh;
use crate::loader::{MeshFormat, ParsedMesh};

/// Parse OBJ text into an indexed mesh
pub fn parse_obj(input: &str) -> Result<ParsedMesh, LoadError> {
    let mut mesh = Mesh::new();
    let mut ignored_cells = 0;

    for (line_index, raw_line) in input.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.trim();
        let keyword = match line.split_whitespace().next() {
            Some(keyword) if !keyword.starts_with('#') => keyword,
            _ => continue,
        };
        let body = &line[keyword.len()..];

        match keyword {
            "v" => {
                let (_, position) =
                    parse_position(body).map_err(|e| malformed(line_number, "vertex", e))?;
                mesh.add_vertex(position);
            }
            "f" => {
                let (_, corners) =
                    parse_face(body).map_err(|e| malformed(line_number, "face", e))?;

                if corners.len() != 3 {
                    ignored_cells += 1;
                    continue;
                }

                // Faces are numbered by triangle, as in the loader's bounds check
                let face = mesh.triangle_count();
                let mut triangle = [0usize; 3];
                for (slot, &corner) in triangle.iter_mut().zip(&corners) {
                    *slot = resolve_index(corner, mesh.vertex_count(), face, line_number)?;
                }
                mesh.add_triangle(triangle);
            }
            "l" => ignored_cells += 1,
            _ => {}
        }
    }

    Ok(ParsedMesh {
        mesh,
        ignored_cells,
    })
}

/// OBJ indices are 1-based; negative values count back from the latest vertex
fn resolve_index(
    raw: i64,
    vertex_count: usize,
    face: usize,
    line: usize,
) -> Result<usize, LoadError> {
    if raw == 0 {
        return Err(LoadError::Malformed {
            format: MeshFormat::Obj,
            line,
            message: "vertex index 0 is not valid".to_string(),
        });
    }

    let resolved = if raw > 0 {
        raw - 1
    } else {
        vertex_count as i64 + raw
    };

    // Positive indices may point ahead; they are checked once the whole file is read
    usize::try_from(resolved).map_err(|_| LoadError::IndexOutOfRange {
        face,
        index: raw,
        vertex_count,
    })
}

fn malformed(line: usize, what: &str, err: nom::Err<nom::error::Error<&str>>) -> LoadError {
    let message = match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            format!("invalid {} statement near {:?}", what, e.input.trim())
        }
        nom::Err::Incomplete(_) => format!("incomplete {} statement", what),
    };
    LoadError::Malformed {
        format: MeshFormat::Obj,
        line,
        message,
    }
}

/// `x y z` with any trailing components (w, vertex colors) ignored
fn parse_position(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, x) = preceded(space1, double)(input)?;
    let (input, y) = preceded(space1, double)(input)?;
    let (input, z) = preceded(space1, double)(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    all_consuming(terminated(
        preceded(space1, separated_list1(space1, parse_corner)),
        space0,
    ))(input)
}

/// One face corner: `v`, `v/vt`, `v//vn` or `v/vt/vn`; only `v` is kept
fn parse_corner(input: &str) -> IResult<&str, i64> {
    let (input, vertex) = index(input)?;
    let (input, _) = opt(preceded(
        tag("/"),
        take_till(|c: char| c.is_whitespace()),
    ))(input)?;
    Ok((input, vertex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_triangle() {
        let parsed = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(parsed.mesh.vertex_count(), 3);
        assert_eq!(parsed.mesh.triangles, vec![[0, 1, 2]]);
        assert_eq!(parsed.ignored_cells, 0);
        assert_eq!(parsed.mesh.vertices[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_slash_forms_and_negative_indices() {
        let input = "\
# exported mesh
o body
v 0.0 0.0 0.0 1.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 1.0 1.0 0.5
vt 0.0 0.0
vn 0.0 0.0 1.0
usemtl skin
s off
f 1/1/1 2/1/1 3/1/1
f 2//1 4//1 3//1
f -3/1 -1 -2
";
        let parsed = parse_obj(input).unwrap();
        assert_eq!(
            parsed.mesh.triangles,
            vec![[0, 1, 2], [1, 3, 2], [1, 3, 2]]
        );
    }

    #[test]
    fn test_quads_and_lines_are_ignored() {
        let input = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
l 1 2
f 1 2 3
";
        let parsed = parse_obj(input).unwrap();
        assert_eq!(parsed.mesh.triangles, vec![[0, 1, 2]]);
        assert_eq!(parsed.ignored_cells, 2);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let parsed = parse_obj("v 0 0 0\r\n\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n").unwrap();
        assert_eq!(parsed.mesh.triangle_count(), 1);
    }

    #[test]
    fn test_scientific_notation() {
        let parsed = parse_obj("v 1e-3 -2.5E2 +4\n").unwrap();
        let v = parsed.mesh.vertices[0];
        assert!((v.x - 0.001).abs() < 1e-12);
        assert!((v.y + 250.0).abs() < 1e-12);
        assert!((v.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        match parse_obj("v 0 0 0\nv 1 zero 0\n") {
            Err(LoadError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_face_reports_line() {
        match parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 x\n") {
            Err(LoadError::Malformed { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_index_is_malformed() {
        assert!(matches!(
            parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n"),
            Err(LoadError::Malformed { line: 4, .. })
        ));
    }

    #[test]
    fn test_negative_index_before_any_vertex() {
        assert!(matches!(
            parse_obj("v 0 0 0\nf -1 -2 -3\n"),
            Err(LoadError::IndexOutOfRange { index: -2, .. })
        ));
    }

    #[test]
    fn test_out_of_range_face_counts_triangles_only() {
        let input = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
f 1 2 3
f -1 -2 -9
";
        match parse_obj(input) {
            Err(LoadError::IndexOutOfRange { face, index, .. }) => {
                assert_eq!(face, 1);
                assert_eq!(index, -9);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }
    }
}
