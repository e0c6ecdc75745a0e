/// STL file parser for binary and ASCII formats
///
/// STL stores each facet with its own copy of the corner positions. Corners
/// with bit-identical coordinates are welded so the result is indexed.
use std::collections::HashMap;

use nalgebra::Point3;
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::{double, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::LoadError;
use crate::geometry::Mesh;
use crate::loader::{MeshFormat, ParsedMesh};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Builds an indexed mesh from a triangle soup
struct Welder {
    mesh: Mesh,
    seen: HashMap<[u64; 3], usize>,
}

impl Welder {
    fn with_capacity(triangles: usize) -> Self {
        Self {
            mesh: Mesh::with_capacity(triangles / 2, triangles),
            seen: HashMap::with_capacity(triangles / 2),
        }
    }

    fn vertex(&mut self, p: Point3<f64>) -> usize {
        let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        let mesh = &mut self.mesh;
        *self.seen.entry(key).or_insert_with(|| mesh.add_vertex(p))
    }

    fn triangle(&mut self, corners: [Point3<f64>; 3]) {
        let [a, b, c] = corners;
        let triangle = [self.vertex(a), self.vertex(b), self.vertex(c)];
        self.mesh.add_triangle(triangle);
    }

    fn finish(self) -> ParsedMesh {
        ParsedMesh {
            mesh: self.mesh,
            ignored_cells: 0,
        }
    }
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<ParsedMesh, LoadError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(LoadError::invalid_content(
            MeshFormat::Stl,
            "file too small to be a valid STL",
        ));
    }

    // Skip 80-byte header
    let (body, triangle_count) = le_u32::<_, nom::error::Error<&[u8]>>(&data[HEADER_LEN..])
        .map_err(|_| LoadError::invalid_content(MeshFormat::Stl, "missing triangle count"))?;
    let triangle_count = triangle_count as usize;

    if body.len() < triangle_count * FACET_LEN {
        return Err(LoadError::invalid_content(
            MeshFormat::Stl,
            format!(
                "header declares {} triangles but only {} bytes of facet data follow",
                triangle_count,
                body.len()
            ),
        ));
    }

    let mut welder = Welder::with_capacity(triangle_count);
    for facet in body.chunks_exact(FACET_LEN).take(triangle_count) {
        let (_, corners) = binary_facet(facet)
            .map_err(|_| LoadError::invalid_content(MeshFormat::Stl, "truncated facet"))?;
        welder.triangle(corners);
    }

    Ok(welder.finish())
}

/// Normal (ignored), three corners, attribute byte count (ignored)
fn binary_facet(input: &[u8]) -> IResult<&[u8], [Point3<f64>; 3]> {
    let (input, _normal) = tuple((le_f32, le_f32, le_f32))(input)?;
    let (input, a) = binary_point(input)?;
    let (input, b) = binary_point(input)?;
    let (input, c) = binary_point(input)?;
    let (input, _attributes) = le_u16(input)?;
    Ok((input, [a, b, c]))
}

fn binary_point(input: &[u8]) -> IResult<&[u8], Point3<f64>> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Point3::new(x as f64, y as f64, z as f64)))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<ParsedMesh, LoadError> {
    match parse_ascii_stl_impl(input) {
        Ok((_, facets)) => {
            let mut welder = Welder::with_capacity(facets.len());
            for corners in facets {
                welder.triangle(corners);
            }
            Ok(welder.finish())
        }
        Err(e) => Err(LoadError::invalid_content(
            MeshFormat::Stl,
            ascii_error_message(input, e),
        )),
    }
}

/// Error kind and byte offset, without echoing the rest of the file
fn ascii_error_message(input: &str, err: nom::Err<nom::error::Error<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => format!(
            "failed to parse ASCII STL: {:?} at byte {}",
            e.code,
            input.len() - e.input.len()
        ),
        nom::Err::Incomplete(_) => "failed to parse ASCII STL: unexpected end of input".to_string(),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Vec<[Point3<f64>; 3]>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, facets))
}

fn parse_facet(input: &str) -> IResult<&str, [Point3<f64>; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, [v1, v2, v3]))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, Point3::new(x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<ParsedMesh, LoadError> {
    // Binary files may also start with "solid", so fall back when ASCII fails
    if data.len() > 5 && &data[0..5] == b"solid" {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(parsed) = parse_ascii_stl(text) {
                return Ok(parsed);
            }
        }
    }

    parse_binary_stl(data)
}
