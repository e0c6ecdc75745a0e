/// Geometry primitives for indexed triangle meshes
use nalgebra::Point3;

/// Vertex indices of one face, in winding order
pub type Triangle = [usize; 3];

/// An indexed triangle mesh
///
/// A vertex's position in `vertices` is its identity; every triangle refers
/// to vertices by that index.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    pub fn from_parts(vertices: Vec<Point3<f64>>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Positions of the three corners of triangle `index`
    pub fn triangle_points(&self, index: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// First (triangle, vertex index) pair that points past the vertex list
    pub fn first_invalid_index(&self) -> Option<(usize, usize)> {
        let count = self.vertices.len();
        self.triangles.iter().enumerate().find_map(|(face, tri)| {
            tri.iter()
                .copied()
                .find(|&index| index >= count)
                .map(|index| (face, index))
        })
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    /// Create a closed cube mesh centred on the origin, for testing
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];

        // Two outward-wound triangles per face
        let triangles = vec![
            [4, 5, 6],
            [4, 6, 7], // front (+z)
            [0, 3, 2],
            [0, 2, 1], // back (-z)
            [3, 7, 6],
            [3, 6, 2], // top (+y)
            [0, 1, 5],
            [0, 5, 4], // bottom (-y)
            [1, 2, 6],
            [1, 6, 5], // right (+x)
            [0, 4, 7],
            [0, 7, 3], // left (-x)
        ];

        Self::from_parts(vertices, triangles)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
