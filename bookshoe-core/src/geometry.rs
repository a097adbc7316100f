/// Triangle-soup mesh produced by the shoe generator
use nalgebra::{Point3, Vector3};

use crate::face::{self, TRIANGLE_LEN};

/// A triangle read back out of a mesh buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit normal following the winding, or zero for a degenerate triangle
    pub fn normal(&self) -> Vector3<f64> {
        let [v0, v1, v2] = self.vertices;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1
            .cross(&edge2)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// Axis-aligned bounding box of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds {
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Radius of the sphere around the box
    pub fn radius(&self) -> f64 {
        self.size().norm() / 2.0
    }
}

/// Flat vertex positions, three numbers per vertex and nine per triangle.
///
/// There is no index buffer and vertices are never shared. A mesh only grows
/// by whole faces or triangles, so its length is always a multiple of nine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<f64>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Reserve room for `triangles` triangles
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * TRIANGLE_LEN),
        }
    }

    pub fn push_triangle(&mut self, a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) {
        self.positions.extend_from_slice(&face::triangle(a, b, c));
    }

    pub fn push_face(&mut self, a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, d: Point3<f64>) {
        self.positions.extend_from_slice(&face::face(a, b, c, d));
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / TRIANGLE_LEN
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions.chunks_exact(TRIANGLE_LEN).map(|c| {
            Triangle::new(
                Point3::new(c[0], c[1], c[2]),
                Point3::new(c[3], c[4], c[5]),
                Point3::new(c[6], c[7], c[8]),
            )
        })
    }

    /// Single precision copy for GPU buffers
    pub fn to_f32(&self) -> Vec<f32> {
        self.positions.iter().map(|&v| v as f32).collect()
    }

    /// Whether a renderer can consume the buffer: non-empty, whole vertices
    pub fn is_renderable(&self) -> bool {
        !self.positions.is_empty() && self.positions.len() % 3 == 0
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self
            .positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]));

        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        });

        Some(Bounds { min, max })
    }
}
