/// Face builder: turns corner points into flat triangle coordinates
use nalgebra::Point3;

/// Coordinates of one triangle (3 vertices x 3 components)
pub const TRIANGLE_LEN: usize = 9;

/// Coordinates of one quad face split into two triangles
pub const FACE_LEN: usize = 2 * TRIANGLE_LEN;

/// Concatenate three points in the given order.
///
/// The order is the winding, so it decides which way the normal points.
pub fn triangle(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> [f64; TRIANGLE_LEN] {
    [a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z]
}

/// Split a quad into the triangles (a, b, d) and (d, c, a).
///
/// Corners are a (top-left), b (top-right), c (bottom-left), d (bottom-right).
/// Every face of a shoe is cut along the a-d diagonal; adjoining faces rely on it.
pub fn face(
    a: Point3<f64>,
    b: Point3<f64>,
    c: Point3<f64>,
    d: Point3<f64>,
) -> [f64; FACE_LEN] {
    let mut out = [0.0; FACE_LEN];
    out[..TRIANGLE_LEN].copy_from_slice(&triangle(a, b, d));
    out[TRIANGLE_LEN..].copy_from_slice(&triangle(d, c, a));
    out
}
