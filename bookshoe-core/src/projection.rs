/// Camera and projection utilities for previewing a shoe
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Bounds;

/// Perspective camera for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Camera looking at the origin from far enough to see a mesh of the
    /// given bounds whole, once the mesh is centred on the origin.
    pub fn framing(bounds: &Bounds, width: u32, height: u32) -> Self {
        let mut camera = Self::new(width, height);
        let radius = (bounds.radius() as f32).max(1e-3);

        let distance = radius / (camera.fov / 2.0).sin() * 1.1;
        camera.position = Point3::new(0.0, 0.0, distance);
        camera.near = distance * 0.01;
        camera.far = distance + radius * 2.0;
        camera
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to screen space as `(x, y, depth)`.
    ///
    /// Returns `None` for points behind the camera or outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;

        let clip = mvp * point.to_homogeneous();
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.iter().any(|c| !(-1.0..=1.0).contains(c)) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds {
            min: Point3::new(-3.0, 0.0, -3.0),
            max: Point3::new(58.0, 48.0, 157.0),
        }
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_framing_sees_the_whole_mesh() {
        let bounds = bounds();
        let camera = Camera::framing(&bounds, 120, 120);
        let center = bounds.center().cast::<f32>();
        let model = Matrix4::new_translation(&-center.coords);

        for corner in [bounds.min, bounds.max] {
            let projected = camera.project_to_screen(&corner.cast::<f32>(), &model, 120, 120);
            assert!(projected.is_some(), "corner {corner} is off screen");
        }
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::new(100, 100);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 100, 100)
            .is_none());
    }
}
