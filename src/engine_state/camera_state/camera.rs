//! # Camera Implementation
//!
//! First-person view orientation: eye position plus yaw/pitch, with the
//! derived view and ground vectors.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

/// Safe limit for pitch to prevent gimbal lock
pub const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// A first-person camera.
///
/// Yaw rotates around the Y axis starting from +X; pitch tilts up and down
/// and is kept strictly inside `(-pi/2, pi/2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// The eye position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, InnerSpace, Point3};
    /// use voxel_sandbox::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 10.0, 0.0), Deg(0.0), Deg(0.0));
    /// assert!((camera.view_direction().x - 1.0).abs() < 1e-6);
    /// assert!((camera.view_direction().magnitude() - 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        };
        camera.clamp_pitch();
        camera
    }

    /// Unit vector the camera looks along.
    pub fn view_direction(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Facing direction projected onto the ground plane.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(yaw_cos, 0.0, yaw_sin)
    }

    /// Ground-plane direction to the camera's right.
    pub fn right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos)
    }

    /// Applies a look delta. Positive `dy` looks down, as with mouse motion.
    ///
    /// # Arguments
    /// * `dx` - Horizontal look input
    /// * `dy` - Vertical look input
    /// * `sensitivity` - Radians per unit of input
    pub fn rotate(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.yaw += Rad(dx * sensitivity);
        self.pitch += Rad(-dy * sensitivity);
        self.clamp_pitch();
    }

    fn clamp_pitch(&mut self) {
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        camera.rotate(0.0, -1.0e6, 1.0);
        assert_eq!(camera.pitch, Rad(SAFE_FRAC_PI_2));
        camera.rotate(0.0, 1.0e6, 1.0);
        assert_eq!(camera.pitch, -Rad(SAFE_FRAC_PI_2));
        assert!(camera.view_direction().x.is_finite());
    }

    #[test]
    fn ground_vectors_are_orthonormal() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(37.0), Deg(-20.0));
        assert!((camera.forward().magnitude() - 1.0).abs() < 1e-6);
        assert!((camera.right().magnitude() - 1.0).abs() < 1e-6);
        assert!(camera.forward().dot(camera.right()).abs() < 1e-6);
        assert_eq!(camera.forward().y, 0.0);
    }

    #[test]
    fn non_finite_look_input_is_ignored() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.5), Rad(0.1));
        camera.rotate(f32::NAN, 1.0, 1.0);
        assert_eq!(camera.yaw, Rad(0.5));
        assert_eq!(camera.pitch, Rad(0.1));
    }

    #[test]
    fn view_direction_follows_yaw_and_pitch() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(90.0), Deg(0.0));
        assert!((camera.view_direction() - Vector3::unit_z()).magnitude() < 1e-6);

        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(-45.0));
        let dir = camera.view_direction();
        assert!(dir.y < 0.0);
        assert!((dir.x + dir.y).abs() < 1e-6);
    }
}
