//! Element rotation.

use super::Axis;
use glam::Vec3;

/// Default rotation pivot: the center of the 0-16 model space.
pub const DEFAULT_ORIGIN: Vec3 = Vec3::new(8.0, 8.0, 8.0);

/// Element-level rotation from a model element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 model coordinates).
    pub origin: Vec3,
    /// Axis to rotate around. `None` means the element is not rotated.
    pub axis: Option<Axis>,
    /// Rotation angle in degrees.
    pub angle: f32,
}

impl Default for ElementRotation {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            axis: None,
            angle: 0.0,
        }
    }
}

impl ElementRotation {
    pub fn new(origin: Vec3, axis: Axis, angle: f32) -> Self {
        Self {
            origin,
            axis: Some(axis),
            angle,
        }
    }

    /// Rotation around the default origin.
    pub fn around_center(axis: Axis, angle: f32) -> Self {
        Self::new(DEFAULT_ORIGIN, axis, angle)
    }

    /// True when an axis is set and the angle is non-zero.
    pub fn is_rotated(&self) -> bool {
        self.axis.is_some() && self.angle != 0.0
    }

    /// True when every field still holds its default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Convert origin from model coordinates (0-16) to normalized (-0.5 to 0.5).
    pub fn normalized_origin(&self) -> Vec3 {
        self.origin / 16.0 - Vec3::splat(0.5)
    }

    /// Get the angle in radians.
    pub fn angle_radians(&self) -> f32 {
        self.angle.to_radians()
    }
}
