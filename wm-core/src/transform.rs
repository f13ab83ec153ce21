/// Position, rotation and scale of a scene object
use nalgebra::Matrix3;

use crate::error::TransformError;
use crate::transformations::{self, Mat4, Vec3};

/// Placement of an object in world space.
///
/// `rotation` holds Euler angles in radians about X, Y and Z. The model matrix
/// is derived from the three fields on every call, so mutating them directly is
/// always safe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::new(0.0, 0.0, 0.0),
        rotation: Vec3::new(0.0, 0.0, 0.0),
        scale: Vec3::new(1.0, 1.0, 1.0),
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vec3::new(dx, dy, dz);
    }

    /// Local-to-world matrix: translate * rotateY * rotateX * rotateZ * scale
    pub fn model_matrix(&self) -> Mat4 {
        transformations::translate(self.position)
            * transformations::rotate_euler(self.rotation)
            * transformations::scale(self.scale)
    }

    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        transformations::transform_point(&self.model_matrix(), point)
    }

    /// Inverse transpose of the model matrix's linear part, for transforming
    /// surface normals under non-uniform scale.
    pub fn normal_matrix(&self) -> Result<Matrix3<f32>, TransformError> {
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(TransformError::degenerate("scale has a zero axis"));
        }

        // R * S^-1 equals (R * S)^-T for a rotation R and diagonal S
        let rotation = transformations::rotate_euler(self.rotation)
            .fixed_view::<3, 3>(0, 0)
            .into_owned();
        let inverse_scale = Matrix3::from_diagonal(&self.scale.map(|s| 1.0 / s));
        Ok(rotation * inverse_scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
