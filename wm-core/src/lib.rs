//! WM Core Library - transformation matrices and camera math
//!
//! Pure, stateless building blocks for placing objects in world space and
//! projecting them to clip space. Matrices are `nalgebra::Matrix4<f32>` built in
//! row-major argument order; points are column vectors, so `a * b` applies `b`
//! first and a full transform is `projection * view * model`. Clip-space depth
//! follows the GL convention of `[-1, 1]`.

pub mod camera;
pub mod controller;
pub mod error;
pub mod transform;
pub mod transformations;

// Re-export commonly used types
pub use camera::Camera;
pub use controller::{CameraController, ControllerInput};
pub use error::TransformError;
pub use transform::Transform;
pub use transformations::{Mat4, Vec3};
