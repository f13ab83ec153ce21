/// 4x4 matrix constructors for model, view and projection transforms
///
/// Every matrix is written in row-major argument order, so the code below reads
/// the same as the formulas on paper. Points are column vectors: `m * p`.
use nalgebra::{Matrix4, Vector3, Vector4};

use crate::error::TransformError;

pub type Vec3 = Vector3<f32>;
pub type Mat4 = Matrix4<f32>;

/// Shortest vector length accepted for normalization.
const MIN_LENGTH: f32 = 1e-6;

/// Smallest |w| accepted before a perspective divide.
const MIN_W: f32 = 1e-6;

#[rustfmt::skip]
pub fn identity() -> Mat4 {
    Mat4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Non-uniform scale about the origin
#[rustfmt::skip]
pub fn scale(s: Vec3) -> Mat4 {
    Mat4::new(
        s.x, 0.0, 0.0, 0.0,
        0.0, s.y, 0.0, 0.0,
        0.0, 0.0, s.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about +X by `rad` radians (counter-clockwise looking down the axis)
#[rustfmt::skip]
pub fn rotate_x(rad: f32) -> Mat4 {
    let (s, c) = rad.sin_cos();
    Mat4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about +Y by `rad` radians
#[rustfmt::skip]
pub fn rotate_y(rad: f32) -> Mat4 {
    let (s, c) = rad.sin_cos();
    Mat4::new(
        c, 0.0, s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation about +Z by `rad` radians
#[rustfmt::skip]
pub fn rotate_z(rad: f32) -> Mat4 {
    let (s, c) = rad.sin_cos();
    Mat4::new(
        c, -s, 0.0, 0.0,
        s, c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Euler rotation applied Z first, then X, then Y
pub fn rotate_euler(rotation: Vec3) -> Mat4 {
    rotate_y(rotation.y) * rotate_x(rotation.x) * rotate_z(rotation.z)
}

#[rustfmt::skip]
pub fn translate(t: Vec3) -> Mat4 {
    Mat4::new(
        1.0, 0.0, 0.0, t.x,
        0.0, 1.0, 0.0, t.y,
        0.0, 0.0, 1.0, t.z,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Build a right-handed view matrix for a camera at `eye` looking at `target`.
///
/// The camera looks down its local -Z axis. The rows of the rotation block are
/// the camera's right, up and backward axes, so the result is the inverse of the
/// camera's world transform without a general matrix inversion.
///
/// Fails with [`TransformError::DegenerateInput`] when `eye == target` or when
/// `up` is parallel to the viewing direction.
#[rustfmt::skip]
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, TransformError> {
    let f = normalized(eye - target, "eye and target coincide")?;
    let r = normalized(up.cross(&f), "up is parallel to the view direction")?;
    let u = f.cross(&r).normalize();

    Ok(Mat4::new(
        r.x, r.y, r.z, -r.dot(&eye),
        u.x, u.y, u.z, -u.dot(&eye),
        f.x, f.y, f.z, -f.dot(&eye),
        0.0, 0.0, 0.0, 1.0,
    ))
}

/// Symmetric orthographic projection.
///
/// `height` is the full height of the view volume and `aspect` is width over
/// height. `near` and `far` are positive distances in front of the camera, and
/// view-space depth `-near..-far` maps to clip-space z `-1..1`.
#[rustfmt::skip]
pub fn orthographic(
    height: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Result<Mat4, TransformError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(TransformError::projection("height", height, "must be positive"));
    }
    check_aspect_and_planes(aspect, near, far)?;

    let t = height / 2.0;
    let r = t * aspect;
    let (l, b) = (-r, -t);

    Ok(Mat4::new(
        2.0 / (r - l), 0.0, 0.0, -(r + l) / (r - l),
        0.0, 2.0 / (t - b), 0.0, -(t + b) / (t - b),
        0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near),
        0.0, 0.0, 0.0, 1.0,
    ))
}

/// Perspective projection with a vertical field of view given in degrees.
///
/// Depth maps to the [-1, 1] range after the perspective divide.
#[rustfmt::skip]
pub fn perspective(
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Result<Mat4, TransformError> {
    if !fov_y_degrees.is_finite() || fov_y_degrees <= 0.0 || fov_y_degrees >= 180.0 {
        return Err(TransformError::projection(
            "fov",
            fov_y_degrees,
            "must be between 0 and 180 degrees, exclusive",
        ));
    }
    check_aspect_and_planes(aspect, near, far)?;

    let focal = 1.0 / (fov_y_degrees.to_radians() / 2.0).tan();

    Ok(Mat4::new(
        focal / aspect, 0.0, 0.0, 0.0,
        0.0, focal, 0.0, 0.0,
        0.0, 0.0, (near + far) / (near - far), (2.0 * far * near) / (near - far),
        0.0, 0.0, -1.0, 0.0,
    ))
}

/// Create a model-view-projection matrix
pub fn mvp(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
    projection * view * model
}

/// Apply `m` to a point with w = 1 and drop the resulting w.
///
/// Exact for affine matrices (model and view) and orthographic projections.
pub fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
    (m * Vector4::new(p.x, p.y, p.z, 1.0)).xyz()
}

/// Apply `m` to a point and perform the perspective divide.
///
/// Returns `None` when the point lands on the camera plane (w near zero).
pub fn project_point(m: &Mat4, p: &Vec3) -> Option<Vec3> {
    let clip = m * Vector4::new(p.x, p.y, p.z, 1.0);
    if clip.w.abs() < MIN_W {
        return None;
    }
    Some(clip.xyz() / clip.w)
}

pub(crate) fn normalized(v: Vec3, what: &'static str) -> Result<Vec3, TransformError> {
    let length = v.norm();
    if !length.is_finite() || length < MIN_LENGTH {
        return Err(TransformError::degenerate(what));
    }
    Ok(v / length)
}

fn check_aspect_and_planes(aspect: f32, near: f32, far: f32) -> Result<(), TransformError> {
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(TransformError::projection("aspect", aspect, "must be positive"));
    }
    if !near.is_finite() || near <= 0.0 {
        return Err(TransformError::projection("near", near, "must be positive"));
    }
    if !far.is_finite() || far <= near {
        return Err(TransformError::projection("far", far, "must be greater than near"));
    }
    Ok(())
}
