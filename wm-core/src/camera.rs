/// Camera state and the view/projection matrices derived from it
use crate::error::TransformError;
use crate::transformations::{self, Mat4, Vec3};

/// World up axis used for every view matrix.
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height of the render target
    pub aspect_ratio: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub orthographic: bool,
    /// Full height of the view volume in orthographic mode
    pub ortho_height: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect_ratio: aspect(width, height),
            ..Self::default()
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Result<Mat4, TransformError> {
        transformations::look_at(self.position, self.target, WORLD_UP)
    }

    /// Create the projection matrix for the current mode
    pub fn projection_matrix(&self) -> Result<Mat4, TransformError> {
        if self.orthographic {
            transformations::orthographic(
                self.ortho_height,
                self.aspect_ratio,
                self.near_plane,
                self.far_plane,
            )
        } else {
            transformations::perspective(
                self.fov,
                self.aspect_ratio,
                self.near_plane,
                self.far_plane,
            )
        }
    }

    pub fn view_projection(&self) -> Result<Mat4, TransformError> {
        Ok(self.projection_matrix()? * self.view_matrix()?)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect_ratio = aspect(width, height);
    }

    /// Unit vector from the camera toward its target.
    ///
    /// Fails with [`TransformError::DegenerateInput`] when the camera sits on
    /// its target.
    pub fn forward(&self) -> Result<Vec3, TransformError> {
        transformations::normalized(self.target - self.position, "eye and target coincide")
    }

    /// Restore the default placement and lens, keeping the current aspect ratio
    pub fn reset(&mut self) {
        *self = Self {
            aspect_ratio: self.aspect_ratio,
            ..Self::default()
        };
    }

    /// Project a world-space point to screen space.
    ///
    /// Returns `(x, y, depth)` with `y` growing downward and `depth` the NDC z in
    /// `-1..1`. Only the depth range is tested: points beside the screen keep
    /// their off-screen coordinates so triangles crossing an edge can be clipped
    /// by the rasterizer. Points behind the camera or past the near and far
    /// planes yield `None`.
    pub fn project_to_screen(
        view_projection: &Mat4,
        point: &Vec3,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let ndc = transformations::project_point(view_projection, point)?;

        if !ndc.iter().all(|c| c.is_finite()) || !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::new(0.0, 0.0, 0.0),
            fov: 60.0,
            aspect_ratio: 1.0,
            near_plane: 0.1,
            far_plane: 100.0,
            orthographic: false,
            ortho_height: 6.0,
        }
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
