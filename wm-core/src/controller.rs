/// First-person fly camera driven by look deltas and movement axes
use crate::camera::{Camera, WORLD_UP};
use crate::transformations::Vec3;

const MAX_PITCH: f32 = 89.0;

/// One frame of input for [`CameraController::update`].
///
/// Movement axes are in `-1.0..=1.0`: `forward` is positive forward, `right`
/// positive right and `up` positive up. `look_delta` is in input units (pixels
/// or key steps) and is scaled by the mouse sensitivity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    pub look_delta: (f32, f32),
    pub forward: f32,
    pub right: f32,
    pub up: f32,
    pub sprint: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    /// Degrees; 0 looks down -Z
    pub yaw: f32,
    /// Degrees, clamped to +-89
    pub pitch: f32,
    pub mouse_sensitivity: f32,
    pub move_speed: f32,
    pub sprint_move_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            mouse_sensitivity: 0.1,
            move_speed: 5.0,
            sprint_move_speed: 20.0,
        }
    }
}

impl CameraController {
    /// Unit view direction for the current yaw and pitch
    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    /// Apply one frame of input to `camera`, moving it and re-aiming its target.
    pub fn update(&mut self, camera: &mut Camera, input: &ControllerInput, dt: f32) {
        let (dx, dy) = input.look_delta;
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch - dy * self.mouse_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);

        let forward = self.forward();
        // Pitch is clamped, so forward is never parallel to world up
        let right = forward.cross(&WORLD_UP).normalize();
        let up = right.cross(&forward).normalize();

        let speed = if input.sprint {
            self.sprint_move_speed
        } else {
            self.move_speed
        };
        let step = speed * dt;

        camera.position += forward * (input.forward * step);
        camera.position += right * (input.right * step);
        camera.position += up * (input.up * step);
        camera.target = camera.position + forward;
    }

    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}
