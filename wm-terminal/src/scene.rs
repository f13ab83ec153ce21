/// Everything the render loop draws and mutates between frames
use wm_core::{Camera, CameraController, ControllerInput, Transform, TransformError, Vec3};

use crate::config::Args;
use crate::lighting::{Light, Material};
use crate::mesh::Mesh;

pub const MAX_LIGHTS: usize = 4;

/// Fraction of the tangent applied per frame when lights orbit
const ORBIT_STEP: f32 = 0.001;

const LIGHT_MARKER_SCALE: f32 = 0.2;
const FOV_RANGE: (f32, f32) = (10.0, 150.0);
const MIN_ORTHO_HEIGHT: f32 = 0.5;
const GROUND_SUBDIVISIONS: usize = 10;

/// A lit mesh placed in the world
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: Mesh,
    pub transform: Transform,
}

/// User intents decoded from input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    /// Movement along the camera's forward, right and up axes
    Move {
        forward: f32,
        right: f32,
        up: f32,
        sprint: bool,
    },
    Look(f32, f32),
    /// Positive narrows the view (smaller fov or ortho height)
    Zoom(f32),
    ToggleOrthographic,
    ToggleOrbit,
    AddLight,
    RemoveLight,
    ResetCamera,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub controller: CameraController,
    pub objects: Vec<SceneObject>,
    pub lights: [Light; MAX_LIGHTS],
    pub light_marker: Mesh,
    pub material: Material,
    pub orbit: bool,
    active_lights: usize,
}

impl Scene {
    /// Build the demo scene and check that its camera yields valid matrices.
    pub fn new(args: &Args) -> Result<Self, TransformError> {
        let camera = Camera {
            fov: args.fov,
            orthographic: args.orthographic,
            ortho_height: args.ortho_height,
            near_plane: args.near,
            far_plane: args.far,
            ..Camera::default()
        };
        camera.view_projection()?;

        let objects = vec![
            SceneObject {
                name: "cube",
                mesh: Mesh::cube(1.0),
                transform: Transform::default(),
            },
            SceneObject {
                name: "plane",
                mesh: Mesh::plane(5.0, 5.0, GROUND_SUBDIVISIONS),
                transform: Transform::from_position(Vec3::new(0.0, -1.0, 0.0)),
            },
        ];

        Ok(Self {
            camera,
            controller: CameraController::default(),
            objects,
            lights: default_lights(),
            light_marker: Mesh::cube(1.0),
            material: Material::default(),
            orbit: args.orbit,
            active_lights: (args.lights as usize).clamp(1, MAX_LIGHTS),
        })
    }

    pub fn active_lights(&self) -> &[Light] {
        &self.lights[..self.active_lights]
    }

    pub fn set_light_count(&mut self, count: usize) {
        self.active_lights = count.clamp(1, MAX_LIGHTS);
    }

    /// Marker placement for each active light, derived from its position
    pub fn light_markers(&self) -> impl Iterator<Item = (Transform, Vec3)> + '_ {
        self.active_lights().iter().map(|light| {
            let transform = Transform {
                position: light.position,
                scale: Vec3::repeat(LIGHT_MARKER_SCALE),
                ..Transform::default()
            };
            (transform, light.color)
        })
    }

    /// Advance one frame
    pub fn update(&mut self, input: &ControllerInput, dt: f32) {
        self.controller.update(&mut self.camera, input, dt);
        if self.orbit {
            self.orbit_lights();
        }
    }

    /// Nudge each active light along its tangent around the world Y axis
    pub fn orbit_lights(&mut self) {
        let active = self.active_lights;
        for light in &mut self.lights[..active] {
            let tangent = Vec3::y().cross(&light.position);
            light.position += tangent * ORBIT_STEP;
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
        self.controller.reset();
    }

    /// Apply an action, folding movement into `input` for the next update.
    ///
    /// Returns `false` when the action asks to quit.
    pub fn apply(&mut self, action: Action, input: &mut ControllerInput) -> bool {
        match action {
            Action::Quit => return false,
            Action::Move {
                forward,
                right,
                up,
                sprint,
            } => {
                input.forward = (input.forward + forward).clamp(-1.0, 1.0);
                input.right = (input.right + right).clamp(-1.0, 1.0);
                input.up = (input.up + up).clamp(-1.0, 1.0);
                input.sprint |= sprint;
            }
            Action::Look(dx, dy) => {
                input.look_delta.0 += dx;
                input.look_delta.1 += dy;
            }
            Action::Zoom(amount) => {
                if self.camera.orthographic {
                    self.camera.ortho_height =
                        (self.camera.ortho_height - amount * 0.5).max(MIN_ORTHO_HEIGHT);
                } else {
                    let (min, max) = FOV_RANGE;
                    self.camera.fov = (self.camera.fov - amount * 5.0).clamp(min, max);
                }
            }
            Action::ToggleOrthographic => self.camera.orthographic = !self.camera.orthographic,
            Action::ToggleOrbit => self.orbit = !self.orbit,
            Action::AddLight => self.set_light_count(self.active_lights + 1),
            Action::RemoveLight => self.set_light_count(self.active_lights.saturating_sub(1)),
            Action::ResetCamera => self.reset_camera(),
        }
        true
    }
}

fn default_lights() -> [Light; MAX_LIGHTS] {
    [
        Light {
            position: Vec3::new(0.0, 1.5, -2.0),
            color: Vec3::new(1.0, 1.0, 1.0),
        },
        Light {
            position: Vec3::new(0.0, 1.5, 2.0),
            color: Vec3::new(0.0, 1.0, 1.0),
        },
        Light {
            position: Vec3::new(2.0, 1.5, 0.0),
            color: Vec3::new(1.0, 0.0, 1.0),
        },
        Light {
            position: Vec3::new(-2.0, 1.5, 0.0),
            color: Vec3::new(1.0, 1.0, 0.0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene() -> Scene {
        Scene::new(&Args::default()).unwrap()
    }

    #[test]
    fn test_default_scene() {
        let scene = scene();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.active_lights().len(), 1);
        let plane = &scene.objects[1];
        assert_eq!(plane.name, "plane");
        assert_relative_eq!(
            plane.transform.transform_point(&Vec3::zeros()),
            Vec3::new(0.0, -1.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_invalid_projection_is_rejected() {
        let args = Args {
            near: 10.0,
            far: 1.0,
            ..Args::default()
        };
        assert!(matches!(
            Scene::new(&args),
            Err(TransformError::InvalidProjection { parameter: "far", .. })
        ));
    }

    #[test]
    fn test_light_count_is_clamped() {
        let mut scene = scene();
        scene.set_light_count(10);
        assert_eq!(scene.active_lights().len(), MAX_LIGHTS);
        scene.set_light_count(0);
        assert_eq!(scene.active_lights().len(), 1);

        let mut input = ControllerInput::default();
        scene.apply(Action::AddLight, &mut input);
        assert_eq!(scene.active_lights().len(), 2);
        assert_eq!(scene.light_markers().count(), 2);
    }

    #[test]
    fn test_orbit_keeps_height_and_turns() {
        let mut scene = scene();
        scene.set_light_count(MAX_LIGHTS);
        let before = scene.lights;
        scene.orbit_lights();
        for (old, new) in before.iter().zip(scene.lights.iter()) {
            assert_eq!(new.position.y, old.position.y);
            assert_ne!(new.position, old.position);
            let tangent = Vec3::y().cross(&old.position) * ORBIT_STEP;
            assert_relative_eq!(new.position, old.position + tangent, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_orbit_only_when_enabled() {
        let mut scene = scene();
        let before = scene.lights[0].position;
        scene.update(&ControllerInput::default(), 0.016);
        assert_eq!(scene.lights[0].position, before);

        let mut input = ControllerInput::default();
        scene.apply(Action::ToggleOrbit, &mut input);
        scene.update(&input, 0.016);
        assert_ne!(scene.lights[0].position, before);
    }

    #[test]
    fn test_light_markers_follow_lights() {
        let mut scene = scene();
        scene.lights[0].position = Vec3::new(3.0, 2.0, 1.0);
        let (marker, color) = scene.light_markers().next().unwrap();
        assert_eq!(marker.position, Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(marker.scale, Vec3::repeat(LIGHT_MARKER_SCALE));
        assert_eq!(color, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_zoom_clamps() {
        let mut scene = scene();
        let mut input = ControllerInput::default();
        for _ in 0..100 {
            scene.apply(Action::Zoom(1.0), &mut input);
        }
        assert_eq!(scene.camera.fov, FOV_RANGE.0);

        scene.apply(Action::ToggleOrthographic, &mut input);
        for _ in 0..100 {
            scene.apply(Action::Zoom(1.0), &mut input);
        }
        assert_eq!(scene.camera.ortho_height, MIN_ORTHO_HEIGHT);
        assert!(scene.camera.view_projection().is_ok());
    }

    #[test]
    fn test_actions_fold_into_input() {
        let mut scene = scene();
        let mut input = ControllerInput::default();
        let forward = Action::Move {
            forward: 1.0,
            right: 0.0,
            up: 0.0,
            sprint: false,
        };
        assert!(scene.apply(forward, &mut input));
        assert!(scene.apply(forward, &mut input));
        assert!(scene.apply(Action::Look(10.0, -5.0), &mut input));
        assert_eq!(input.forward, 1.0);
        assert_eq!(input.look_delta, (10.0, -5.0));
        assert!(!scene.apply(Action::Quit, &mut input));
    }

    #[test]
    fn test_reset_camera() {
        let mut scene = scene();
        let input = ControllerInput {
            forward: 1.0,
            look_delta: (100.0, 0.0),
            ..Default::default()
        };
        scene.update(&input, 1.0);
        scene.reset_camera();
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(scene.controller.yaw, 0.0);
    }
}
