/// Blinn-Phong shading with a rim term, evaluated per face on the CPU
use wm_core::Vec3;

/// Point light in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// Linear RGB in 0..1
    pub color: Vec3,
}

/// Surface response coefficients.
///
/// The `*_k` terms and `specular` are in 0..1. `shininess` is the Blinn-Phong
/// exponent and `rim_ambient_intensity` the exponent of the rim falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient_k: f32,
    pub diffuse_k: f32,
    pub specular: f32,
    pub shininess: f32,
    pub rim_k: f32,
    pub rim_ambient_intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient_k: 0.1,
            diffuse_k: 0.3,
            specular: 0.5,
            shininess: 256.0,
            rim_k: 0.7,
            rim_ambient_intensity: 4.0,
        }
    }
}

/// Shade a surface point with unit `normal` seen from `eye`.
///
/// Returns linear RGB; values above 1 are possible with several bright lights.
pub fn shade(
    material: &Material,
    lights: &[Light],
    point: &Vec3,
    normal: &Vec3,
    eye: &Vec3,
) -> Vec3 {
    let to_eye = (eye - point).try_normalize(f32::EPSILON).unwrap_or(*normal);

    let mut color = Vec3::zeros();
    for light in lights {
        let ambient = material.ambient_k;
        let Some(to_light) = (light.position - point).try_normalize(f32::EPSILON) else {
            color += light.color * ambient;
            continue;
        };

        let diffuse = normal.dot(&to_light).max(0.0) * material.diffuse_k;
        let specular = if diffuse > 0.0 {
            let halfway = (to_light + to_eye).try_normalize(f32::EPSILON).unwrap_or(*normal);
            normal.dot(&halfway).max(0.0).powf(material.shininess) * material.specular
        } else {
            0.0
        };

        color += light.color * (ambient + diffuse + specular);
    }

    let facing = normal.dot(&to_eye).max(0.0);
    let rim = (1.0 - facing).powf(material.rim_ambient_intensity) * material.rim_k;
    color + Vec3::repeat(rim)
}

/// Perceived brightness of a linear RGB color (Rec. 709 weights)
pub fn luminance(color: &Vec3) -> f32 {
    0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn white_light(position: Vec3) -> Light {
        Light {
            position,
            color: Vec3::repeat(1.0),
        }
    }

    #[test]
    fn test_unlit_side_gets_ambient_only() {
        let material = Material::default();
        let normal = Vec3::y();
        let eye = Vec3::new(0.0, 5.0, 0.0);
        let light = white_light(Vec3::new(0.0, -3.0, 0.0));
        let color = shade(&material, &[light], &Vec3::zeros(), &normal, &eye);
        assert_relative_eq!(color, Vec3::repeat(material.ambient_k), epsilon = 1e-6);
    }

    #[test]
    fn test_head_on_light_peaks() {
        let material = Material::default();
        let normal = Vec3::y();
        let eye = Vec3::new(0.0, 5.0, 0.0);
        let light = white_light(Vec3::new(0.0, 2.0, 0.0));
        let color = shade(&material, &[light], &Vec3::zeros(), &normal, &eye);
        let expected = material.ambient_k + material.diffuse_k + material.specular;
        assert_relative_eq!(color, Vec3::repeat(expected), epsilon = 1e-5);
    }

    #[test]
    fn test_grazing_light_is_dimmer() {
        let material = Material::default();
        let normal = Vec3::y();
        let eye = Vec3::new(0.0, 5.0, 0.0);
        let overhead = [white_light(Vec3::new(0.0, 2.0, 0.0))];
        let grazing = [white_light(Vec3::new(5.0, 0.5, 0.0))];
        let overhead = shade(&material, &overhead, &Vec3::zeros(), &normal, &eye);
        let grazing = shade(&material, &grazing, &Vec3::zeros(), &normal, &eye);
        assert!(luminance(&grazing) < luminance(&overhead));
    }

    #[test]
    fn test_rim_brightens_silhouettes() {
        let material = Material {
            ambient_k: 0.0,
            diffuse_k: 0.0,
            specular: 0.0,
            ..Default::default()
        };
        let normal = Vec3::x();
        let edge_on = shade(&material, &[], &Vec3::zeros(), &normal, &Vec3::new(0.0, 0.0, 5.0));
        let facing = shade(&material, &[], &Vec3::zeros(), &normal, &Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(edge_on, Vec3::repeat(material.rim_k), epsilon = 1e-6);
        assert_relative_eq!(facing, Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_lights_add_up() {
        let material = Material::default();
        let normal = Vec3::y();
        let eye = Vec3::new(0.0, 5.0, 0.0);
        let one = white_light(Vec3::new(1.0, 2.0, 0.0));
        let two = white_light(Vec3::new(-1.0, 2.0, 0.0));
        let single = shade(&material, &[one], &Vec3::zeros(), &normal, &eye);
        let both = shade(&material, &[one, two], &Vec3::zeros(), &normal, &eye);
        assert_relative_eq!(both, single * 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_luminance_weights() {
        assert_relative_eq!(luminance(&Vec3::repeat(1.0)), 1.0, epsilon = 1e-6);
        assert!(luminance(&Vec3::y()) > luminance(&Vec3::x()));
        assert!(luminance(&Vec3::x()) > luminance(&Vec3::z()));
    }
}
