/// Fixed demo shapes in object space
use wm_core::Vec3;

/// A triangle with counter-clockwise winding seen from its front side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(&(v2 - v0)).normalize()
    }

    pub fn centroid(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v0 + v1 + v2) / 3.0
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned cube centered on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        // (normal, u, v) with u x v = normal so each quad winds outward
        let faces = [
            (Vec3::x(), -Vec3::z(), Vec3::y()),
            (-Vec3::x(), Vec3::z(), Vec3::y()),
            (Vec3::y(), Vec3::x(), -Vec3::z()),
            (-Vec3::y(), Vec3::x(), Vec3::z()),
            (Vec3::z(), Vec3::x(), Vec3::y()),
            (-Vec3::z(), -Vec3::x(), Vec3::y()),
        ];

        let mut mesh = Self::new();
        for (normal, u, v) in faces {
            mesh.add_quad(normal * half, u * half, v * half);
        }
        mesh
    }

    /// Horizontal plane in XZ facing +Y, centered on the origin and split into
    /// `subdivisions` x `subdivisions` quads.
    ///
    /// Small cells keep most of the plane on screen when part of it falls
    /// behind the near plane, since the renderer drops whole triangles there.
    pub fn plane(width: f32, depth: f32, subdivisions: usize) -> Self {
        let cells = subdivisions.max(1);
        let step = 1.0 / cells as f32;
        let u = Vec3::x() * (width * step / 2.0);
        let v = -Vec3::z() * (depth * step / 2.0);

        let mut mesh = Self::new();
        for row in 0..cells {
            for col in 0..cells {
                let x = ((col as f32 + 0.5) * step - 0.5) * width;
                let z = ((row as f32 + 0.5) * step - 0.5) * depth;
                mesh.add_quad(Vec3::new(x, 0.0, z), u, v);
            }
        }
        mesh
    }

    fn add_quad(&mut self, center: Vec3, u: Vec3, v: Vec3) {
        let corners = [
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ];
        self.triangles
            .push(Triangle::new(corners[0], corners[1], corners[2]));
        self.triangles
            .push(Triangle::new(corners[0], corners[2], corners[3]));
    }
}
