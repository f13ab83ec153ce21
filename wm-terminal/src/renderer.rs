/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wm_core::{transformations, Camera, Mat4, Transform, Vec3};

use crate::lighting::{self, Light, Material};
use crate::mesh::{Mesh, Triangle};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 2.0;

/// How a mesh is colored
#[derive(Debug, Clone, Copy)]
pub enum Shading<'a> {
    Lit {
        eye: Vec3,
        lights: &'a [Light],
        material: &'a Material,
    },
    /// Flat color, used for light markers
    Unlit(Vec3),
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Aspect ratio of the character grid in square units
    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / (self.height.max(1) as f32 * CELL_ASPECT)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// Draw `mesh` placed by `transform`, returning the number of triangles
    /// that reached the screen.
    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        transform: &Transform,
        view_projection: &Mat4,
        shading: Shading<'_>,
    ) -> usize {
        let model = transform.model_matrix();
        let mvp = view_projection * model;

        let normal_matrix = match shading {
            Shading::Lit { .. } => match transform.normal_matrix() {
                Ok(matrix) => Some(matrix),
                Err(err) => {
                    tracing::warn!(%err, "skipping mesh with singular transform");
                    return 0;
                }
            },
            Shading::Unlit(_) => None,
        };

        let mut drawn = 0;
        for triangle in &mesh.triangles {
            let (character, color) = match (shading, normal_matrix) {
                (
                    Shading::Lit {
                        eye,
                        lights,
                        material,
                    },
                    Some(normal_matrix),
                ) => {
                    let normal = (normal_matrix * triangle.normal()).normalize();
                    let centroid = transformations::transform_point(&model, &triangle.centroid());
                    let lit = lighting::shade(material, lights, &centroid, &normal, &eye);
                    (ramp_char(lighting::luminance(&lit)), to_color(&lit))
                }
                (Shading::Unlit(color), _) => ('@', to_color(&color)),
                (Shading::Lit { .. }, None) => continue,
            };

            if self.render_triangle(triangle, &mvp, character, color) {
                drawn += 1;
            }
        }
        drawn
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        mvp: &Mat4,
        character: char,
        color: Color,
    ) -> bool {
        // Project vertices to screen space. Only depth rejects a vertex; x and y
        // beyond the viewport are clipped by the bounding box in rasterize_triangle
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(triangle.vertices.iter()) {
            match Camera::project_to_screen(mvp, vertex, self.width as u32, self.height as u32) {
                Some(coords) => *slot = coords,
                None => return false, // Triangle is clipped
            }
        }

        // Screen y grows downward, so front faces wind clockwise here
        let (v0, v1, v2) = (screen_coords[0], screen_coords[1], screen_coords[2]);
        let area = (v1.0 - v0.0) * (v2.1 - v0.1) - (v2.0 - v0.0) * (v1.1 - v0.1);
        if area >= 0.0 {
            return false;
        }

        self.rasterize_triangle(&screen_coords, character, color);
        true
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    /// Queue the frame, row by row, starting at `top_row`.
    pub fn draw<W: Write>(&self, writer: &mut W, top_row: u16) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, top_row + y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a brightness (0..1, clamped) to a ramp character
fn ramp_char(brightness: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

fn to_color(color: &Vec3) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
