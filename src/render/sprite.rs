//! Sprite-atlas UV math and textured-quad packing
//!
//! Everything here is pure math on the way to the GPU: a draw call is a
//! model transform, a texture handle and a UV window, and a backend turns
//! those into vertex buffers with `quad_vertices`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::assets::TextureId;

/// A UV window into a texture, in [0, 1] texture space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u: f32,
    pub v: f32,
    pub width: f32,
    pub height: f32,
}

impl UvRect {
    /// The whole texture.
    pub const FULL: UvRect = UvRect {
        u: 0.0,
        v: 0.0,
        width: 1.0,
        height: 1.0,
    };
}

/// UV window of one cell in a cols x rows sprite sheet, indexed row-major.
///
/// Cell extents must divide the sheet evenly; `index` wraps neither on
/// columns nor rows, so callers keep it within the grid.
pub fn atlas_uv(index: usize, cols: u32, rows: u32) -> UvRect {
    let index = index as u32;
    UvRect {
        u: (index % cols) as f32 / cols as f32,
        v: (index / cols) as f32 / rows as f32,
        width: 1.0 / cols as f32,
        height: 1.0 / rows as f32,
    }
}

/// One textured-quad draw call, as consumed by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub model: Mat4,
    pub texture: TextureId,
    pub uv: UvRect,
}

/// Vertex format for sprite and glyph quads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Unit quad (corners at ±0.5) carrying the given UV window, as two
/// triangles. V grows downward in texture space, so the bottom-left corner
/// takes the bottom of the UV window.
pub fn quad_vertices(uv: UvRect) -> [Vertex; 6] {
    let (u0, v0) = (uv.u, uv.v);
    let (u1, v1) = (uv.u + uv.width, uv.v + uv.height);
    [
        Vertex { position: [-0.5, -0.5], uv: [u0, v1] },
        Vertex { position: [0.5, -0.5], uv: [u1, v1] },
        Vertex { position: [0.5, 0.5], uv: [u1, v0] },
        Vertex { position: [-0.5, -0.5], uv: [u0, v1] },
        Vertex { position: [0.5, 0.5], uv: [u1, v0] },
        Vertex { position: [-0.5, 0.5], uv: [u0, v0] },
    ]
}

/// Apply a model transform to local-space vertices, flattening to world
/// space. This is what a minimal backend does instead of uploading one
/// matrix per draw call.
pub fn transform_vertices(model: Mat4, vertices: &[Vertex]) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|vertex| {
            let world = model.transform_point3(Vec3::new(
                vertex.position[0],
                vertex.position[1],
                0.0,
            ));
            Vertex {
                position: [world.x, world.y],
                uv: vertex.uv,
            }
        })
        .collect()
}
