//! The rendering boundary
//!
//! The simulation describes frames as textured-quad draw calls and text
//! runs; a platform backend implements `SpriteRenderer` to turn those into
//! GPU work. `QuadBatch` is the reference backend half: it flattens every
//! call into per-texture vertex runs ready for buffer upload.

pub mod sprite;
pub mod text;

use glam::Vec3;

pub use sprite::{DrawCommand, UvRect, Vertex, atlas_uv, quad_vertices, transform_vertices};
pub use text::{layout_text, text_model};

use crate::assets::TextureId;

/// What the simulation needs from a renderer, and nothing more.
pub trait SpriteRenderer {
    /// Draw one textured quad.
    fn draw_quad(&mut self, command: DrawCommand);

    /// Draw a text run from the glyph atlas at an anchor position.
    fn draw_text(&mut self, text: &str, font: TextureId, font_size: f32, spacing: f32, anchor: Vec3);
}

/// CPU-side batching backend: accumulates world-space vertices grouped by
/// texture, preserving draw order between textures.
#[derive(Debug, Default)]
pub struct QuadBatch {
    runs: Vec<(TextureId, Vec<Vertex>)>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    /// Vertex runs in draw order, one per texture switch.
    pub fn runs(&self) -> &[(TextureId, Vec<Vertex>)] {
        &self.runs
    }

    pub fn vertex_count(&self) -> usize {
        self.runs.iter().map(|(_, v)| v.len()).sum()
    }

    fn push(&mut self, texture: TextureId, vertices: Vec<Vertex>) {
        match self.runs.last_mut() {
            Some((last, run)) if *last == texture => run.extend(vertices),
            _ => self.runs.push((texture, vertices)),
        }
    }
}

impl SpriteRenderer for QuadBatch {
    fn draw_quad(&mut self, command: DrawCommand) {
        let quad = quad_vertices(command.uv);
        self.push(command.texture, transform_vertices(command.model, &quad));
    }

    fn draw_text(&mut self, text: &str, font: TextureId, font_size: f32, spacing: f32, anchor: Vec3) {
        let vertices = layout_text(text, font_size, spacing);
        self.push(font, transform_vertices(text_model(anchor), &vertices));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn batch_groups_consecutive_draws_by_texture() {
        let mut batch = QuadBatch::new();
        let command = |texture| DrawCommand {
            model: Mat4::IDENTITY,
            texture,
            uv: UvRect::FULL,
        };

        batch.draw_quad(command(TextureId(1)));
        batch.draw_quad(command(TextureId(1)));
        batch.draw_quad(command(TextureId(2)));

        assert_eq!(batch.runs().len(), 2);
        assert_eq!(batch.runs()[0].1.len(), 12);
        assert_eq!(batch.vertex_count(), 18);
    }

    #[test]
    fn text_lands_in_the_font_texture_run() {
        let mut batch = QuadBatch::new();
        batch.draw_text("GO", TextureId(7), 0.5, 0.05, Vec3::new(-1.0, 2.0, 0.0));

        assert_eq!(batch.runs().len(), 1);
        assert_eq!(batch.runs()[0].0, TextureId(7));
        assert_eq!(batch.runs()[0].1.len(), 12);
        // Anchor translation applied to the first glyph's top-left corner.
        let top_left = batch.runs()[0].1[0].position;
        assert!((top_left[0] - (-1.25)).abs() < 1e-6);
        assert!((top_left[1] - 2.25).abs() < 1e-6);
    }

    #[test]
    fn clear_resets_the_batch() {
        let mut batch = QuadBatch::new();
        batch.draw_quad(DrawCommand {
            model: Mat4::IDENTITY,
            texture: TextureId(1),
            uv: UvRect::FULL,
        });
        batch.clear();
        assert_eq!(batch.vertex_count(), 0);
    }
}
