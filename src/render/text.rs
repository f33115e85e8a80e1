//! Glyph-atlas text layout
//!
//! The font sheet is a 16x16 grid addressed by ASCII code. Layout places
//! one quad per character left to right; the anchor position goes into the
//! model transform so the glyph vertices stay in local space.

use glam::{Mat4, Vec3};

use super::sprite::Vertex;
use crate::consts::FONTBANK_SIZE;

/// Model transform for a run of text anchored at `position`.
pub fn text_model(position: Vec3) -> Mat4 {
    Mat4::from_translation(position)
}

/// Lay out `text` as one quad per character, 6 vertices each, in local
/// space. `font_size` is the glyph quad edge; `spacing` is the extra gap
/// between adjacent glyphs.
pub fn layout_text(text: &str, font_size: f32, spacing: f32) -> Vec<Vertex> {
    let cell = 1.0 / FONTBANK_SIZE as f32;
    let mut vertices = Vec::with_capacity(text.len() * 6);

    for (i, ch) in text.chars().enumerate() {
        let code = ch as u32;
        let u = (code % FONTBANK_SIZE) as f32 * cell;
        let v = (code / FONTBANK_SIZE) as f32 * cell;
        let offset = (font_size + spacing) * i as f32;

        let left = offset - 0.5 * font_size;
        let right = offset + 0.5 * font_size;
        let top = 0.5 * font_size;
        let bottom = -0.5 * font_size;

        vertices.extend_from_slice(&[
            Vertex { position: [left, top], uv: [u, v] },
            Vertex { position: [left, bottom], uv: [u, v + cell] },
            Vertex { position: [right, top], uv: [u + cell, v] },
            Vertex { position: [right, bottom], uv: [u + cell, v + cell] },
            Vertex { position: [right, top], uv: [u + cell, v] },
            Vertex { position: [left, bottom], uv: [u, v + cell] },
        ]);
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_vertices_per_character() {
        assert_eq!(layout_text("MISSION FAIL", 0.5, 0.05).len(), 12 * 6);
        assert!(layout_text("", 0.5, 0.05).is_empty());
    }

    #[test]
    fn glyph_uv_comes_from_ascii_code() {
        // 'A' is 65: column 1, row 4 of the 16x16 bank.
        let vertices = layout_text("A", 1.0, 0.0);
        assert_eq!(vertices[0].uv, [1.0 / 16.0, 4.0 / 16.0]);
        // Bottom-left samples one cell lower.
        assert_eq!(vertices[1].uv, [1.0 / 16.0, 5.0 / 16.0]);
    }

    #[test]
    fn characters_advance_by_size_plus_spacing() {
        let vertices = layout_text("AB", 0.5, 0.05);
        let first_left = vertices[0].position[0];
        let second_left = vertices[6].position[0];
        assert!((second_left - first_left - 0.55).abs() < 1e-6);
    }

    #[test]
    fn anchor_goes_into_the_model_transform() {
        let model = text_model(Vec3::new(-3.5, 2.5, 0.0));
        let moved = model.transform_point3(Vec3::ZERO);
        assert_eq!(moved, Vec3::new(-3.5, 2.5, 0.0));
    }
}
