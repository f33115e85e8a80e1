//! Texture loading and handle management
//!
//! The store owns decoded RGBA8 pixel data for the session's lifetime and
//! hands out opaque copyable handles. Entities reference textures, they
//! never own them.
//!
//! A required texture that fails to decode is fatal at startup: the game
//! cannot render without its sheets, so there is no fallback path, just an
//! abort with the offending path in the message.

use std::path::Path;

/// Opaque, non-owning handle to a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A decoded RGBA8 image.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// Owns every texture loaded for a session.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: Vec<Texture>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an image file to RGBA8 and register it.
    ///
    /// Panics if the file is missing or corrupt; required assets are a
    /// startup precondition.
    pub fn load(&mut self, path: &Path) -> TextureId {
        let decoded = match image::open(path) {
            Ok(decoded) => decoded.into_rgba8(),
            Err(err) => panic!("unable to load texture {}: {err}", path.display()),
        };
        let (width, height) = decoded.dimensions();
        log::debug!("loaded texture {} ({width}x{height})", path.display());
        self.insert_rgba8(width, height, decoded.into_raw())
    }

    /// Register already-decoded RGBA8 pixels.
    pub fn insert_rgba8(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> TextureId {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Texture {
            width,
            height,
            pixels,
        });
        id
    }

    pub fn get(&self, id: TextureId) -> &Texture {
        &self.textures[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Handles for the fixed set of images one session needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteAssets {
    /// Ship sheet, 5x3.
    pub ship: TextureId,
    /// Platform tileset, 16x16.
    pub platforms: TextureId,
    /// Asteroid sheet, 4x1.
    pub asteroids: TextureId,
    /// Explosion sheet, 8x1.
    pub explosion: TextureId,
    /// 16x16 ASCII glyph atlas.
    pub font: TextureId,
    /// Ten-step fuel gauge image series.
    pub fuel_gauge: [TextureId; crate::consts::FUEL_GAUGE_STEPS],
}

impl SpriteAssets {
    /// Load the full asset set from a directory. Any failure aborts.
    pub fn load(store: &mut TextureStore, dir: &Path) -> Self {
        Self {
            ship: store.load(&dir.join("spaceships.png")),
            platforms: store.load(&dir.join("platform_tileset.png")),
            asteroids: store.load(&dir.join("asteroids.png")),
            explosion: store.load(&dir.join("explosion.png")),
            font: store.load(&dir.join("font.png")),
            fuel_gauge: std::array::from_fn(|i| store.load(&dir.join(format!("fuel_{i:02}.png")))),
        }
    }

    /// Handles without pixel data, for headless runs and tests. The
    /// simulation treats handles as opaque, so nothing ever dereferences
    /// these.
    pub fn placeholder() -> Self {
        Self {
            ship: TextureId(0),
            platforms: TextureId(1),
            asteroids: TextureId(2),
            explosion: TextureId(3),
            font: TextureId(4),
            fuel_gauge: std::array::from_fn(|i| TextureId(5 + i as u32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_hands_out_sequential_handles() {
        let mut store = TextureStore::new();
        let a = store.insert_rgba8(1, 1, vec![0; 4]);
        let b = store.insert_rgba8(2, 2, vec![0; 16]);
        assert_eq!(a, TextureId(0));
        assert_eq!(b, TextureId(1));
        assert_eq!(store.get(b).width, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn load_decodes_png_to_rgba8() {
        let path = std::env::temp_dir().join("moonfall_store_test.png");
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let mut store = TextureStore::new();
        let id = store.load(&path);
        let texture = store.get(id);
        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.pixels.len(), 3 * 2 * 4);
        assert_eq!(&texture.pixels[..4], &[10, 20, 30, 255]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    #[should_panic(expected = "unable to load texture")]
    fn missing_texture_is_fatal() {
        let mut store = TextureStore::new();
        store.load(Path::new("does_not_exist.png"));
    }
}
