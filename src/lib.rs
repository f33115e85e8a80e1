//! Moonfall - a Lunar Lander style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `render`: Sprite-atlas math and the draw-command boundary
//! - `assets`: Texture decoding and handle management
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod render;
pub mod sim;
pub mod tuning;

pub use assets::{TextureId, TextureStore};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

    /// Horizontal world extent; leaving it ends the session
    pub const WORLD_HALF_WIDTH: f32 = 5.0;

    /// Collidable counts
    pub const PLATFORM_COUNT: usize = 20;
    pub const ASTEROID_COUNT: usize = 5;

    /// Frame rate for directional walk-cycle animation (frames/sec)
    pub const ANIMATION_FRAME_RATE: f32 = 4.0;

    /// Glyph atlas is a 16x16 ASCII grid
    pub const FONTBANK_SIZE: u32 = 16;

    /// Fuel gauge image series length (fuel_00 .. fuel_09)
    pub const FUEL_GAUGE_STEPS: usize = 10;
}

/// Map a fuel level in [0, 100] to a gauge icon index in [0, 9].
///
/// The gauge series has ten steps; a full tank shows the last icon, an
/// empty tank the first.
#[inline]
pub fn fuel_icon_index(fuel: f32) -> usize {
    let step = (fuel / 10.0).round() as isize;
    (step - 1).clamp(0, consts::FUEL_GAUGE_STEPS as isize - 1) as usize
}
