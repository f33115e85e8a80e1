//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies past the draw-command boundary

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::aabb_overlap;
pub use entity::{Entity, EntityKind, Facing, FacingMode, SpriteGrid, WalkCycles};
pub use state::{EndReason, GamePhase, Outcome, Session};
pub use tick::{FrameClock, TickInput, tick};
