//! Session state and outcome types
//!
//! The whole game lives in one `Session` value owned by the caller; there
//! is no global state. Setup is deterministic for a given seed.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};
use crate::assets::SpriteAssets;
use crate::consts::{ASTEROID_COUNT, FUEL_GAUGE_STEPS, PLATFORM_COUNT};
use crate::render::SpriteRenderer;
use crate::tuning::Tuning;
use crate::fuel_icon_index;

/// Classification returned by the physics/collision step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No blocking contact; the entity integrated normally.
    Continue,
    /// Touched the designated landing target within the safe descent speed.
    LandedSafely,
    /// Touched a platform too fast, or one that is not the landing target.
    CrashedOnPlatform,
    /// Touched an asteroid.
    CrashedOnHazard,
    /// Left the horizontal world bounds. Produced by the session
    /// controller's bounds check, never by the collision scan itself.
    OutOfBounds,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Landed,
    CrashedPlatform,
    CrashedHazard,
    OutOfBounds,
    /// The tank ran dry while descending too fast to recover.
    FuelExhausted,
}

impl EndReason {
    /// Whether this terminal state gets the explosion treatment.
    pub fn is_crash(self) -> bool {
        !matches!(self, EndReason::Landed)
    }
}

/// Current phase of a session. Terminal states are sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start control; no physics yet.
    PreLaunch,
    /// Descending under gravity.
    Descending,
    /// Run over.
    Ended(EndReason),
}

/// One game session: the player ship, the collidable set, the fuel-gauge
/// icons, and the phase/fuel bookkeeping driving them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub seed: u64,
    pub phase: GamePhase,
    pub fuel: f32,
    /// Simulation tick counter (fixed steps actually applied).
    pub time_ticks: u64,
    pub player: Entity,
    /// Platforms first, then asteroids. Order is the collision scan order.
    pub collidables: Vec<Entity>,
    /// Ten gauge icons, one per fuel step; only one renders per frame.
    gauge: Vec<Entity>,
    pub tuning: Tuning,
    assets: SpriteAssets,
}

impl Session {
    /// Build a fresh session. All randomness (landing-platform choice,
    /// asteroid placement) comes from the seed.
    pub fn new(seed: u64, tuning: Tuning, assets: SpriteAssets) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut player = Entity::with_sheet(EntityKind::Ship, assets.ship, tuning.ship_speed, 9, 5, 3);
        player.face_up();
        player.position = Vec3::new(0.0, 2.9, 0.0);
        player.width *= 0.5;
        player.acceleration = Vec3::new(0.0, tuning.gravity * tuning.gravity_scale, 0.0);
        player.safe_landing_speed = tuning.safe_landing_speed;
        player.update(0.0, &[]);

        let landing_index = rng.random_range(0..PLATFORM_COUNT);
        log::debug!("landing platform index {landing_index} (seed {seed})");

        let mut collidables = Vec::with_capacity(PLATFORM_COUNT + ASTEROID_COUNT);
        for i in 0..PLATFORM_COUNT {
            // The safe pad uses a visually distinct tile.
            let tile = if i == landing_index { 0 } else { 5 };
            let mut platform =
                Entity::with_sheet(EntityKind::Platform, assets.platforms, 0.0, tile, 16, 16);
            platform.landing_target = i == landing_index;
            platform.face_right();
            platform.position = Vec3::new(-4.75 + i as f32 * 0.5, -3.5, 0.0);
            collidables.push(platform);
        }
        for _ in 0..ASTEROID_COUNT {
            let mut asteroid =
                Entity::with_sheet(EntityKind::Asteroid, assets.asteroids, 0.0, 0, 4, 1);
            asteroid.position = Vec3::new(
                rng.random_range(-4.0f32..4.0),
                rng.random_range(-1.0f32..2.0),
                0.0,
            );
            collidables.push(asteroid);
        }
        for collidable in &mut collidables {
            collidable.scale = Vec3::new(0.5, 0.5, 1.0);
            // Hitboxes much tighter than the rendered tile.
            collidable.width *= 0.1;
            collidable.height *= 0.1;
            collidable.update(0.0, &[]);
        }

        let mut gauge = Vec::with_capacity(FUEL_GAUGE_STEPS);
        for i in 0..FUEL_GAUGE_STEPS {
            let mut icon = Entity::new(EntityKind::Gauge, assets.fuel_gauge[i], 0.0);
            icon.position = Vec3::new(4.5, 3.5, 0.0);
            icon.scale = Vec3::new(0.5, 0.25, 1.0);
            icon.face_right();
            icon.update(0.0, &[]);
            gauge.push(icon);
        }

        Self {
            seed,
            phase: GamePhase::PreLaunch,
            fuel: tuning.starting_fuel,
            time_ticks: 0,
            player,
            collidables,
            gauge,
            tuning,
            assets,
        }
    }

    /// Index of the designated landing platform, if one exists.
    pub fn landing_target_index(&self) -> Option<usize> {
        self.collidables.iter().position(|e| e.landing_target)
    }

    /// Burn fuel for one tick of held thrust, clamped at empty.
    pub fn burn_fuel(&mut self, dt: f32) {
        self.fuel = (self.fuel - self.tuning.fuel_burn_per_second * dt).max(0.0);
    }

    /// Transition to a terminal state. Crash-class endings replace the
    /// player with an explosion-configured entity at the last position,
    /// purely for terminal-frame rendering; no further physics runs.
    pub fn end(&mut self, reason: EndReason) {
        if reason.is_crash() {
            let last_position = self.player.position;
            let mut explosion =
                Entity::with_sheet(EntityKind::Explosion, self.assets.explosion, 0.0, 1, 8, 1);
            explosion.position = last_position;
            explosion.update(0.0, &[]);
            self.player = explosion;
        }
        log::info!(
            "session over after {} ticks: {:?} (fuel left {:.1})",
            self.time_ticks,
            reason,
            self.fuel
        );
        self.phase = GamePhase::Ended(reason);
    }

    /// Draw the whole session through the render boundary: ship (or
    /// explosion), collidables, the gauge icon for the current fuel level,
    /// and the terminal status line.
    pub fn render(&self, renderer: &mut impl SpriteRenderer) {
        renderer.draw_quad(self.player.draw());
        for collidable in &self.collidables {
            renderer.draw_quad(collidable.draw());
        }

        let icon = match self.phase {
            // Full gauge before launch, regardless of tuning.
            GamePhase::PreLaunch => self.gauge.last(),
            GamePhase::Descending => self.gauge.get(fuel_icon_index(self.fuel)),
            GamePhase::Ended(_) => None,
        };
        if let Some(icon) = icon {
            renderer.draw_quad(icon.draw());
        }

        match self.phase {
            GamePhase::Ended(EndReason::Landed) => {
                renderer.draw_text(
                    "MISSION SUCCESS",
                    self.assets.font,
                    0.5,
                    0.05,
                    Vec3::new(-3.5, 2.5, 0.0),
                );
            }
            GamePhase::Ended(_) => {
                renderer.draw_text(
                    "MISSION FAIL",
                    self.assets.font,
                    0.5,
                    0.05,
                    Vec3::new(-2.5, 2.5, 0.0),
                );
            }
            _ => {}
        }
    }
}
