//! The simulated game object: ship, platform, asteroid, gauge icon
//!
//! One `Entity` type serves every object in a session, polymorphic by
//! configuration rather than by subtype. An entity owns its transform,
//! velocity/acceleration, sprite/animation indices and collision extents,
//! and exposes the outcome-bearing `update` that drives the session.

use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

use super::collision::aabb_overlap;
use super::state::Outcome;
use crate::assets::TextureId;
use crate::consts::ANIMATION_FRAME_RATE;
use crate::render::sprite::{DrawCommand, UvRect, atlas_uv};

/// What role an entity plays in the session. Collision classification
/// needs to tell platforms from hazards; everything else is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Platform,
    Asteroid,
    Gauge,
    Explosion,
}

/// Discrete facing for entities without a directional animation table.
/// Each facing maps to one fixed whole-sprite rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Rotation applied to the model transform for this facing.
    pub fn rotation_radians(self) -> f32 {
        match self {
            Facing::Up => FRAC_PI_2,
            Facing::Down => -FRAC_PI_2,
            Facing::Left => PI,
            Facing::Right => 0.0,
        }
    }
}

/// Per-direction frame sequences for walk-cycle style sprites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkCycles {
    pub up: Vec<u16>,
    pub down: Vec<u16>,
    pub left: Vec<u16>,
    pub right: Vec<u16>,
}

impl WalkCycles {
    pub fn cycle(&self, facing: Facing) -> &[u16] {
        match facing {
            Facing::Up => &self.up,
            Facing::Down => &self.down,
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }
}

/// How an entity responds to facing changes.
///
/// Sprites with a walk-cycle table switch frame sequences; everything else
/// reorients by rotating the whole sprite.
#[derive(Debug, Clone, PartialEq)]
pub enum FacingMode {
    Directional { cycles: WalkCycles, facing: Facing },
    Rotated(Facing),
}

/// Sprite-sheet grid shape (columns x rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteGrid {
    pub cols: u32,
    pub rows: u32,
}

/// A physics-and-animation unit of game state.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Unit-ish intent vector set by the controller each tick, independent
    /// of velocity.
    pub movement: Vec3,
    pub scale: Vec3,
    /// Collision extents, independently settable from `scale` so hitboxes
    /// can be tighter or looser than the sprite bounds. Must be
    /// non-negative (precondition, not checked).
    pub width: f32,
    pub height: f32,
    /// Scalar converting horizontal movement intent into velocity.
    pub speed: f32,
    /// Non-owning handle into the texture store.
    pub texture: TextureId,
    /// Sprite-sheet grid, if this entity draws from an atlas.
    pub grid: Option<SpriteGrid>,
    pub animation_index: usize,
    pub animation_frames: usize,
    animation_time: f32,
    pub facing: FacingMode,
    /// Marks the single designated safe landing platform.
    pub landing_target: bool,
    /// Descent speed at or below which contact with the landing target
    /// counts as a landing rather than a crash. Only meaningful on the
    /// entity being updated (the ship).
    pub safe_landing_speed: f32,
    model_matrix: Mat4,
}

impl Entity {
    /// A plain single-texture entity with no sheet and no animation.
    pub fn new(kind: EntityKind, texture: TextureId, speed: f32) -> Self {
        Self {
            kind,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            movement: Vec3::ZERO,
            scale: Vec3::new(1.0, 1.0, 1.0),
            width: 1.0,
            height: 1.0,
            speed,
            texture,
            grid: None,
            animation_index: 0,
            animation_frames: 0,
            animation_time: 0.0,
            facing: FacingMode::Rotated(Facing::Right),
            landing_target: false,
            safe_landing_speed: 1.0,
            model_matrix: Mat4::IDENTITY,
        }
    }

    /// An entity drawing one fixed cell of a sprite sheet.
    pub fn with_sheet(
        kind: EntityKind,
        texture: TextureId,
        speed: f32,
        index: usize,
        cols: u32,
        rows: u32,
    ) -> Self {
        let mut entity = Self::new(kind, texture, speed);
        entity.grid = Some(SpriteGrid { cols, rows });
        entity.animation_index = index;
        entity.facing = FacingMode::Rotated(Facing::Up);
        entity
    }

    /// An entity with per-direction walk cycles on a sprite sheet.
    pub fn with_walk_cycles(
        kind: EntityKind,
        texture: TextureId,
        speed: f32,
        cycles: WalkCycles,
        cols: u32,
        rows: u32,
    ) -> Self {
        let mut entity = Self::new(kind, texture, speed);
        entity.grid = Some(SpriteGrid { cols, rows });
        entity.animation_frames = cycles.down.len();
        entity.facing = FacingMode::Directional {
            cycles,
            facing: Facing::Down,
        };
        entity
    }

    /// Axis-aligned overlap test against another entity.
    pub fn check_collision(&self, other: &Entity) -> bool {
        aabb_overlap(
            self.position,
            self.width,
            self.height,
            other.position,
            other.width,
            other.height,
        )
    }

    /// Integrate one fixed step, testing against every collidable first.
    ///
    /// The first overlapping collidable (array order) ends the step
    /// immediately: no animation advance, no integration, no transform
    /// rebuild for this tick. Otherwise the entity animates, integrates
    /// semi-implicit Euler, rebuilds its model transform and continues.
    pub fn update(&mut self, delta_time: f32, collidables: &[Entity]) -> Outcome {
        for other in collidables {
            if self.check_collision(other) {
                return self.classify_contact(other);
            }
        }

        self.advance_animation(delta_time);

        // Horizontal velocity is driven directly by intent: no inertia.
        self.velocity.x = self.movement.x * self.speed;
        self.velocity += self.acceleration * delta_time;
        self.position += self.velocity * delta_time;

        self.rebuild_transform();
        Outcome::Continue
    }

    /// Classify an overlap with `other` into a terminal outcome.
    fn classify_contact(&self, other: &Entity) -> Outcome {
        if other.landing_target && self.velocity.y >= -self.safe_landing_speed {
            Outcome::LandedSafely
        } else if other.kind == EntityKind::Asteroid {
            Outcome::CrashedOnHazard
        } else {
            Outcome::CrashedOnPlatform
        }
    }

    /// Advance the walk-cycle frame timer. Rotated sprites have no frame
    /// animation, and a stationary entity holds its current frame.
    fn advance_animation(&mut self, delta_time: f32) {
        if !matches!(self.facing, FacingMode::Directional { .. }) {
            return;
        }
        if self.movement.length() == 0.0 || self.animation_frames == 0 {
            return;
        }

        self.animation_time += delta_time;
        let seconds_per_frame = 1.0 / ANIMATION_FRAME_RATE;
        if self.animation_time >= seconds_per_frame {
            self.animation_time = 0.0;
            self.animation_index = (self.animation_index + 1) % self.animation_frames;
        }
    }

    /// Rebuild the model transform from scratch: translate, then the
    /// facing rotation (rotated sprites only), then scale. Recomputing
    /// every tick keeps the transform a pure function of current state.
    fn rebuild_transform(&mut self) {
        let rotation = match &self.facing {
            FacingMode::Rotated(facing) => facing.rotation_radians(),
            FacingMode::Directional { .. } => 0.0,
        };
        self.model_matrix = Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(rotation)
            * Mat4::from_scale(self.scale);
    }

    /// Current model transform, as of the last `update`.
    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    fn face(&mut self, new_facing: Facing) {
        match &mut self.facing {
            FacingMode::Directional { cycles, facing } => {
                if *facing != new_facing {
                    *facing = new_facing;
                    self.animation_frames = cycles.cycle(new_facing).len();
                    if self.animation_frames > 0 {
                        self.animation_index %= self.animation_frames;
                    } else {
                        self.animation_index = 0;
                    }
                }
            }
            FacingMode::Rotated(facing) => *facing = new_facing,
        }
    }

    pub fn face_up(&mut self) {
        self.face(Facing::Up);
    }

    pub fn face_down(&mut self) {
        self.face(Facing::Down);
    }

    pub fn face_left(&mut self) {
        self.face(Facing::Left);
    }

    pub fn face_right(&mut self) {
        self.face(Facing::Right);
    }

    /// Set leftward movement intent and face that way.
    pub fn move_left(&mut self) {
        self.movement.x = -1.0;
        self.face_left();
    }

    /// Set rightward movement intent and face that way.
    pub fn move_right(&mut self) {
        self.movement.x = 1.0;
        self.face_right();
    }

    /// Clamp diagonal intent so it is never faster than axis movement.
    pub fn normalize_movement(&mut self) {
        if self.movement.length() > 1.0 {
            self.movement = self.movement.normalize();
        }
    }

    /// Produce the draw call for this entity. Three mutually exclusive
    /// paths: directional-cycle frame lookup, flat sheet index, or a plain
    /// full-texture quad.
    pub fn draw(&self) -> DrawCommand {
        let uv = match (&self.facing, self.grid) {
            (FacingMode::Directional { cycles, facing }, Some(grid)) => {
                let frame = cycles.cycle(*facing)[self.animation_index] as usize;
                atlas_uv(frame, grid.cols, grid.rows)
            }
            (_, Some(grid)) => atlas_uv(self.animation_index, grid.cols, grid.rows),
            (_, None) => UvRect::FULL,
        };
        DrawCommand {
            model: self.model_matrix,
            texture: self.texture,
            uv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn walk_cycles() -> WalkCycles {
        WalkCycles {
            up: vec![8, 9, 10, 11],
            down: vec![0, 1, 2, 3],
            left: vec![4, 5, 6, 7],
            right: vec![12, 13, 14, 15],
        }
    }

    fn walker() -> Entity {
        Entity::with_walk_cycles(EntityKind::Ship, TextureId(1), 1.0, walk_cycles(), 4, 4)
    }

    #[test]
    fn zero_intent_zero_acceleration_is_a_fixed_point() {
        let mut entity = Entity::new(EntityKind::Ship, TextureId(1), 1.0);
        entity.position = Vec3::new(1.5, -2.0, 0.0);

        let outcome = entity.update(1.0 / 60.0, &[]);

        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(entity.position, Vec3::new(1.5, -2.0, 0.0));
        assert_eq!(entity.velocity, Vec3::ZERO);
    }

    #[test]
    fn gravity_accumulates_on_velocity() {
        let mut entity = Entity::new(EntityKind::Ship, TextureId(1), 1.0);
        entity.acceleration = Vec3::new(0.0, -1.0, 0.0);

        entity.update(0.5, &[]);

        assert_eq!(entity.velocity.y, -0.5);
        assert_eq!(entity.position.y, -0.25);
    }

    #[test]
    fn horizontal_velocity_tracks_intent_without_inertia() {
        let mut entity = Entity::new(EntityKind::Ship, TextureId(1), 2.0);
        entity.move_right();
        entity.update(0.1, &[]);
        assert_eq!(entity.velocity.x, 2.0);

        // Dropping the intent stops horizontal motion outright.
        entity.movement = Vec3::ZERO;
        entity.update(0.1, &[]);
        assert_eq!(entity.velocity.x, 0.0);
    }

    #[test]
    fn transform_is_pure_function_of_state() {
        let mut entity = Entity::with_sheet(EntityKind::Ship, TextureId(1), 1.0, 9, 5, 3);
        entity.position = Vec3::new(0.25, 2.9, 0.0);
        entity.scale = Vec3::new(0.5, 0.5, 1.0);

        entity.update(0.0, &[]);
        let first = entity.model_matrix();
        entity.update(0.0, &[]);
        let second = entity.model_matrix();

        assert_eq!(first.to_cols_array(), second.to_cols_array());
    }

    #[test]
    fn safe_contact_with_landing_target_is_a_landing() {
        let mut ship = Entity::new(EntityKind::Ship, TextureId(1), 1.0);
        ship.safe_landing_speed = 0.5;
        ship.velocity.y = -0.3;

        let mut pad = Entity::new(EntityKind::Platform, TextureId(2), 0.0);
        pad.landing_target = true;

        assert_eq!(ship.update(1.0 / 60.0, &[pad]), Outcome::LandedSafely);
    }

    #[test]
    fn fast_contact_with_landing_target_is_a_platform_crash() {
        let mut ship = Entity::new(EntityKind::Ship, TextureId(1), 1.0);
        ship.safe_landing_speed = 0.5;
        ship.velocity.y = -2.0;

        let mut pad = Entity::new(EntityKind::Platform, TextureId(2), 0.0);
        pad.landing_target = true;

        assert_eq!(ship.update(1.0 / 60.0, &[pad]), Outcome::CrashedOnPlatform);
    }

    #[test]
    fn asteroid_contact_is_a_hazard_crash() {
        let mut ship = Entity::new(EntityKind::Ship, TextureId(1), 1.0);
        ship.velocity.y = -0.1; // slow descent does not matter on a hazard

        let asteroid = Entity::new(EntityKind::Asteroid, TextureId(3), 0.0);

        assert_eq!(ship.update(1.0 / 60.0, &[asteroid]), Outcome::CrashedOnHazard);
    }

    #[test]
    fn collision_skips_integration_for_the_tick() {
        let mut ship = Entity::new(EntityKind::Ship, TextureId(1), 1.0);
        ship.acceleration = Vec3::new(0.0, -9.81, 0.0);
        let before = ship.position;

        let pad = Entity::new(EntityKind::Platform, TextureId(2), 0.0);
        let outcome = ship.update(1.0 / 60.0, &[pad]);

        assert_ne!(outcome, Outcome::Continue);
        assert_eq!(ship.position, before);
        assert_eq!(ship.velocity, Vec3::ZERO);
    }

    #[test]
    fn facing_switches_cycle_in_directional_mode() {
        let mut entity = walker();
        entity.animation_index = 3;

        entity.face_left();
        match &entity.facing {
            FacingMode::Directional { cycles, facing } => {
                assert_eq!(*facing, Facing::Left);
                assert_eq!(cycles.cycle(*facing), &[4, 5, 6, 7]);
            }
            FacingMode::Rotated(_) => panic!("walker lost its cycle table"),
        }
        assert!(entity.animation_index < entity.animation_frames);
    }

    #[test]
    fn facing_sets_rotation_in_rotated_mode() {
        let mut entity = Entity::with_sheet(EntityKind::Ship, TextureId(1), 1.0, 9, 5, 3);
        entity.face_left();
        assert_eq!(entity.facing, FacingMode::Rotated(Facing::Left));

        entity.update(0.0, &[]);
        // A left-facing sprite is rotated a half turn: local +x maps to -x.
        let rotated_x = entity.model_matrix().transform_vector3(Vec3::X);
        assert!((rotated_x.x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn stationary_walker_holds_its_frame() {
        let mut entity = walker();
        entity.animation_index = 2;
        entity.update(1.0, &[]);
        assert_eq!(entity.animation_index, 2);
    }

    #[test]
    fn moving_walker_advances_frames_in_cycle_order() {
        let mut entity = walker();
        entity.movement.x = 1.0;
        // Each step is exactly one frame period.
        let frame_period = 1.0 / ANIMATION_FRAME_RATE;
        for expected in [1, 2, 3, 0] {
            entity.update(frame_period, &[]);
            assert_eq!(entity.animation_index, expected);
        }
    }

    #[test]
    fn draw_paths_select_expected_frames() {
        // (a) directional: frame comes from the active cycle
        let mut directional = walker();
        directional.face_up();
        directional.animation_index = 1;
        let cmd = directional.draw();
        assert_eq!(cmd.uv, atlas_uv(9, 4, 4));

        // (b) flat sheet: the index itself is the cell
        let flat = Entity::with_sheet(EntityKind::Platform, TextureId(2), 0.0, 5, 16, 16);
        assert_eq!(flat.draw().uv, atlas_uv(5, 16, 16));

        // (c) no grid: whole texture
        let plain = Entity::new(EntityKind::Gauge, TextureId(3), 0.0);
        assert_eq!(plain.draw().uv, UvRect::FULL);
    }

    proptest! {
        #[test]
        fn animation_index_stays_in_bounds(
            steps in 1usize..200,
            dt in 0.001f32..0.1,
        ) {
            let mut entity = walker();
            entity.movement.x = 1.0;
            for _ in 0..steps {
                entity.update(dt, &[]);
                prop_assert!(entity.animation_index < entity.animation_frames);
            }
        }
    }
}
