//! Data-driven game balance
//!
//! Balance values ship with defaults and can be overridden from a JSON
//! file. The tuning file is optional; unlike textures, a missing or broken
//! one only logs and falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable balance values for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Base gravitational acceleration (world units / s^2, negative is
    /// down).
    pub gravity: f32,
    /// Fraction of `gravity` actually applied; lunar descent is gentle.
    pub gravity_scale: f32,
    /// Horizontal speed granted by full thrust intent.
    pub ship_speed: f32,
    /// Descent speed at or below which touching the pad is a landing.
    pub safe_landing_speed: f32,
    /// Tank capacity at session start.
    pub starting_fuel: f32,
    /// Fuel drained per second of held thrust.
    pub fuel_burn_per_second: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            gravity_scale: 0.005,
            ship_speed: 1.0,
            safe_landing_speed: 0.5,
            starting_fuel: 100.0,
            fuel_burn_per_second: 18.0,
        }
    }
}

impl Tuning {
    /// Read tuning from a JSON file, falling back to defaults if the file
    /// is absent or unparseable.
    pub fn load_or_default(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                log::debug!("no tuning file at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("ignoring bad tuning file {}: {err}", path.display());
                Self::default()
            }
        }
    }
}
