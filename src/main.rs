//! Moonfall entry point
//!
//! Runs a headless deterministic session; window/input/GPU plumbing lives
//! in a platform layer built on the `SpriteRenderer` boundary.

use std::path::PathBuf;

use clap::Parser;
use rand::Rng;

use moonfall::assets::{SpriteAssets, TextureStore};
use moonfall::consts::FIXED_TIMESTEP;
use moonfall::render::QuadBatch;
use moonfall::sim::{FrameClock, GamePhase, Session, TickInput, tick};
use moonfall::{Tuning, fuel_icon_index};

#[derive(Debug, Parser)]
#[command(name = "moonfall", about = "A Lunar Lander style 2D arcade game")]
struct Args {
    /// Session seed; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many fixed steps if the session has not ended
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,

    /// Asset directory; when given, all textures are decoded at startup
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Tuning override file (JSON)
    #[arg(long, default_value = "tuning.json")]
    tuning: PathBuf,

    /// Let the autopilot fly toward the pad instead of free-falling
    #[arg(long)]
    autopilot: bool,
}

/// Steer toward the landing pad: thrust whichever way closes the gap,
/// coast inside the deadband so fuel lasts.
fn autopilot(session: &Session) -> TickInput {
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    if session.phase != GamePhase::Descending {
        return input;
    }
    let Some(pad_index) = session.landing_target_index() else {
        return input;
    };
    let gap = session.collidables[pad_index].position.x - session.player.position.x;
    if gap > 0.1 {
        input.thrust_right = true;
    } else if gap < -0.1 {
        input.thrust_left = true;
    }
    input
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let tuning = Tuning::load_or_default(&args.tuning);

    let mut store = TextureStore::new();
    let assets = match &args.assets {
        Some(dir) => SpriteAssets::load(&mut store, dir),
        None => SpriteAssets::placeholder(),
    };
    log::info!("session seed {seed}, {} textures loaded", store.len());

    let mut session = Session::new(seed, tuning, assets);
    let mut clock = FrameClock::new();

    // Headless frames arrive at exactly one step of wall time each; an
    // interactive platform layer feeds real frame deltas instead.
    while !matches!(session.phase, GamePhase::Ended(_)) && session.time_ticks < args.max_ticks {
        let input = if args.autopilot {
            autopilot(&session)
        } else {
            TickInput {
                start: true,
                ..Default::default()
            }
        };
        for _ in 0..clock.advance(FIXED_TIMESTEP) {
            tick(&mut session, &input, FIXED_TIMESTEP);
        }
    }

    let mut batch = QuadBatch::new();
    session.render(&mut batch);

    match session.phase {
        GamePhase::Ended(reason) => log::info!(
            "ended after {} ticks: {:?} (gauge step {}, final frame {} vertices)",
            session.time_ticks,
            reason,
            fuel_icon_index(session.fuel),
            batch.vertex_count()
        ),
        _ => log::warn!(
            "still descending after {} ticks, giving up",
            session.time_ticks
        ),
    }
}
