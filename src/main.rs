//! Tile Hopper entry point
//!
//! Runs a scripted headless session: the demo driver stands in for a
//! presentation host, feeding held-key intents into the fixed-timestep
//! clock, draining effect events, and printing the HUD once per second.

use std::path::Path;

use tile_hopper::Settings;
use tile_hopper::assets::AssetCatalog;
use tile_hopper::consts::*;
use tile_hopper::sim::{FixedTimestep, GamePhase, GameState, LevelSource, TickInput};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), tile_hopper::sim::LevelError> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Tile Hopper starting, seed {seed}");

    let settings = Settings::load_from(Path::new("settings.json"));
    let source = LevelSource::new(seed, DEFAULT_LEVEL_COUNT);
    let mut state = GameState::new(&source)?;
    state.smooth_camera = settings.effective_smooth_camera();

    // A real host loads sprites here; the demo leaves them in flight to
    // exercise the placeholder path.
    let mut assets = AssetCatalog::new();
    assets.register("player");
    assets.register("enemy");
    if !assets.is_ready("player") {
        log::info!("sprites still loading, drawing placeholders");
    }

    let mut clock = FixedTimestep::new();
    let mut input = TickInput::default();
    let max_frames = 60 * 60 * 2; // two minutes of simulated time

    for frame in 0u32..max_frames {
        // Demo script: run right, hop periodically, continue through goal
        // screens, restart after defeats.
        input.right = true;
        input.jump = frame % 45 == 20;
        input.advance = frame % 30 == 0;
        input.reset = state.phase == GamePhase::GameOver && frame % 60 == 0;

        clock.advance(&mut state, &source, &mut input, SIM_DT)?;

        for event in state.take_events() {
            let volume = settings.master_volume * settings.sfx_volume;
            log::debug!("sfx {event:?} at volume {volume:.2}");
        }

        if frame % 60 == 0 {
            println!(
                "[{:>3}s] {:<13} level {} '{}'  score {:>5}  coins {:>2}  lives {}",
                frame / 60,
                format!("{:?}", state.phase),
                state.level_index,
                state.level.name,
                state.score,
                state.coins,
                state.display_lives(),
            );
        }

        if state.phase == GamePhase::Win {
            break;
        }
    }

    println!(
        "demo over: {:?}, score {}, coins {}, {} ticks simulated",
        state.phase, state.score, state.coins, state.time_ticks
    );
    Ok(())
}
