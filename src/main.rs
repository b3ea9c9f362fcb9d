//! Cross Road entry point
//!
//! Native headless runner: plays the recognised levels with the autopilot and
//! reports time and stars, or dumps the generated level configs as JSON.
//!
//! Usage: `cross-road [--settings PATH] [--seed N] [--dump-levels]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use cross_road::assets::AssetCache;
use cross_road::session::{Screen, Session, SessionCommand};
use cross_road::{Autopilot, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lane-crossing arcade game, played headless by the autopilot", long_about = None)]
struct Args {
    /// JSON settings file; missing fields keep their defaults
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Fixed seed for obstacle layouts (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Print the generated level configs as JSON and exit
    #[arg(long)]
    dump_levels: bool,
}

/// Seed from the wall clock so layouts differ between runs
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Cross Road (native) starting...");

    let args = Args::parse();
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    if args.dump_levels {
        match serde_json::to_string_pretty(&settings.levels()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialise levels: {}", e),
        }
        return;
    }

    let assets = match &settings.asset_dir {
        Some(dir) => AssetCache::from_dir(dir),
        None => AssetCache::unavailable(),
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Seed {}", seed);

    let mut session = Session::new(
        settings.levels(),
        settings.screen_width,
        settings.screen_height,
        seed,
        assets.skin_palette(),
    );
    let pilot = Autopilot::default();

    println!("{:<10} {:>9} {:>6} {:>9}", "level", "result", "stars", "attempts");

    session.start_run();
    let mut attempts = 1;
    loop {
        match session.screen() {
            Screen::Playing => {
                let Some(level) = session.level() else {
                    break;
                };
                let mut commands = Vec::new();
                if level.elapsed() >= settings.max_run_seconds {
                    log::warn!(
                        "{} timed out after {:.0}s",
                        level.config().name,
                        settings.max_run_seconds
                    );
                    commands.push(SessionCommand::Escape);
                }
                let steps: Vec<_> = pilot.choose(level).into_iter().collect();

                for cue in session.update(settings.frame_dt, &commands, &steps) {
                    if let Some(sound) = cue.asset(&assets).as_loaded() {
                        log::debug!("Cue {:?} ({} bytes)", cue, sound.len());
                    }
                }
            }
            Screen::Win => {
                if let Some(level) = session.level() {
                    println!(
                        "{:<10} {:>8.2}s {:>6} {:>9}",
                        level.config().name,
                        level.elapsed(),
                        level.stars_earned(),
                        attempts
                    );
                }
                if !session.next_level() {
                    break;
                }
                attempts = 1;
            }
            Screen::Lose | Screen::Home => {
                // Home here means the attempt timed out
                if attempts >= settings.max_attempts {
                    let name = &session.levels()[session.level_index()].name;
                    println!("{:<10} {:>9} {:>6} {:>9}", name, "failed", 0, attempts);
                    break;
                }
                attempts += 1;
                let index = session.level_index();
                session.start_level(index);
            }
        }
    }

    log::info!("Played {} attempts in total", session.attempts());
}
