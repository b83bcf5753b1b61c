//! encounter-replay: plays the built-in campaign headlessly with a scripted
//! player and logs the encounter as it unfolds.
//!
//! Usage:
//!   encounter-replay [--seed N] [--max-secs N] [--fire-every N]
//!
//! Set `DEBUG_LOGGING=1` for per-spawn debug output, or `RUST_LOG` for a
//! custom filter.

use std::process;

use glam::Vec2;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use barrage_core::constants::{DT, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, TICK_RATE};
use barrage_core::enums::DirectorStatus;
use barrage_core::events::{EncounterEvent, LootIntent};
use barrage_core::player::{PlayerShot, StaticPlayer};
use barrage_core::types::Aabb;
use barrage_sim::{DirectorConfig, EncounterDirector};

/// Damage of one scripted player shot.
const SHOT_DAMAGE: f32 = 10.0;

struct ReplayArgs {
    seed: u64,
    max_secs: u32,
    fire_every: u64,
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }
    let replay = parse_args(&args[1..]);

    let config = DirectorConfig {
        seed: replay.seed,
        ..Default::default()
    };
    let mut director = match EncounterDirector::campaign(config) {
        Ok(director) => director,
        Err(err) => {
            tracing::error!(%err, "failed to load campaign");
            process::exit(1);
        }
    };

    let mut player = StaticPlayer::new(
        Vec2::new(PLAYFIELD_WIDTH * 0.5, PLAYFIELD_HEIGHT - 50.0),
        Vec2::splat(40.0),
    );
    let mut loot: Vec<LootIntent> = Vec::new();
    let mut target: Option<Vec2> = None;
    let max_ticks = u64::from(replay.max_secs) * u64::from(TICK_RATE);
    let mut kills = 0u32;
    let mut score = 0u64;

    for tick in 0..max_ticks {
        if tick % replay.fire_every == 0 {
            if let Some(position) = target {
                let shot = PlayerShot {
                    bounds: Aabb::from_center(position, Vec2::new(6.0, 16.0)),
                    damage: SHOT_DAMAGE,
                };
                director.resolve_player_shots(&[shot], &mut loot);
            }
        }

        let snapshot = director.tick(DT, &mut player);
        for event in &snapshot.events {
            match event {
                EncounterEvent::EnemyKilled { score: points, .. } => {
                    kills += 1;
                    score += u64::from(*points);
                }
                EncounterEvent::PlayerHit { .. } => {}
                other => tracing::info!(tick, event = ?other, "encounter event"),
            }
        }

        // Aim at the boss when present, otherwise the lowest enemy on screen.
        target = snapshot.boss.as_ref().map(|boss| boss.position).or_else(|| {
            snapshot
                .enemies
                .iter()
                .filter(|e| e.position.y > 0.0)
                .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
                .map(|e| e.position)
        });

        if snapshot.status == DirectorStatus::CampaignComplete {
            break;
        }
    }

    tracing::info!(
        status = ?director.status(),
        level = director.current_level(),
        secs = director.time().elapsed_secs,
        kills,
        score,
        loot = loot.len(),
        player_hits = player.hits,
        damage_taken = player.damage_taken,
        "replay finished"
    );
}

/// stdout logging; `DEBUG_LOGGING` turns on debug output for the director.
fn init_logging() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();
    let default_filter = if debug_logging {
        "info,barrage_sim=debug,barrage_ai=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn print_usage() {
    eprintln!(
        "encounter-replay: play the BARRAGE campaign headlessly\n\
         \n\
           --seed <N>        RNG seed (default: 42)\n\
           --max-secs <N>    Stop after N simulated seconds (default: 600)\n\
           --fire-every <N>  Ticks between scripted player shots (default: 6)\n"
    );
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            match args[i + 1].parse() {
                Ok(value) => return value,
                Err(_) => {
                    eprintln!("Invalid value for {flag}: {}", args[i + 1]);
                    process::exit(1);
                }
            }
        }
    }
    default
}

fn parse_args(args: &[String]) -> ReplayArgs {
    ReplayArgs {
        seed: parse_flag(args, "--seed", 42),
        max_secs: parse_flag(args, "--max-secs", 600),
        fire_every: parse_flag(args, "--fire-every", 6u64).max(1),
    }
}
