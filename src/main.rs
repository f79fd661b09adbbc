//! Pixel Putt entry point
//!
//! Runs a minigame headless against an ASCII terrain map and prints the
//! final state as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use glam::Vec2;
use serde::Serialize;

use pixel_putt::consts::BALL_RADIUS;
use pixel_putt::error::Result;
use pixel_putt::games::golf::{MAX_POWER, MIN_POWER};
use pixel_putt::games::{GolfGame, GolfInput, PlayerInput, TagMatch};
use pixel_putt::sim::{Body, PixelMask, Playfield, step};
use pixel_putt::{Tuning, logging};

/// Pixel-mask ball physics sandbox
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RunArgs {
    /// ASCII terrain map (default: a walled 256x256 arena)
    #[arg(long)]
    map: Option<PathBuf>,
    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Keep putting at a fixed aim until the hole is sunk or time runs out
    Golf {
        #[command(flatten)]
        run: RunArgs,
        /// Aim in degrees (270 = up)
        #[arg(long, default_value_t = 270.0)]
        angle: f32,
        #[arg(long, default_value_t = 3)]
        power: u8,
    },
    /// Two demo players chase each other
    Tag {
        #[command(flatten)]
        run: RunArgs,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// One ball launched and left to bounce
    Bounce {
        #[command(flatten)]
        run: RunArgs,
        #[arg(long, default_value_t = 128.0)]
        x: f32,
        #[arg(long, default_value_t = 128.0)]
        y: f32,
        #[arg(long, default_value_t = 3.0)]
        vx: f32,
        #[arg(long, default_value_t = -2.0)]
        vy: f32,
    },
}

/// JSON printed after a golf run
#[derive(Serialize)]
struct GolfSummary<'a> {
    hole: u32,
    banner: Vec<String>,
    game: &'a GolfGame,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args.command) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Golf { run, angle, power } => {
            let (mask, tuning) = load(&run, "golf")?;
            let mut game = GolfGame::new(tuning);
            game.rotation = angle;
            let power = power.clamp(MIN_POWER, MAX_POWER);
            let shoot = GolfInput {
                shoot: true,
                ..Default::default()
            };
            for _ in 0..run.frames {
                if game.holes > 0 {
                    break;
                }
                let input = if game.ball.is_resting() {
                    game.power = power;
                    shoot.clone()
                } else {
                    GolfInput::default()
                };
                game.tick(&mask, &input);
            }
            log::info!("Golf: {} shots, {} holes", game.shots, game.holes);
            let summary = GolfSummary {
                hole: game.hole(),
                banner: game.banner().map(|b| b.lines()).unwrap_or_default(),
                game: &game,
            };
            Ok(serde_json::to_string_pretty(&summary)?)
        }
        Command::Tag { run, seed } => {
            let (mask, tuning) = load(&run, "tag")?;
            let mut game = TagMatch::new(seed, tuning);
            for frame in 0..run.frames {
                let inputs = demo_inputs(&game, frame);
                game.tick(&mask, &inputs);
                if game.game_over {
                    break;
                }
            }
            Ok(serde_json::to_string_pretty(&game)?)
        }
        Command::Bounce { run, x, y, vx, vy } => {
            let (mask, tuning) = load(&run, "bounce")?;
            let mut ball = Body::new(1, Vec2::new(x, y), BALL_RADIUS, tuning);
            ball.apply_impulse(Vec2::new(vx, vy));
            let field = Playfield::default();
            let mut bounces = 0;
            for _ in 0..run.frames {
                bounces += step(&mut ball, &mask, &field).len();
                if ball.is_resting() {
                    break;
                }
            }
            log::info!("Bounce: {} events, resting: {}", bounces, ball.is_resting());
            Ok(serde_json::to_string_pretty(&ball)?)
        }
    }
}

fn load(run: &RunArgs, preset: &str) -> Result<(PixelMask, Tuning)> {
    let mask = load_mask(run.map.as_deref())?;
    let tuning = match &run.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::preset(preset).unwrap_or_default(),
    };
    Ok((mask, tuning))
}

fn load_mask(path: Option<&Path>) -> Result<PixelMask> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let mask = PixelMask::from_ascii(&text)?;
            log::info!(
                "Loaded {}x{} map from {}",
                mask.width(),
                mask.height(),
                path.display()
            );
            Ok(mask)
        }
        None => Ok(PixelMask::walled(256, 256, 4)),
    }
}

/// Simple chase AI: the tagger hunts, the other runs, both hop now and then
fn demo_inputs(game: &TagMatch, frame: u32) -> [PlayerInput; 2] {
    let pos = [game.players[0].ball.pos, game.players[1].ball.pos];
    [0, 1].map(|i| {
        let other = pos[1 - i];
        let toward = other.x > pos[i].x;
        let chase = i == game.tagger;
        let go_right = toward == chase;
        PlayerInput {
            jump: frame % 40 == (i as u32) * 20 || (chase && other.y < pos[i].y - 12.0 && frame % 10 == 0),
            left: !go_right,
            right: go_right,
            ..Default::default()
        }
    })
}
