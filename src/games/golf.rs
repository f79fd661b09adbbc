//! Mini golf: aim, pick a power, putt, count strokes
//!
//! The host renders the current hole (see [`GolfGame::hole`]) and hands its
//! terrain mask to [`GolfGame::tick`] once per frame.

use glam::Vec2;
use serde::Serialize;

use crate::consts::BALL_RADIUS;
use crate::settings::Tuning;
use crate::sim::{
    Body, BodyEvent, NudgeDirection, Playfield, ResetCause, TerrainMask, resting_nudge, step,
};
use crate::{heading, wrap_degrees};

/// Tee position
pub const TEE: Vec2 = Vec2::new(20.0, 228.0);
pub const START_POWER: u8 = 3;
pub const MIN_POWER: u8 = 1;
pub const MAX_POWER: u8 = 10;
/// Aim starts straight up
pub const START_ROTATION: f32 = 270.0;
/// Holes sunk to finish the course
pub const FINAL_HOLE: u32 = 4;

/// Input for one frame; only one action is taken, in field order
#[derive(Debug, Clone, Default)]
pub struct GolfInput {
    pub shoot: bool,
    pub power_up: bool,
    pub power_down: bool,
    /// Held: aim turns one degree per frame
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Put the ball back on the tee without a stroke
    pub reset: bool,
}

/// HUD message for the current progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Banner {
    Instructions,
    Nice,
    Win { average_shots: f32 },
}

impl Banner {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Banner::Instructions => vec![
                "Use the arrow keys to aim".to_string(),
                "and the space bar to shoot.".to_string(),
                "Press R to reset the ball.".to_string(),
            ],
            Banner::Nice => vec!["Nice!".to_string()],
            Banner::Win { average_shots } => vec![
                "You win!".to_string(),
                format!("With an average of {average_shots:.2} shots per hole"),
            ],
        }
    }
}

/// A round of golf
#[derive(Debug, Clone, Serialize)]
pub struct GolfGame {
    pub ball: Body,
    pub field: Playfield,
    /// Shot strength, MIN_POWER..=MAX_POWER
    pub power: u8,
    /// Aim in degrees, screen space
    pub rotation: f32,
    pub shots: u32,
    /// Holes sunk; also the index of the hole being played
    pub holes: u32,
}

impl Default for GolfGame {
    fn default() -> Self {
        Self::new(Tuning::golf())
    }
}

impl GolfGame {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            ball: Body::new(1, TEE, BALL_RADIUS, tuning),
            field: Playfield::default(),
            power: START_POWER,
            rotation: START_ROTATION,
            shots: 0,
            holes: 0,
        }
    }

    /// Hole currently in play (which course the host should draw)
    pub fn hole(&self) -> u32 {
        self.holes.min(FINAL_HOLE)
    }

    pub fn is_finished(&self) -> bool {
        self.holes >= FINAL_HOLE
    }

    pub fn average_shots(&self) -> f32 {
        self.shots as f32 / (self.holes + 1) as f32
    }

    pub fn banner(&self) -> Option<Banner> {
        match self.holes {
            0 => Some(Banner::Instructions),
            1..=3 => Some(Banner::Nice),
            FINAL_HOLE => Some(Banner::Win {
                average_shots: self.average_shots(),
            }),
            _ => None,
        }
    }

    /// Advance one frame
    pub fn tick<M: TerrainMask + ?Sized>(&mut self, mask: &M, input: &GolfInput) -> Vec<BodyEvent> {
        let events = if self.ball.is_resting() {
            self.controls(input);
            Vec::new()
        } else {
            step(&mut self.ball, mask, &self.field)
        };

        let sunk = events.contains(&BodyEvent::Reset {
            cause: ResetCause::Goal,
        });
        let stroke_over = events.iter().any(|e| {
            matches!(
                e,
                BodyEvent::Stopped
                    | BodyEvent::Hazard
                    | BodyEvent::Reset {
                        cause: ResetCause::OutOfBounds
                    }
            )
        });
        if sunk {
            self.holes += 1;
            self.power = START_POWER;
            log::info!("Hole {} sunk, {} shots so far", self.holes, self.shots);
        } else if stroke_over {
            self.end_stroke();
        }

        self.rotation = wrap_degrees(self.rotation);
        resting_nudge(&mut self.ball, mask, NudgeDirection::AwayFromAim(self.rotation));
        events
    }

    fn controls(&mut self, input: &GolfInput) {
        if input.shoot {
            let velocity = heading(self.rotation) * self.power as f32;
            log::debug!("Shot at {}° power {}", self.rotation, self.power);
            self.ball.apply_impulse(velocity);
        } else if input.power_up && self.power < MAX_POWER {
            self.power += 1;
        } else if input.power_down && self.power > MIN_POWER {
            self.power -= 1;
        } else if input.rotate_left {
            self.rotation -= 1.0;
        } else if input.rotate_right {
            self.rotation += 1.0;
        } else if input.reset {
            self.ball.pos = self.ball.spawn;
            self.ball.stop();
        }
    }

    fn end_stroke(&mut self) {
        self.shots += 1;
        self.power = START_POWER;
    }
}
