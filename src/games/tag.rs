//! Two-player tag: bounce around the arena, touch to pass "it" along
//!
//! Whoever is "it" when the round timer runs out loses.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{BALL_RADIUS, FRAME_RATE};
use crate::settings::Tuning;
use crate::sim::{
    Body, BodyEvent, Playfield, TerrainMask, resolve_ball_contact, settle_after_contact, step,
};

/// Starting points for player 1 and player 2
pub const SPAWNS: [Vec2; 2] = [Vec2::new(20.0, 228.0), Vec2::new(235.0, 228.0)];
pub const JUMP_SPEED: f32 = 2.5;
/// Jumps available before touching a wall again
pub const MAX_JUMPS: u8 = 2;
pub const DIVE_SPEED: f32 = 1.0;
pub const STEER_ACCEL: f32 = 0.12 / 1.18;
pub const GRAVITY: f32 = 0.1;
pub const ROUND_SECONDS: u64 = 50;

/// One player's buttons for a frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Pressed this frame
    pub jump: bool,
    /// Held
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub reset: bool,
}

/// What the host should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagEvent {
    /// The balls touched; `tagger` is now "it"
    Tagged { tagger: usize },
    /// Time is up
    RoundOver { loser: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub ball: Body,
    pub jumps: u8,
}

/// A round of tag
#[derive(Debug, Clone, Serialize)]
pub struct TagMatch {
    pub players: [Player; 2],
    pub field: Playfield,
    /// Index of the player who is "it"
    pub tagger: usize,
    pub elapsed_ticks: u64,
    pub round_ticks: u64,
    pub game_over: bool,
    pub seed: u64,
}

impl TagMatch {
    /// New round; the first tagger is drawn from `seed`
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let tagger = rng.random_range(0..2);
        let players = [0, 1].map(|i| Player {
            ball: Body::new(i as u32 + 1, SPAWNS[i], BALL_RADIUS, tuning.clone()),
            jumps: MAX_JUMPS,
        });
        log::info!("Tag round starts, player {} is it", tagger + 1);
        Self {
            players,
            field: Playfield::default(),
            tagger,
            elapsed_ticks: 0,
            round_ticks: ROUND_SECONDS * FRAME_RATE as u64,
            game_over: false,
            seed,
        }
    }

    /// Seconds left on the clock
    pub fn remaining_seconds(&self) -> f32 {
        self.round_ticks.saturating_sub(self.elapsed_ticks) as f32 / FRAME_RATE as f32
    }

    /// Advance one frame
    pub fn tick<M: TerrainMask + ?Sized>(
        &mut self,
        mask: &M,
        inputs: &[PlayerInput; 2],
    ) -> Vec<TagEvent> {
        let mut events = Vec::new();

        // Each ball's own movement and wall bounces come first
        for (player, input) in self.players.iter_mut().zip(inputs) {
            controls(player, input);
            let body_events = step(&mut player.ball, mask, &self.field);
            if body_events
                .iter()
                .any(|e| matches!(e, BodyEvent::WallBounce { .. }))
            {
                player.jumps = MAX_JUMPS;
            }
            if !input.jump {
                player.ball.push(Vec2::new(0.0, GRAVITY));
            }
        }

        // Then ball-vs-ball, then the wall re-check it may require
        let [first, second] = &mut self.players;
        if !self.game_over {
            let bounce = first.ball.tuning.contact_bounce;
            if resolve_ball_contact(&mut first.ball, &mut second.ball, mask, bounce) {
                self.tagger = 1 - self.tagger;
                log::info!("Tag! Player {} is it", self.tagger + 1);
                events.push(TagEvent::Tagged {
                    tagger: self.tagger,
                });
            }
        }
        for player in [first, second] {
            if settle_after_contact(&mut player.ball, mask) {
                player.jumps = MAX_JUMPS;
            }
        }

        self.elapsed_ticks += 1;
        if !self.game_over && self.elapsed_ticks > self.round_ticks {
            self.game_over = true;
            log::info!("Round over, player {} lost", self.tagger + 1);
            events.push(TagEvent::RoundOver {
                loser: self.tagger,
            });
        }
        events
    }
}

fn controls(player: &mut Player, input: &PlayerInput) {
    let ball = &mut player.ball;
    if input.jump && player.jumps > 0 {
        ball.push(Vec2::new(0.0, -JUMP_SPEED));
        player.jumps -= 1;
    }
    if input.down {
        ball.push(Vec2::new(0.0, DIVE_SPEED));
    }
    if input.left {
        ball.push(Vec2::new(-STEER_ACCEL, 0.0));
    }
    if input.right {
        ball.push(Vec2::new(STEER_ACCEL, 0.0));
    }
    if input.reset {
        ball.pos = ball.spawn;
        ball.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PixelMask, TerrainCode};

    fn idle() -> [PlayerInput; 2] {
        [PlayerInput::default(); 2]
    }

    #[test]
    fn test_seed_picks_tagger_deterministically() {
        let a = TagMatch::new(7, Tuning::tag());
        let b = TagMatch::new(7, Tuning::tag());
        assert_eq!(a.tagger, b.tagger);
        assert!(a.tagger < 2);
    }

    #[test]
    fn test_touch_passes_tag() {
        let mask = PixelMask::new(256, 256);
        let mut game = TagMatch::new(1, Tuning::tag());
        game.players[0].ball.pos = Vec2::new(100.0, 100.0);
        game.players[1].ball.pos = Vec2::new(106.0, 100.0);
        let before = game.tagger;

        let events = game.tick(&mask, &idle());
        assert_eq!(events, vec![TagEvent::Tagged { tagger: 1 - before }]);
        assert_eq!(game.tagger, 1 - before);
        let gap = (game.players[0].ball.pos - game.players[1].ball.pos).length();
        assert!((gap - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_jumps_are_limited_and_refilled_by_walls() {
        let mask = PixelMask::new(256, 256);
        let mut game = TagMatch::new(3, Tuning::tag());
        game.players[0].ball.pos = Vec2::new(60.0, 120.0);
        let jump = [
            PlayerInput {
                jump: true,
                ..Default::default()
            },
            PlayerInput::default(),
        ];

        game.tick(&mask, &jump);
        game.tick(&mask, &jump);
        assert_eq!(game.players[0].jumps, 0);
        let vy = game.players[0].ball.vel.y;
        game.tick(&mask, &jump);
        assert_eq!(game.players[0].jumps, 0);
        // Third press adds nothing beyond damping
        assert!(game.players[0].ball.vel.y >= vy);

        // Drop the ball onto a floor: the bounce gives the jumps back
        let mut floor = PixelMask::new(256, 256);
        floor.fill_rect(0, 200, 256, 56, TerrainCode::Wall);
        game.players[0].ball.pos = Vec2::new(60.0, 194.0);
        game.players[0].ball.apply_impulse(Vec2::new(0.0, 3.0));
        game.tick(&floor, &idle());
        assert_eq!(game.players[0].jumps, MAX_JUMPS);
    }

    #[test]
    fn test_wall_settle_refills_jumps() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_rect(0, 100, 256, 10, TerrainCode::Wall);
        let mut game = TagMatch::new(5, Tuning::tag());
        game.players[0].ball.pos = Vec2::new(60.0, 104.0);
        game.players[0].jumps = 0;

        game.tick(&mask, &idle());
        assert_eq!(game.players[0].jumps, MAX_JUMPS);
    }

    #[test]
    fn test_round_ends_with_tagger_losing() {
        let mask = PixelMask::walled(256, 256, 4);
        let mut game = TagMatch::new(11, Tuning::tag());
        game.round_ticks = 10;
        let mut over = Vec::new();
        for _ in 0..12 {
            over.extend(
                game.tick(&mask, &idle())
                    .into_iter()
                    .filter(|e| matches!(e, TagEvent::RoundOver { .. })),
            );
        }
        assert_eq!(over, vec![TagEvent::RoundOver { loser: game.tagger }]);
        assert!(game.game_over);
        assert_eq!(game.remaining_seconds(), 0.0);
    }
}
