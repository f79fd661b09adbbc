//! Moving bodies and the playfield they live in

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::probe::ProbeRing;
use super::terrain::TerrainMask;
use crate::consts::SCREEN_SIZE;
use crate::settings::Tuning;

/// Body lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyState {
    /// At rest, waiting for an impulse
    Idle,
    /// Moving; `step` resolves collisions every frame
    Moving,
    /// Being snapped back to spawn (only seen mid-reset)
    Resetting,
}

/// Movement axis, for per-axis wall bounces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Why a body was sent back to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    Goal,
    OutOfBounds,
}

/// Things that happened to a body during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyEvent {
    WallBounce { axis: Axis },
    Decelerated,
    Boosted,
    /// Hit a dead-stop pixel and was put back where the step began
    Hazard,
    /// Speed decayed below the stop threshold
    Stopped,
    Reset { cause: ResetCause },
}

/// Axis-aligned rectangle a body must stay inside (edges inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::screen(SCREEN_SIZE, SCREEN_SIZE)
    }
}

impl Playfield {
    /// Screen-sized field anchored at the origin
    pub fn screen(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A ball: a point with a circular footprint probed against the mask
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    pub id: u32,
    /// Center of the footprint
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    /// Where resets put the body back
    pub spawn: Vec2,
    pub state: BodyState,
    /// Times sent back to spawn
    pub resets: u32,
    pub tuning: Tuning,
    #[serde(skip)]
    ring: ProbeRing,
}

impl Body {
    pub fn new(id: u32, spawn: Vec2, radius: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            id,
            pos: spawn,
            vel: Vec2::ZERO,
            spawn,
            state: BodyState::Idle,
            resets: 0,
            ring: ProbeRing::new(radius, tuning.sample_count),
            tuning,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.ring.radius()
    }

    #[inline]
    pub fn ring(&self) -> &ProbeRing {
        &self.ring
    }

    /// True once the body has come to rest
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.state == BodyState::Idle
    }

    /// Set the velocity outright and start moving (a shot)
    pub fn apply_impulse(&mut self, velocity: Vec2) {
        self.vel = velocity;
        self.state = BodyState::Moving;
    }

    /// Add to the velocity (steering, gravity) and wake the body if needed
    pub fn push(&mut self, delta: Vec2) {
        self.vel += delta;
        if self.vel != Vec2::ZERO {
            self.state = BodyState::Moving;
        }
    }

    /// Halt in place
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.state = BodyState::Idle;
    }

    /// Snap back to spawn, counting exactly one reset
    pub fn reset(&mut self, cause: ResetCause) -> BodyEvent {
        self.state = BodyState::Resetting;
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.resets += 1;
        self.state = BodyState::Idle;
        log::info!("Body {} reset ({:?}), {} resets", self.id, cause, self.resets);
        BodyEvent::Reset { cause }
    }

    /// True if the footprint centered at `center` would overlap a wall
    #[inline]
    pub fn would_collide<M: TerrainMask + ?Sized>(&self, mask: &M, center: Vec2) -> bool {
        self.ring.would_collide(mask, center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body_is_idle_at_spawn() {
        let body = Body::new(1, Vec2::new(20.0, 228.0), 4.0, Tuning::golf());
        assert_eq!(body.pos, Vec2::new(20.0, 228.0));
        assert!(body.is_resting());
        assert_eq!(body.radius(), 4.0);
        assert_eq!(body.ring().sample_count(), 360);
    }

    #[test]
    fn test_impulse_and_reset() {
        let mut body = Body::new(1, Vec2::new(20.0, 228.0), 4.0, Tuning::golf());
        body.apply_impulse(Vec2::new(0.0, -3.0));
        assert_eq!(body.state, BodyState::Moving);

        body.pos = Vec2::new(100.0, 100.0);
        let event = body.reset(ResetCause::OutOfBounds);
        assert_eq!(
            event,
            BodyEvent::Reset {
                cause: ResetCause::OutOfBounds
            }
        );
        assert_eq!(body.pos, body.spawn);
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.resets, 1);
        assert!(body.is_resting());
    }

    #[test]
    fn test_push_wakes_body() {
        let mut body = Body::new(1, Vec2::new(50.0, 50.0), 4.0, Tuning::tag());
        body.push(Vec2::ZERO);
        assert!(body.is_resting());
        body.push(Vec2::new(0.0, 0.1));
        assert_eq!(body.state, BodyState::Moving);
    }

    #[test]
    fn test_playfield_edges_inclusive() {
        let field = Playfield::default();
        assert!(field.contains(Vec2::new(0.0, 256.0)));
        assert!(!field.contains(Vec2::new(-0.01, 10.0)));
        assert!(!field.contains(Vec2::new(10.0, 256.5)));
    }
}
