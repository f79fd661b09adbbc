//! Collision response: reflections, wall escape, ball-vs-ball contact
//!
//! Two response paths exist side by side. Continuous wall sliding is handled
//! per axis inside `tick::step`. Discrete impacts (a resting ball stuck in a
//! wall, two balls meeting, a ball shoved into a wall by another) use the
//! estimated surface normal and the reflection helpers here.

use glam::Vec2;

use super::state::{Body, BodyState};
use super::surface::{FALLBACK_NORMAL, estimate_surface};
use super::terrain::TerrainMask;
use crate::heading;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect and scale by the bounce factor (1.0 = elastic)
///
/// Non-finite results collapse to zero so a bad input can't poison the body.
pub fn reflect_with_bounce(velocity: Vec2, normal: Vec2, bounce_factor: f32) -> Vec2 {
    let reflected = reflect_velocity(velocity, normal) * bounce_factor;
    if reflected.is_finite() {
        reflected
    } else {
        Vec2::ZERO
    }
}

/// Which way a stuck, resting ball is pushed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NudgeDirection {
    /// Opposite the aim arrow, in degrees (golf: back along the shot line)
    AwayFromAim(f32),
    /// Along the wall normal estimated at each attempt
    SurfaceNormal,
}

/// Result of a resting nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeOutcome {
    /// Nothing to do (moving, or not touching a wall)
    Clear,
    /// Pushed free after this many steps
    Escaped { attempts: u32 },
    /// Still touching a wall after the attempt bound; left where it is
    Stuck { attempts: u32 },
}

/// Push a resting ball out of a wall in small, bounded steps
pub fn resting_nudge<M: TerrainMask + ?Sized>(
    body: &mut Body,
    mask: &M,
    direction: NudgeDirection,
) -> NudgeOutcome {
    if !body.is_resting() || !body.would_collide(mask, body.pos) {
        return NudgeOutcome::Clear;
    }

    let step = body.tuning.nudge_step;
    let max_attempts = body.tuning.nudge_attempts;
    let mut attempts = 0;

    while attempts < max_attempts {
        if !body.would_collide(mask, body.pos) {
            break;
        }
        let dir = match direction {
            NudgeDirection::AwayFromAim(degrees) => heading(degrees + 180.0),
            NudgeDirection::SurfaceNormal => estimate_surface(body.ring(), mask, body.pos).normal,
        };
        body.pos += dir * step;
        attempts += 1;
    }

    if body.would_collide(mask, body.pos) {
        log::warn!(
            "Body {} still in a wall after {} nudges at ({:.1}, {:.1})",
            body.id,
            attempts,
            body.pos.x,
            body.pos.y
        );
        NudgeOutcome::Stuck { attempts }
    } else {
        log::debug!("Body {} nudged clear in {} steps", body.id, attempts);
        NudgeOutcome::Escaped { attempts }
    }
}

/// Resolve overlap between two balls (equal mass)
///
/// Each ball is pushed half the overlap apart along the line between the
/// centers, unless that push would put it into a wall. Velocity is then
/// exchanged along the same line, scaled by `contact_bounce`. Coincident
/// centers separate along the fallback normal. Returns true on contact.
pub fn resolve_ball_contact<M: TerrainMask + ?Sized>(
    a: &mut Body,
    b: &mut Body,
    mask: &M,
    contact_bounce: f32,
) -> bool {
    let delta = a.pos - b.pos;
    let distance = delta.length();
    let min_distance = a.radius() + b.radius();

    if distance >= min_distance {
        return false;
    }

    let normal = if distance > 0.0 {
        delta / distance
    } else {
        FALLBACK_NORMAL
    };
    let separation = (min_distance - distance) / 2.0;

    let new_a = a.pos + normal * separation;
    let new_b = b.pos - normal * separation;
    if !a.would_collide(mask, new_a) {
        a.pos = new_a;
    }
    if !b.would_collide(mask, new_b) {
        b.pos = new_b;
    }

    // Equal masses: impulse = 2 * (dv·n) / 2
    let impulse = (a.vel - b.vel).dot(normal);
    let exchange = normal * impulse * contact_bounce;
    a.vel -= exchange;
    b.vel += exchange;

    for body in [&mut *a, &mut *b] {
        if body.vel != Vec2::ZERO {
            body.state = BodyState::Moving;
        }
    }

    log::debug!(
        "Contact between {} and {}: overlap {:.2}, impulse {:.3}",
        a.id,
        b.id,
        min_distance - distance,
        impulse
    );
    true
}

/// Wall re-check after a contact shoved a ball around
///
/// If the ball now overlaps a wall it steps back a fraction of its velocity
/// and reflects off the estimated surface, losing `settle_bounce` of its
/// speed. Returns true if it had to settle.
pub fn settle_after_contact<M: TerrainMask + ?Sized>(body: &mut Body, mask: &M) -> bool {
    if !body.would_collide(mask, body.pos) {
        return false;
    }
    body.pos -= body.vel * body.tuning.settle_backstep;
    let contact = estimate_surface(body.ring(), mask, body.pos);
    body.vel = reflect_with_bounce(body.vel, contact.normal, body.tuning.settle_bounce);
    true
}
