//! Per-frame body step
//!
//! One call advances one moving body by one frame against the mask:
//! damping, per-axis wall bounces, terrain effects, rest and bounds checks.
//! Position and velocity are computed on locals and written back at the end.

use glam::Vec2;

use super::state::{Axis, Body, BodyEvent, BodyState, Playfield, ResetCause};
use super::terrain::{TerrainCode, TerrainMask};
use crate::settings::RestPolicy;

/// Advance `body` by one frame. Idle bodies are left untouched.
pub fn step<M: TerrainMask + ?Sized>(body: &mut Body, mask: &M, field: &Playfield) -> Vec<BodyEvent> {
    let mut events = Vec::new();
    if body.state != BodyState::Moving {
        return events;
    }

    let tuning = &body.tuning;
    let ring = body.ring();
    let start = body.pos;
    let mut pos = body.pos;
    let mut vel = body.vel * tuning.damping;

    // --- PER-AXIS WALL RESOLUTION ---
    // X first, then Y from the committed X
    let candidate_x = Vec2::new(pos.x + vel.x, pos.y);
    if !ring.would_collide(mask, candidate_x) {
        pos.x = candidate_x.x;
    } else {
        vel.x *= -tuning.bounce_factor;
        pos.x += nudge_off_wall(vel.x, tuning.wall_nudge);
        events.push(BodyEvent::WallBounce { axis: Axis::X });
    }

    let candidate_y = Vec2::new(pos.x, pos.y + vel.y);
    if !ring.would_collide(mask, candidate_y) {
        pos.y = candidate_y.y;
    } else {
        vel.y *= -tuning.bounce_factor;
        pos.y += nudge_off_wall(vel.y, tuning.wall_nudge);
        events.push(BodyEvent::WallBounce { axis: Axis::Y });
    }

    // --- REST CHECK ---
    // `Stopped` is only reported if the step commits; resets and hazards end the stroke instead
    let mut state = BodyState::Moving;
    let eps = tuning.stop_epsilon;
    match tuning.rest_policy {
        RestPolicy::Stop => {
            if vel.x.abs() < eps && vel.y.abs() < eps {
                vel = Vec2::ZERO;
                state = BodyState::Idle;
            }
        }
        RestPolicy::SnapAxes => {
            if vel.x.abs() < eps {
                vel.x = 0.0;
            }
            if vel.y.abs() < eps {
                vel.y = 0.0;
            }
        }
    }

    // --- TERRAIN UNDER THE RING ---
    // A wall, goal or hazard sample ends the scan; rough and boost apply once.
    let mut terminal = None;
    let mut decelerate = false;
    let mut boost = false;
    for (_, code) in ring.samples(mask, pos) {
        match code {
            TerrainCode::Wall | TerrainCode::Goal | TerrainCode::Hazard => {
                terminal = Some(code);
                break;
            }
            TerrainCode::Decelerant => decelerate = true,
            TerrainCode::Booster => boost = true,
            TerrainCode::Open => {}
        }
    }

    match terminal {
        Some(TerrainCode::Goal) => {
            events.push(body.reset(ResetCause::Goal));
            return events;
        }
        Some(TerrainCode::Hazard) => {
            log::debug!("Body {} hit a hazard at ({:.1}, {:.1})", body.id, pos.x, pos.y);
            body.pos = start;
            body.stop();
            events.push(BodyEvent::Hazard);
            return events;
        }
        _ => {}
    }
    if decelerate {
        vel *= tuning.decelerant_factor;
        events.push(BodyEvent::Decelerated);
    }
    if boost {
        vel *= tuning.booster_factor;
        events.push(BodyEvent::Boosted);
    }

    // --- BOUNDS ---
    if !field.contains(pos) {
        events.push(body.reset(ResetCause::OutOfBounds));
        return events;
    }

    if state == BodyState::Idle {
        events.push(BodyEvent::Stopped);
    }
    body.pos = pos;
    body.vel = vel;
    body.state = state;
    events
}

/// Push off a wall after a bounce, in the direction of the new velocity
#[inline]
fn nudge_off_wall(bounced_vel: f32, nudge: f32) -> f32 {
    if nudge == 0.0 {
        0.0
    } else if bounced_vel > 0.0 {
        nudge
    } else {
        -nudge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading;
    use crate::settings::Tuning;
    use crate::sim::terrain::PixelMask;

    fn golf_ball() -> Body {
        Body::new(1, Vec2::new(20.0, 228.0), 4.0, Tuning::golf())
    }

    #[test]
    fn test_shot_up_open_field() {
        let mask = PixelMask::new(256, 256);
        let mut body = golf_ball();
        body.apply_impulse(heading(270.0) * 3.0);

        let events = step(&mut body, &mask, &Playfield::default());
        assert!(events.is_empty());
        assert!((body.vel.y - (-2.955)).abs() < 1e-4);
        assert!(body.vel.x.abs() < 1e-4);
        assert!((body.pos.y - 225.045).abs() < 1e-4);
        assert!((body.pos.x - 20.0).abs() < 1e-4);
        assert_eq!(body.state, BodyState::Moving);
    }

    #[test]
    fn test_idle_body_untouched() {
        let mask = PixelMask::new(256, 256);
        let mut body = golf_ball();
        assert!(step(&mut body, &mask, &Playfield::default()).is_empty());
        assert_eq!(body.pos, Vec2::new(20.0, 228.0));
    }

    #[test]
    fn test_wall_bounce_on_x() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_rect(30, 0, 10, 256, TerrainCode::Wall);
        let mut body = Body::new(1, Vec2::new(24.0, 100.0), 4.0, Tuning::golf());
        body.apply_impulse(Vec2::new(3.0, 0.0));

        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(events, vec![BodyEvent::WallBounce { axis: Axis::X }]);
        // 3 * 0.985 * -0.6
        assert!((body.vel.x - (-1.773)).abs() < 1e-4);
        // Pushed one pixel back off the wall
        assert!((body.pos.x - 23.0).abs() < 1e-4);
    }

    #[test]
    fn test_comes_to_rest() {
        let mask = PixelMask::new(256, 256);
        let mut body = golf_ball();
        body.apply_impulse(Vec2::new(0.05, -0.05));

        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(events, vec![BodyEvent::Stopped]);
        assert!(body.is_resting());
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_rest_needs_both_axes() {
        let mask = PixelMask::new(256, 256);
        let mut body = golf_ball();
        body.apply_impulse(Vec2::new(0.05, -2.0));
        let events = step(&mut body, &mask, &Playfield::default());
        assert!(events.is_empty());
        assert_eq!(body.state, BodyState::Moving);
    }

    #[test]
    fn test_snap_axes_keeps_moving() {
        let mask = PixelMask::new(256, 256);
        let mut body = Body::new(1, Vec2::new(100.0, 100.0), 4.0, Tuning::tag());
        body.apply_impulse(Vec2::new(0.05, 1.0));
        step(&mut body, &mask, &Playfield::default());
        assert_eq!(body.vel.x, 0.0);
        assert!(body.vel.y > 0.9);
        assert_eq!(body.state, BodyState::Moving);
    }

    #[test]
    fn test_goal_resets_once() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_circle(20, 215, 3, TerrainCode::Goal);
        let mut body = golf_ball();
        body.apply_impulse(Vec2::new(0.0, -10.0));

        let events = step(&mut body, &mask, &Playfield::default());
        let resets = events
            .iter()
            .filter(|e| matches!(e, BodyEvent::Reset { cause: ResetCause::Goal }))
            .count();
        assert_eq!(resets, 1);
        assert_eq!(body.resets, 1);
        assert_eq!(body.pos, body.spawn);
        assert!(body.is_resting());
    }

    #[test]
    fn test_hazard_reverts_to_start() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_rect(0, 210, 256, 10, TerrainCode::Hazard);
        let mut body = golf_ball();
        body.apply_impulse(Vec2::new(1.0, -6.0));

        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(events, vec![BodyEvent::Hazard]);
        assert_eq!(body.pos, Vec2::new(20.0, 228.0));
        assert!(body.is_resting());
        assert_eq!(body.resets, 0);
    }

    #[test]
    fn test_decelerant_applies_once_per_step() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_rect(0, 0, 256, 256, TerrainCode::Decelerant);
        let mut body = golf_ball();
        body.apply_impulse(Vec2::new(2.0, 0.0));

        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(events, vec![BodyEvent::Decelerated]);
        assert!((body.vel.x - 2.0 * 0.985 * 0.99).abs() < 1e-5);
    }

    #[test]
    fn test_booster_speeds_up() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_rect(0, 0, 256, 256, TerrainCode::Booster);
        let mut body = golf_ball();
        body.apply_impulse(Vec2::new(2.0, 0.0));
        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(events, vec![BodyEvent::Boosted]);
        assert!(body.vel.x > 2.0 * 0.985);
    }

    #[test]
    fn test_slow_ball_on_hazard_reports_hazard_only() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_rect(0, 231, 256, 3, TerrainCode::Hazard);
        let mut body = Body::new(1, Vec2::new(20.0, 227.0), 4.0, Tuning::golf());
        body.apply_impulse(Vec2::new(0.05, 0.05));

        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(events, vec![BodyEvent::Hazard]);
        assert_eq!(body.pos, Vec2::new(20.0, 227.0));
        assert!(body.is_resting());
    }

    #[test]
    fn test_slow_ball_into_goal_reports_reset_only() {
        let mut mask = PixelMask::new(256, 256);
        mask.fill_rect(0, 231, 256, 3, TerrainCode::Goal);
        let mut body = Body::new(1, Vec2::new(20.0, 227.0), 4.0, Tuning::golf());
        body.apply_impulse(Vec2::new(0.05, 0.05));

        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(
            events,
            vec![BodyEvent::Reset {
                cause: ResetCause::Goal
            }]
        );
        assert_eq!(body.resets, 1);
    }

    #[test]
    fn test_out_of_bounds_resets() {
        let mask = PixelMask::new(256, 256);
        let mut body = Body::new(1, Vec2::new(20.0, 228.0), 4.0, Tuning::bounce());
        body.pos = Vec2::new(254.0, 100.0);
        body.apply_impulse(Vec2::new(5.0, 0.0));

        let events = step(&mut body, &mask, &Playfield::default());
        assert_eq!(
            events,
            vec![BodyEvent::Reset {
                cause: ResetCause::OutOfBounds
            }]
        );
        assert_eq!(body.pos, body.spawn);
        assert_eq!(body.resets, 1);
    }

    #[test]
    fn test_never_left_outside_playfield() {
        // Open everywhere: a fast ball leaves and must be reset the same step
        let mask = PixelMask::new(256, 256);
        let field = Playfield::default();
        for angle in (0..360).step_by(15) {
            let mut body = golf_ball();
            body.apply_impulse(heading(angle as f32) * 40.0);
            for _ in 0..30 {
                step(&mut body, &mask, &field);
                assert!(field.contains(body.pos));
            }
        }
    }
}
