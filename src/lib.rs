//! Pixel Putt - pixel-mask ball physics for retro minigames
//!
//! Core modules:
//! - `sim`: Deterministic simulation (probe ring, surface normals, bounces, bodies)
//! - `games`: Golf and tag rules layered on top of `sim`
//! - `settings`: Data-driven physics tuning
//! - `logging`: Logger setup for the native binary

pub mod error;
pub mod games;
pub mod logging;
pub mod settings;
pub mod sim;

pub use error::PixelPuttError;
pub use settings::{RestPolicy, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield size in pixels (square screen)
    pub const SCREEN_SIZE: f32 = 256.0;

    /// Ball footprint radius (8x8 sprite)
    pub const BALL_RADIUS: f32 = 4.0;

    /// Probe samples per ring (one per integer degree)
    pub const DEFAULT_SAMPLE_COUNT: u32 = 360;

    /// Frames per second of the host loop
    pub const FRAME_RATE: u32 = 60;
}

/// Unit direction for an angle given in degrees (screen space, y down)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    polar_to_cartesian(1.0, degrees.to_radians())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap an aim angle in degrees the way the golf HUD does: past 360 → 0, below 0 → 360
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    if degrees > 360.0 {
        0.0
    } else if degrees < 0.0 {
        360.0
    } else {
        degrees
    }
}
