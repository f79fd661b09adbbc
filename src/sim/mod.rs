//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One `step` per frame, no wall-clock time
//! - The mask is read-only for the duration of a step
//! - Multiple bodies are stepped in a stable order
//! - No rendering or platform dependencies

pub mod collision;
pub mod probe;
pub mod state;
pub mod surface;
pub mod terrain;
pub mod tick;

pub use collision::{
    NudgeDirection, NudgeOutcome, reflect_velocity, reflect_with_bounce, resolve_ball_contact,
    resting_nudge, settle_after_contact,
};
pub use probe::ProbeRing;
pub use state::{Axis, Body, BodyEvent, BodyState, Playfield, ResetCause};
pub use surface::{FALLBACK_NORMAL, SurfaceContact, estimate_normal, estimate_surface};
pub use terrain::{Palette, PixelMask, TerrainCode, TerrainMask};
pub use tick::step;
