//! Physics tuning
//!
//! Every numeric policy the simulation applies lives in [`Tuning`], so each
//! minigame is a preset rather than its own copy of the physics. Tuning can
//! be loaded from JSON; absent fields keep the preset's values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SAMPLE_COUNT;
use crate::error::Result;

/// What happens when a moving body's speed decays below `stop_epsilon`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestPolicy {
    /// Both axes below epsilon: zero velocity and go idle (golf)
    #[default]
    Stop,
    /// Zero each slow axis on its own and stay active (tag)
    SnapAxes,
}

/// Physics parameters for one body type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Angular samples swept around the probe ring
    pub sample_count: u32,
    /// Per-step velocity multiplier (friction)
    pub damping: f32,
    /// Speed kept when an axis bounces off a wall
    pub bounce_factor: f32,
    /// Per-axis speed below which the body counts as still
    pub stop_epsilon: f32,
    pub rest_policy: RestPolicy,
    /// Pixels pushed off a wall after an axis bounce
    pub wall_nudge: f32,

    // === Terrain effects ===
    /// Velocity multiplier while over decelerant terrain
    pub decelerant_factor: f32,
    /// Velocity multiplier while over booster terrain
    pub booster_factor: f32,

    // === Resting nudge ===
    /// Pixels moved per escape attempt
    pub nudge_step: f32,
    /// Maximum escape attempts per call
    pub nudge_attempts: u32,

    // === Ball-vs-ball ===
    /// Fraction of the exchanged impulse kept on contact
    pub contact_bounce: f32,
    /// Fraction of velocity stepped back when a contact shoved a body into a wall
    pub settle_backstep: f32,
    /// Velocity multiplier (reversed) after that step back
    pub settle_bounce: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::golf()
    }
}

impl Tuning {
    /// Golf ball: soft bounces, pushed clear of walls, stops dead
    pub fn golf() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            damping: 0.985,
            bounce_factor: 0.6,
            stop_epsilon: 0.1,
            rest_policy: RestPolicy::Stop,
            wall_nudge: 1.0,
            decelerant_factor: 0.99,
            booster_factor: 1.05,
            nudge_step: 2.0,
            nudge_attempts: 10,
            contact_bounce: 0.8,
            settle_backstep: 0.1,
            settle_bounce: 0.5,
        }
    }

    /// Tag balls: bouncier, never fully idle
    pub fn tag() -> Self {
        Self {
            bounce_factor: 0.8,
            wall_nudge: 0.0,
            rest_policy: RestPolicy::SnapAxes,
            ..Self::golf()
        }
    }

    /// Generic bouncing-ball demo
    pub fn bounce() -> Self {
        Self {
            bounce_factor: 0.8,
            wall_nudge: 0.0,
            ..Self::golf()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "golf" => Some(Self::golf()),
            "tag" => Some(Self::tag()),
            "bounce" | "demo" => Some(Self::bounce()),
            _ => None,
        }
    }

    /// Parse tuning from JSON, filling gaps from the golf preset
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        if !(self.bounce_factor > 0.0 && self.bounce_factor <= 1.0) {
            log::warn!("bounce_factor {} out of (0, 1], clamping", self.bounce_factor);
            self.bounce_factor = self.bounce_factor.clamp(f32::EPSILON, 1.0);
        }
        if self.sample_count == 0 {
            self.sample_count = 1;
        }
        self.stop_epsilon = self.stop_epsilon.max(0.0);
        self
    }
}
