//! Minigame rules built on the simulation core
//!
//! Each game owns its bodies and scoring, and takes the frame's mask and
//! input as arguments; rendering stays with the host.

pub mod golf;
pub mod tag;

pub use golf::{Banner, GolfGame, GolfInput};
pub use tag::{PlayerInput, TagEvent, TagMatch};
