//! Input mapping between a windowing backend and the camera rig.
//!
//! # Invariants
//! - Movement keys are level-triggered: polled each frame while held.
//! - Actions are edge-triggered: produced once per press, never on release.
//! - Nothing here depends on a windowing crate; backends translate into [`Key`].

pub mod action;
pub mod state;

pub use action::{Action, Key};
pub use state::InputState;
