//! Input-driven movement for the controlled weapon.
//!
//! # Invariants
//! - One `update` call is one tick; dt is an implicit fixed step, so the step
//!   constants are per tick, not per second.
//! - The blaster's transform is mutated only here (bullets are written once
//!   at spawn).
//! - A missing target entity makes a tick a no-op, never an error.

pub mod controller;

pub use controller::{BULLET_LIFT, MOVE_STEP, MotionController, TURN_STEP, bullet_transform};

pub fn crate_info() -> &'static str {
    "firerange-control v0.1.0"
}
