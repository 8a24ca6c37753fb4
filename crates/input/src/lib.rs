//! Keyboard input state for the tick loop.
//!
//! # Invariants
//! - The held-key set is an explicit value owned by the tick-loop driver and
//!   read once per tick.
//! - Event callbacks only set/clear membership; no other state, no ordering.
//! - Window-backend key translation lives in the application, not here.

pub mod state;

pub use state::{FIRE_KEY, InputState};

pub fn crate_info() -> &'static str {
    "firerange-input v0.1.0"
}
