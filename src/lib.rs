//! Algae Race - oxygen survival simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fish, rows, session progression)
//! - `tuning`: Data-driven game balance
//!
//! Rendering and input devices live outside this crate. A renderer polls
//! [`sim::Session::snapshot`] (or drains [`sim::Session::drain_events`]) and
//! feeds back `move_left` / `move_right` commands.

pub mod sim;
pub mod tuning;

pub use sim::{Direction, Session, SessionPhase, SessionSnapshot, TickInput};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, rows scroll slowly)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for (seconds)
    pub const MAX_FRAME_DT: f64 = 0.25;
    /// Longest step a single tick will simulate (seconds)
    pub const MAX_TICK_DT: f64 = 60.0;

    /// Fish spawn values
    pub const FISH_START_OXYGEN: f64 = 1.0;
    pub const FISH_START_POSITION: f64 = 0.5;

    /// Oxygen values this close to zero count as empty
    pub const OXYGEN_EPSILON: f64 = 1e-9;
}

/// Clamp a fraction into [0, 1]
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
