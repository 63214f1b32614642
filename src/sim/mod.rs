//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected, seedable random source only
//! - Rows generated in a fixed draw order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod fish;
pub mod rng;
pub mod row;
pub mod state;
pub mod tick;

pub use autopilot::choose_move;
pub use clock::FixedStep;
pub use fish::{Fish, FishObserver, FishSnapshot};
pub use rng::{RandomSource, RngState, seeded_rng};
pub use row::{MAX_CELLS_PER_ROW, Row, RowCell, RowGenerator, RowQueue};
pub use state::{
    Direction, EventQueue, MAX_PENDING_EVENTS, Session, SessionEvent, SessionPhase, SessionSnapshot,
};
pub use tick::{TickInput, tick};
