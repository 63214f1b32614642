//! Simulation tick
//!
//! Core game loop step. Order within a running tick:
//! 1. Passive oxygen decay
//! 2. Difficulty growth
//! 3. Row scroll and fish/row contact
//! 4. Evict passed rows, spawn new ones at the current difficulty
//!
//! The session ends as soon as any step leaves the fish without oxygen.

use super::rng::RandomSource;
use super::row::RowCell;
use super::state::{Direction, Session, SessionEvent};
use crate::consts::MAX_TICK_DT;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Sideways move applied before the tick advances
    pub movement: Option<Direction>,
}

impl TickInput {
    pub fn moving(direction: Direction) -> Self {
        Self {
            movement: Some(direction),
        }
    }
}

impl<R: RandomSource> Session<R> {
    /// Advance by `dt` seconds with no input
    pub fn tick(&mut self, dt: f64) {
        tick(self, &TickInput::default(), dt);
    }

    /// Apply `input`, then advance by `dt` seconds
    pub fn tick_with(&mut self, input: &TickInput, dt: f64) {
        tick(self, input, dt);
    }
}

/// Advance the session by one step of `dt` seconds
pub fn tick<R: RandomSource>(session: &mut Session<R>, input: &TickInput, dt: f64) {
    if !session.is_running() {
        log::trace!("Ignoring tick after session end");
        return;
    }

    if let Some(direction) = input.movement {
        session.move_in(direction);
        if session.check_death() {
            return;
        }
    }

    let dt = if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_TICK_DT)
    } else {
        0.0
    };
    session.time_ticks += 1;
    session.elapsed += dt;

    // Passive decay
    let decay = session.effective_decay();
    session.fish.update_oxygen(-decay, &mut session.events);
    if session.check_death() {
        return;
    }

    // Difficulty growth
    let before = session.difficulty;
    session.difficulty =
        (before + session.tuning.difficulty_growth_rate).min(session.tuning.difficulty_ceiling);
    if (session.difficulty * 10.0).floor() > (before * 10.0).floor() {
        log::debug!(
            "Difficulty reached {:.2} at {:.1}s",
            session.difficulty,
            session.elapsed
        );
    }

    // Row scroll: at most one full window of rows per tick
    let window = session.rows.len() as f64;
    session.scroll_distance += (session.tuning.row_scroll_speed * dt).min(window);
    if !session.scroll_distance.is_finite() {
        session.scroll_distance = 0.0;
    }
    let whole = session.scroll_distance.floor();
    session.scroll_distance -= whole;
    let arrivals = (whole as usize).min(session.rows.len());

    for _ in 0..arrivals {
        resolve_contact(session);
        spawn_row(session);
        if session.check_death() {
            return;
        }
    }
}

/// Apply the closest row's cell under the fish
fn resolve_contact<R: RandomSource>(session: &mut Session<R>) {
    let slot = session.fish.slot(session.rows.front().len());
    match session.rows.front_mut().consume(slot) {
        RowCell::Oxygen => {
            log::trace!("Bubble collected at slot {}", slot);
            session.events.push(SessionEvent::BubbleCollected { slot });
            let gain = session.tuning.oxygen_bubble_gain;
            session.fish.update_oxygen(gain, &mut session.events);
        }
        RowCell::Algae => {
            let penalty = session.algae_penalty();
            log::trace!("Algae contact at slot {} (-{:.3})", slot, penalty);
            session
                .events
                .push(SessionEvent::AlgaeContact { slot, penalty });
            session.fish.update_oxygen(-penalty, &mut session.events);
        }
        RowCell::Water => {}
    }
}

/// Drop the passed row and append a fresh one at the far end
fn spawn_row<R: RandomSource>(session: &mut Session<R>) {
    let row = session.generator.generate(session.difficulty);
    session.rows.advance(row);
    session.rows_passed += 1;
    session.events.push(SessionEvent::RowSpawned);
}
