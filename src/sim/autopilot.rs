//! Idle/demo mode steering
//!
//! Chases the nearest bubble that is worth the swim. Otherwise it only dodges
//! algae in the row about to arrive, and only when dodging is cheaper than
//! the contact, since every move costs oxygen.

use super::rng::RandomSource;
use super::row::RowCell;
use super::state::{Direction, Session};

/// Pick a move for the current state, or `None` to hold still
pub fn choose_move<R: RandomSource>(session: &Session<R>) -> Option<Direction> {
    if !session.is_running() {
        return None;
    }

    let tuning = session.tuning();
    let cells = session.cell_count();
    let slot = session.fish().slot(cells);

    // Go get the closest bubble if the trip pays for itself
    if let Some(target) = session.rows().find_map(|row| row.oxygen_slot()) {
        let cost = swim_cost(session, slot, target)?;
        if cost < tuning.oxygen_bubble_gain {
            return step_toward(slot, target);
        }
    }

    // Otherwise dodge whatever is about to arrive
    let front = session.rows().next()?;
    if front.cell(slot) != RowCell::Algae {
        return None;
    }
    let clear = (0..cells)
        .filter(|&i| front.cell(i) != RowCell::Algae)
        .min_by_key(|&i| i.abs_diff(slot))?;
    if swim_cost(session, slot, clear)? < session.algae_penalty() {
        step_toward(slot, clear)
    } else {
        None
    }
}

/// Oxygen spent moving between two slots, `None` if the fish cannot move
fn swim_cost<R: RandomSource>(session: &Session<R>, from: usize, to: usize) -> Option<f64> {
    let tuning = session.tuning();
    if tuning.movement_step <= 0.0 {
        return None;
    }
    let distance = from.abs_diff(to) as f64 / session.cell_count() as f64;
    let steps = (distance / tuning.movement_step - 1e-9).ceil().max(0.0);
    Some(steps * tuning.movement_cost)
}

fn step_toward(from: usize, to: usize) -> Option<Direction> {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => Some(Direction::Left),
        std::cmp::Ordering::Greater => Some(Direction::Right),
        std::cmp::Ordering::Equal => None,
    }
}
