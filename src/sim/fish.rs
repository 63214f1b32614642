//! The player fish
//!
//! Every oxygen change, whatever its cause, goes through
//! [`Fish::update_oxygen`], so the [0, 1] clamp cannot be bypassed.

use serde::{Deserialize, Serialize};

use crate::consts::{FISH_START_OXYGEN, FISH_START_POSITION, OXYGEN_EPSILON};
use crate::clamp_unit;

/// Receives fish change notifications
pub trait FishObserver {
    fn oxygen_changed(&mut self, oxygen: f64);
    fn moved(&mut self, position: f64);
}

/// Ignores all notifications
impl FishObserver for () {
    fn oxygen_changed(&mut self, _oxygen: f64) {}
    fn moved(&mut self, _position: f64) {}
}

/// Read-only copy of the fish handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishSnapshot {
    pub oxygen_supply: f64,
    pub horizontal_position: f64,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    /// Fraction of maximum oxygen, in [0, 1]
    oxygen_supply: f64,
    /// Fraction of screen width, in [0, 1]
    horizontal_position: f64,
    /// Oxygen paid per move
    movement_cost: f64,
}

impl Fish {
    pub fn new(movement_cost: f64) -> Self {
        Self::with_state(FISH_START_OXYGEN, FISH_START_POSITION, movement_cost)
    }

    pub fn with_state(oxygen_supply: f64, horizontal_position: f64, movement_cost: f64) -> Self {
        Self {
            oxygen_supply: snap_oxygen(oxygen_supply),
            horizontal_position: clamp_unit(horizontal_position),
            movement_cost: movement_cost.max(0.0),
        }
    }

    #[inline]
    pub fn oxygen_supply(&self) -> f64 {
        self.oxygen_supply
    }

    #[inline]
    pub fn horizontal_position(&self) -> f64 {
        self.horizontal_position
    }

    #[inline]
    pub fn movement_cost(&self) -> f64 {
        self.movement_cost
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.oxygen_supply > 0.0
    }

    /// Cell index under the fish for a row of `cell_count` cells
    pub fn slot(&self, cell_count: usize) -> usize {
        let slot = (self.horizontal_position * cell_count as f64) as usize;
        slot.min(cell_count.saturating_sub(1))
    }

    /// Shift sideways by `delta` (negative is left) and pay the movement cost
    pub fn move_by(&mut self, delta: f64, observer: &mut impl FishObserver) {
        if !self.is_alive() || !delta.is_finite() {
            return;
        }
        self.horizontal_position = clamp_unit(self.horizontal_position + delta);
        observer.moved(self.horizontal_position);
        self.update_oxygen(-self.movement_cost, observer);
    }

    /// Add `delta` to the oxygen supply, saturating at 0 and 1. A zero delta
    /// is not a change and is not reported.
    pub fn update_oxygen(&mut self, delta: f64, observer: &mut impl FishObserver) {
        // Dead fish stay dead
        if !self.is_alive() || !delta.is_finite() || delta == 0.0 {
            return;
        }
        self.oxygen_supply = snap_oxygen(self.oxygen_supply + delta);
        observer.oxygen_changed(self.oxygen_supply);
    }

    pub fn snapshot(&self) -> FishSnapshot {
        FishSnapshot {
            oxygen_supply: self.oxygen_supply,
            horizontal_position: self.horizontal_position,
            alive: self.is_alive(),
        }
    }
}

fn snap_oxygen(value: f64) -> f64 {
    if value.is_nan() || value < OXYGEN_EPSILON {
        0.0
    } else {
        clamp_unit(value)
    }
}
