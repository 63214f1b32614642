//! Rows of algae and oxygen bubbles
//!
//! A row is one horizontal scan-line of the play field split into equal
//! cells. Rows are generated far from the fish and scroll toward it; the
//! session keeps the visible ones in a fixed-capacity ring so that scrolling
//! never shifts or reallocates.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Contents of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowCell {
    #[default]
    Water,
    Algae,
    /// Oxygen bubble (at most one per row)
    Oxygen,
}

/// One generated row, closest-to-fish rows come first in the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<RowCell>,
}

impl Row {
    /// Row of `len` water cells
    pub fn empty(len: usize) -> Self {
        Self {
            cells: vec![RowCell::Water; len],
        }
    }

    pub fn from_cells(cells: Vec<RowCell>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[RowCell] {
        &self.cells
    }

    /// Cell at `slot`, water outside the row
    pub fn cell(&self, slot: usize) -> RowCell {
        self.cells.get(slot).copied().unwrap_or_default()
    }

    /// Index of the oxygen bubble, if the row has one
    pub fn oxygen_slot(&self) -> Option<usize> {
        self.cells.iter().position(|c| *c == RowCell::Oxygen)
    }

    pub fn count(&self, kind: RowCell) -> usize {
        self.cells.iter().filter(|c| **c == kind).count()
    }

    /// Take the contents of `slot`. A bubble is used up and leaves water
    /// behind; algae and water stay as they are.
    pub fn consume(&mut self, slot: usize) -> RowCell {
        match self.cells.get_mut(slot) {
            Some(cell @ RowCell::Oxygen) => {
                *cell = RowCell::Water;
                RowCell::Oxygen
            }
            Some(cell) => *cell,
            None => RowCell::Water,
        }
    }
}

/// Widest row the generator will build
pub const MAX_CELLS_PER_ROW: usize = 100;

/// Number of cells for a given cell width (fraction of screen width),
/// in `1..=MAX_CELLS_PER_ROW`
pub fn cell_count_for(cell_unit_size: f64) -> usize {
    if !cell_unit_size.is_finite() || cell_unit_size <= 0.0 {
        return 1;
    }
    ((1.0 / cell_unit_size).round() as usize).clamp(1, MAX_CELLS_PER_ROW)
}

/// Probabilistic row generator
///
/// Difficulty `d` controls both draws: a bubble appears when the first draw
/// is `>= d`, and every remaining cell turns to algae when its draw is
/// `<= d²`. At `d = 0` a row is all water plus one bubble; at `d = 1` it is
/// solid algae.
#[derive(Debug, Clone)]
pub struct RowGenerator<R = Pcg32> {
    cell_count: usize,
    rng: R,
}

impl<R: RandomSource> RowGenerator<R> {
    pub fn new(cell_unit_size: f64, rng: R) -> Self {
        Self {
            cell_count: cell_count_for(cell_unit_size),
            rng,
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Generate one row at the given difficulty
    pub fn generate(&mut self, difficulty: f64) -> Row {
        let difficulty = if difficulty.is_nan() {
            0.0
        } else {
            crate::clamp_unit(difficulty)
        };
        let mut row = Row::empty(self.cell_count);

        let oxygen_slot = if self.rng.next_unit() >= difficulty {
            let slot = self.rng.next_index(self.cell_count);
            row.cells[slot] = RowCell::Oxygen;
            Some(slot)
        } else {
            None
        };

        let algae_chance = difficulty * difficulty;
        for (i, cell) in row.cells.iter_mut().enumerate() {
            if Some(i) == oxygen_slot {
                continue;
            }
            let draw = self.rng.next_unit();
            if algae_chance > 0.0 && draw <= algae_chance {
                *cell = RowCell::Algae;
            }
        }

        row
    }
}

/// Fixed-capacity ring of rows, oldest first
///
/// Advancing overwrites the oldest slot in place and moves the head, so the
/// visible window scrolls in O(1).
#[derive(Debug, Clone)]
pub struct RowQueue {
    slots: Vec<Row>,
    head: usize,
}

impl RowQueue {
    /// Fill a queue of `capacity` rows (at least one) from `make`
    pub fn filled(capacity: usize, mut make: impl FnMut() -> Row) -> Self {
        let capacity = capacity.max(1);
        let slots = (0..capacity).map(|_| make()).collect();
        Self { slots, head: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Row closest to the fish
    pub fn front(&self) -> &Row {
        &self.slots[self.head]
    }

    pub fn front_mut(&mut self) -> &mut Row {
        &mut self.slots[self.head]
    }

    /// `i`-th row counting from the fish
    pub fn get(&self, i: usize) -> Option<&Row> {
        if i >= self.slots.len() {
            return None;
        }
        Some(&self.slots[(self.head + i) % self.slots.len()])
    }

    /// Evict the front row, append `row` at the back, return the evicted row
    pub fn advance(&mut self, row: Row) -> Row {
        let evicted = std::mem::replace(&mut self.slots[self.head], row);
        self.head = (self.head + 1) % self.slots.len();
        evicted
    }

    /// Rows from closest to farthest
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        let (back, front) = self.slots.split_at(self.head);
        front.iter().chain(back.iter())
    }
}
