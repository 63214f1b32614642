//! Session state and core simulation types
//!
//! A session owns the fish, the visible rows, and the random source. Nothing
//! outside it holds references into its state; the renderer reads snapshots
//! and drains events.

use std::collections::VecDeque;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fish::{Fish, FishObserver, FishSnapshot};
use super::rng::{RandomSource, RngState, seeded_rng};
use super::row::{Row, RowCell, RowGenerator, RowQueue};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Fish is alive, ticks advance the simulation
    Running,
    /// Fish ran out of oxygen (terminal)
    Ended,
}

/// Sideways input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Discrete change notifications, drained by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    OxygenChanged(f64),
    Moved(f64),
    /// Fish swam through a bubble
    BubbleCollected { slot: usize },
    /// Fish brushed algae and lost oxygen to it
    AlgaeContact { slot: usize, penalty: f64 },
    /// A new row entered at the far end
    RowSpawned,
    Ended { survival_time: f64 },
}

/// Most events kept between drains; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Bounded queue of undrained events
///
/// A renderer that only polls snapshots never drains, so the queue keeps the
/// newest `MAX_PENDING_EVENTS` and discards the rest.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<SessionEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: SessionEvent) {
        if self.pending.len() >= MAX_PENDING_EVENTS {
            self.pending.pop_front();
        }
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Oldest first
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.pending.drain(..).collect()
    }
}

impl FishObserver for EventQueue {
    fn oxygen_changed(&mut self, oxygen: f64) {
        self.push(SessionEvent::OxygenChanged(oxygen));
    }

    fn moved(&mut self, position: f64) {
        self.push(SessionEvent::Moved(position));
    }
}

/// Read-only view of the session for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub fish: FishSnapshot,
    /// Cell contents only, closest row first
    pub rows: Vec<Vec<RowCell>>,
    pub difficulty: f64,
    pub phase: SessionPhase,
    pub survival_time: f64,
    pub ambient_light: f64,
    pub scroll_progress: f64,
}

/// One play-through from spawn to death
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    /// Sanitized balance values
    pub(crate) tuning: Tuning,
    /// Seed, when the source came from one
    pub(crate) rng_state: Option<RngState>,
    pub(crate) phase: SessionPhase,
    pub(crate) fish: Fish,
    pub(crate) rows: RowQueue,
    pub(crate) generator: RowGenerator<R>,
    /// Probability in [0, ceiling], never decreases
    pub(crate) difficulty: f64,
    /// Seconds survived
    pub(crate) elapsed: f64,
    pub(crate) time_ticks: u64,
    /// Rows scrolled since the last row reached the fish, in [0, 1)
    pub(crate) scroll_distance: f64,
    /// Rows that reached the fish
    pub(crate) rows_passed: u64,
    pub(crate) events: EventQueue,
}

impl Session<Pcg32> {
    /// Create a session driven by a seeded PCG32
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut session = Self::with_source(tuning, seeded_rng(seed));
        session.rng_state = Some(RngState::new(seed));
        log::info!("Session started with seed {}", seed);
        session
    }
}

impl<R: RandomSource> Session<R> {
    /// Create a session with an injected random source
    pub fn with_source(tuning: Tuning, source: R) -> Self {
        let tuning = tuning.sanitized();
        let difficulty = tuning.initial_difficulty.min(tuning.difficulty_ceiling);
        let mut generator = RowGenerator::new(tuning.cell_unit_size, source);
        let rows = RowQueue::filled(tuning.visible_row_count + 1, || {
            generator.generate(difficulty)
        });

        Self {
            fish: Fish::new(tuning.movement_cost),
            tuning,
            rng_state: None,
            phase: SessionPhase::Running,
            rows,
            generator,
            difficulty,
            elapsed: 0.0,
            time_ticks: 0,
            scroll_distance: 0.0,
            rows_passed: 0,
            events: EventQueue::default(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn rng_state(&self) -> Option<RngState> {
        self.rng_state
    }

    pub fn fish(&self) -> &Fish {
        &self.fish
    }

    /// Visible rows, closest to the fish first
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.generator.cell_count()
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Seconds survived so far (frozen once the session ends)
    pub fn survival_time(&self) -> f64 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.time_ticks
    }

    pub fn rows_passed(&self) -> u64 {
        self.rows_passed
    }

    /// How far the closest row has travelled toward the fish, in [0, 1)
    pub fn scroll_progress(&self) -> f64 {
        self.scroll_distance
    }

    /// Scene brightness: full light at difficulty 0, dimming to the
    /// configured minimum at the ceiling
    pub fn ambient_light(&self) -> f64 {
        let min_light = self.tuning.min_ambient_light;
        let pressure = if self.tuning.difficulty_ceiling > 0.0 {
            (self.difficulty / self.tuning.difficulty_ceiling).min(1.0)
        } else {
            1.0
        };
        1.0 - (1.0 - min_light) * pressure
    }

    /// Oxygen lost per tick to passive decay at the current difficulty
    pub fn effective_decay(&self) -> f64 {
        let t = &self.tuning;
        let headroom = if t.difficulty_ceiling > 0.0 {
            1.0 - self.difficulty / t.difficulty_ceiling
        } else {
            0.0
        };
        t.passive_decay_rate * headroom.max(t.passive_decay_floor)
    }

    /// Oxygen lost per algae contact at the current difficulty
    pub fn algae_penalty(&self) -> f64 {
        self.tuning.algae_competition_cost * (1.0 + self.difficulty)
    }

    pub fn move_left(&mut self) {
        self.move_in(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.move_in(Direction::Right);
    }

    /// Move one step; ignored once the session has ended
    pub fn move_in(&mut self, direction: Direction) {
        if !self.is_running() {
            log::trace!("Ignoring {:?} move after session end", direction);
            return;
        }
        let step = self.tuning.movement_step * direction.sign();
        self.fish.move_by(step, &mut self.events);
        self.check_death();
    }

    /// Take all events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    /// Events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            fish: self.fish.snapshot(),
            rows: self.rows.iter().map(|r| r.cells().to_vec()).collect(),
            difficulty: self.difficulty,
            phase: self.phase,
            survival_time: self.elapsed,
            ambient_light: self.ambient_light(),
            scroll_progress: self.scroll_distance,
        }
    }

    /// Move to `Ended` if the fish has died. Returns true when ended.
    pub(crate) fn check_death(&mut self) -> bool {
        if self.phase == SessionPhase::Ended {
            return true;
        }
        if self.fish.is_alive() {
            return false;
        }
        self.phase = SessionPhase::Ended;
        self.events.push(SessionEvent::Ended {
            survival_time: self.elapsed,
        });
        log::info!(
            "Session ended after {:.2}s ({} ticks, {} rows, difficulty {:.3})",
            self.elapsed,
            self.time_ticks,
            self.rows_passed,
            self.difficulty
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::testing::ConstantSource;

    #[test]
    fn test_new_session_defaults() {
        let tuning = Tuning::default();
        let session = Session::new(tuning.clone(), 12345);
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.row_count(), tuning.visible_row_count + 1);
        assert_eq!(session.cell_count(), 20);
        assert_eq!(session.fish().oxygen_supply(), 1.0);
        assert_eq!(session.fish().horizontal_position(), 0.5);
        assert_eq!(session.difficulty(), tuning.initial_difficulty);
        assert_eq!(session.rng_state(), Some(RngState::new(12345)));
        assert!(session.rows().all(|r| r.len() == 20));
    }

    #[test]
    fn test_move_right_exact_step_and_cost() {
        let tuning = Tuning {
            initial_difficulty: 0.5,
            ..Tuning::default()
        };
        let mut session = Session::new(tuning.clone(), 7);
        session.move_right();
        let position = session.fish().horizontal_position();
        let oxygen = session.fish().oxygen_supply();
        assert!((position - (0.5 + tuning.movement_step)).abs() < 1e-12);
        assert!((oxygen - 0.98).abs() < 1e-12);
        assert_eq!(
            session.drain_events(),
            vec![
                SessionEvent::Moved(position),
                SessionEvent::OxygenChanged(oxygen),
            ]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_move_left_mirrors_right() {
        let mut session = Session::new(Tuning::default(), 1);
        session.move_left();
        session.move_left();
        assert!((session.fish().horizontal_position() - 0.4).abs() < 1e-12);
        assert!((session.fish().oxygen_supply() - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_moving_to_death_ends_session() {
        let tuning = Tuning {
            movement_cost: 0.5,
            ..Tuning::default()
        };
        let mut session = Session::new(tuning, 3);
        session.move_right();
        assert!(session.is_running());
        session.move_right();
        assert_eq!(session.phase(), SessionPhase::Ended);
        let position = session.fish().horizontal_position();

        session.move_left();
        assert_eq!(session.fish().horizontal_position(), position);
        let events = session.drain_events();
        assert!(matches!(events.last(), Some(SessionEvent::Ended { .. })));
    }

    #[test]
    fn test_ambient_light_dims_with_difficulty() {
        let mut session = Session::with_source(Tuning::default(), ConstantSource(0.5));
        session.difficulty = 0.0;
        assert_eq!(session.ambient_light(), 1.0);
        session.difficulty = 1.0;
        assert!((session.ambient_light() - session.tuning().min_ambient_light).abs() < 1e-12);
        session.difficulty = 0.5;
        let light = session.ambient_light();
        assert!(light < 1.0 && light > session.tuning().min_ambient_light);
    }

    #[test]
    fn test_decay_shrinks_toward_floor() {
        let tuning = Tuning {
            passive_decay_rate: 0.01,
            passive_decay_floor: 0.25,
            ..Tuning::default()
        };
        let mut session = Session::with_source(tuning, ConstantSource(0.5));
        session.difficulty = 0.0;
        assert!((session.effective_decay() - 0.01).abs() < 1e-12);
        session.difficulty = 0.5;
        assert!((session.effective_decay() - 0.005).abs() < 1e-12);
        session.difficulty = 1.0;
        assert!((session.effective_decay() - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_default_decay_reaches_zero_at_ceiling() {
        let tuning = Tuning {
            passive_decay_rate: 0.01,
            ..Tuning::default()
        };
        assert_eq!(tuning.passive_decay_floor, 0.0);
        let mut session = Session::with_source(tuning, ConstantSource(0.5));
        session.difficulty = 0.5;
        assert!((session.effective_decay() - 0.005).abs() < 1e-12);
        session.difficulty = 1.0;
        assert_eq!(session.effective_decay(), 0.0);
    }

    #[test]
    fn test_algae_penalty_scales_with_difficulty() {
        let mut session = Session::with_source(Tuning::default(), ConstantSource(0.5));
        session.difficulty = 0.0;
        let calm = session.algae_penalty();
        session.difficulty = 0.8;
        assert!(session.algae_penalty() > calm);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = Session::new(Tuning::default(), 99);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.rows.len(), session.row_count());
        assert!(snapshot.fish.alive);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
    }
}
