//! Fixed timestep driver
//!
//! Turns variable frame times into whole simulation ticks so the session
//! sees the same `dt` regardless of frame rate.

use super::rng::RandomSource;
use super::state::Session;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f64,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unspent frame time, always below `SIM_DT` after a normal frame
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Feed one frame of `frame_dt` seconds. The input's move is applied on
    /// the first substep only. Returns the number of ticks run.
    pub fn advance<R: RandomSource>(
        &mut self,
        session: &mut Session<R>,
        frame_dt: f64,
        input: &TickInput,
    ) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut pending = *input;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(session, &pending, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot input
            pending.movement = None;
        }

        // Drop time we could not simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Direction;
    use crate::tuning::Tuning;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut session = Session::new(Tuning::default(), 1);
        let mut clock = FixedStep::new();

        assert_eq!(clock.advance(&mut session, SIM_DT * 0.5, &TickInput::default()), 0);
        assert_eq!(session.tick_count(), 0);
        assert_eq!(clock.advance(&mut session, SIM_DT * 0.6, &TickInput::default()), 1);
        assert_eq!(session.tick_count(), 1);
        assert!(clock.accumulator() < SIM_DT);
    }

    #[test]
    fn test_long_frame_capped() {
        let mut session = Session::new(Tuning::default(), 1);
        let mut clock = FixedStep::new();

        let ran = clock.advance(&mut session, 5.0, &TickInput::default());
        assert_eq!(ran, MAX_SUBSTEPS);
        assert_eq!(session.tick_count(), u64::from(MAX_SUBSTEPS));
        assert!(clock.accumulator() <= SIM_DT);
    }

    #[test]
    fn test_move_applied_once_per_frame() {
        let mut session = Session::new(Tuning::default(), 1);
        let mut clock = FixedStep::new();
        let input = TickInput::moving(Direction::Right);

        let ran = clock.advance(&mut session, SIM_DT * 3.5, &input);
        assert_eq!(ran, 3);
        let position = session.fish().horizontal_position();
        assert!((position - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_bad_frame_time_ignored() {
        let mut session = Session::new(Tuning::default(), 1);
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance(&mut session, f64::NAN, &TickInput::default()), 0);
        assert_eq!(clock.advance(&mut session, -1.0, &TickInput::default()), 0);
        assert_eq!(clock.accumulator(), 0.0);
    }
}
