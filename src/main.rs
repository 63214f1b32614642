//! Algae Race headless runner
//!
//! Plays one session on autopilot and reports how long the fish survived.
//!
//! Usage: `algae-race [seed] [tuning.json]`

use algae_race::consts::SIM_DT;
use algae_race::sim::{FixedStep, Session, SessionEvent, TickInput, choose_move};
use algae_race::tuning::Tuning;

/// Simulated frame length (a 30 fps renderer)
const FRAME_DT: f64 = 1.0 / 30.0;
/// Give up after this many simulated seconds
const MAX_SECONDS: f64 = 60.0 * 60.0;

fn main() {
    env_logger::init();
    log::info!("Algae Race (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed {:?}, using 0", arg);
            0
        }),
        None => 0,
    };
    let tuning = args
        .next()
        .map(Tuning::load_or_default)
        .unwrap_or_default();

    let mut session = Session::new(tuning, seed);
    let mut clock = FixedStep::new();
    let mut bubbles = 0u32;
    let mut contacts = 0u32;

    while session.is_running() && session.survival_time() < MAX_SECONDS {
        let input = TickInput {
            movement: choose_move(&session),
        };
        clock.advance(&mut session, FRAME_DT, &input);

        for event in session.drain_events() {
            match event {
                SessionEvent::BubbleCollected { .. } => bubbles += 1,
                SessionEvent::AlgaeContact { .. } => contacts += 1,
                _ => {}
            }
        }
    }

    println!(
        "seed {}: survived {:.1}s ({} ticks of {:.4}s), {} rows, {} bubbles, {} algae contacts",
        seed,
        session.survival_time(),
        session.tick_count(),
        SIM_DT,
        session.rows_passed(),
        bubbles,
        contacts
    );
}
