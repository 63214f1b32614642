//! Game balance values
//!
//! Loaded from JSON so classrooms can tweak pacing without rebuilding.
//! Missing fields take their defaults; out-of-range values are clamped with a
//! warning rather than rejected.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Failure to read or parse a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {}", e),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // === Play field ===
    /// Cell width as a fraction of screen width (0.05 = 20 cells per row)
    pub cell_unit_size: f64,
    /// Rows on screen; one more is kept queued off-screen
    pub visible_row_count: usize,
    /// Rows scrolled per second
    pub row_scroll_speed: f64,

    // === Fish ===
    /// Oxygen paid per move
    pub movement_cost: f64,
    /// Distance per move, fraction of screen width
    pub movement_step: f64,

    // === Oxygen ===
    /// Oxygen lost per tick at difficulty 0
    pub passive_decay_rate: f64,
    /// Fraction of the decay rate that still applies at the ceiling. The
    /// default 0 lets decay fade out completely.
    pub passive_decay_floor: f64,
    /// Oxygen gained per bubble
    pub oxygen_bubble_gain: f64,
    /// Oxygen lost per algae contact at difficulty 0 (doubles at difficulty 1)
    pub algae_competition_cost: f64,

    // === Difficulty ===
    pub initial_difficulty: f64,
    /// Added every tick
    pub difficulty_growth_rate: f64,
    pub difficulty_ceiling: f64,

    // === Presentation hints ===
    /// Scene brightness once difficulty reaches the ceiling
    pub min_ambient_light: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cell_unit_size: 0.05,
            visible_row_count: 6,
            row_scroll_speed: 1.5,

            movement_cost: 0.02,
            movement_step: 0.05,

            passive_decay_rate: 0.0005,
            passive_decay_floor: 0.0,
            oxygen_bubble_gain: 0.15,
            algae_competition_cost: 0.05,

            initial_difficulty: 0.1,
            difficulty_growth_rate: 0.0002,
            difficulty_ceiling: 1.0,

            min_ambient_light: 0.2,
        }
    }
}

/// Largest window the session will keep
pub const MAX_VISIBLE_ROWS: usize = 64;

impl Tuning {
    /// Parse tuning JSON. The result is not yet sanitized.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Read a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Copy with every value forced into its valid range
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut t = self.clone();

        clamp_field("cell_unit_size", &mut t.cell_unit_size, defaults.cell_unit_size, 0.01, 1.0);
        clamp_field(
            "row_scroll_speed",
            &mut t.row_scroll_speed,
            defaults.row_scroll_speed,
            0.0,
            60.0,
        );
        clamp_field("movement_cost", &mut t.movement_cost, defaults.movement_cost, 0.0, 1.0);
        clamp_field("movement_step", &mut t.movement_step, defaults.movement_step, 0.0, 1.0);
        clamp_field(
            "passive_decay_rate",
            &mut t.passive_decay_rate,
            defaults.passive_decay_rate,
            0.0,
            1.0,
        );
        clamp_field(
            "passive_decay_floor",
            &mut t.passive_decay_floor,
            defaults.passive_decay_floor,
            0.0,
            1.0,
        );
        clamp_field(
            "oxygen_bubble_gain",
            &mut t.oxygen_bubble_gain,
            defaults.oxygen_bubble_gain,
            0.0,
            1.0,
        );
        clamp_field(
            "algae_competition_cost",
            &mut t.algae_competition_cost,
            defaults.algae_competition_cost,
            0.0,
            1.0,
        );
        clamp_field(
            "difficulty_ceiling",
            &mut t.difficulty_ceiling,
            defaults.difficulty_ceiling,
            0.0,
            1.0,
        );
        clamp_field(
            "initial_difficulty",
            &mut t.initial_difficulty,
            defaults.initial_difficulty,
            0.0,
            t.difficulty_ceiling,
        );
        clamp_field(
            "difficulty_growth_rate",
            &mut t.difficulty_growth_rate,
            defaults.difficulty_growth_rate,
            0.0,
            1.0,
        );
        clamp_field(
            "min_ambient_light",
            &mut t.min_ambient_light,
            defaults.min_ambient_light,
            0.0,
            1.0,
        );

        if t.visible_row_count == 0 || t.visible_row_count > MAX_VISIBLE_ROWS {
            let fixed = t.visible_row_count.clamp(1, MAX_VISIBLE_ROWS);
            log::warn!(
                "visible_row_count {} out of range, using {}",
                t.visible_row_count,
                fixed
            );
            t.visible_row_count = fixed;
        }

        t
    }
}

fn clamp_field(name: &str, value: &mut f64, default: f64, min: f64, max: f64) {
    if !value.is_finite() {
        log::warn!("{} is not finite, using default {}", name, default);
        *value = default.clamp(min, max);
    } else if *value < min || *value > max {
        let fixed = value.clamp(min, max);
        log::warn!("{} {} out of range, using {}", name, value, fixed);
        *value = fixed;
    }
}
