//! Pace adjustment and fallback resolution for the adjustment factors
//!
//! Reference data can be incomplete: a team without a pace entry, a league
//! average of zero, no defense-vs-position row for a team/position pair.
//! Those gaps are represented as `None` here and resolved to concrete
//! numbers by a `FallbackPolicy` before anything reaches the formula.

use log::debug;
use serde::{Deserialize, Serialize};

use super::validation::RawAdjustmentFactors;

/// Multiplier meaning "no adjustment"
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Defense-vs-position multipliers on attempts for one team/position pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefenseFactors {
    pub fga_factor: f64,
    pub fta_factor: f64,
}

/// Opponent pace relative to league average, if both are usable.
///
/// Returns `None` when either input is missing or non-finite, or when the
/// league average is zero.
pub fn pace_ratio(opponent_pace: Option<f64>, league_average_pace: Option<f64>) -> Option<f64> {
    let opponent = opponent_pace.filter(|p| p.is_finite())?;
    let league = league_average_pace.filter(|p| p.is_finite() && *p != 0.0)?;
    Some(opponent / league)
}

/// Opponent pace / league average pace, or exactly 1.0 when that ratio
/// can't be formed. Never fails.
pub fn compute_pace_adjustment(opponent_pace: Option<f64>, league_average_pace: Option<f64>) -> f64 {
    pace_ratio(opponent_pace, league_average_pace).unwrap_or(NEUTRAL_FACTOR)
}

/// Values substituted for adjustment factors that reference data can't supply
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
    pub pace_adjustment: f64,
    pub dvp_fga_factor: f64,
    pub dvp_fta_factor: f64,
}

impl FallbackPolicy {
    /// Assume league-average pace and an average defense
    pub fn neutral() -> Self {
        Self {
            pace_adjustment: NEUTRAL_FACTOR,
            dvp_fga_factor: NEUTRAL_FACTOR,
            dvp_fta_factor: NEUTRAL_FACTOR,
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Adjustment data as looked up from reference tables, possibly incomplete
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdjustmentInputs {
    pub opponent_pace: Option<f64>,
    pub league_average_pace: Option<f64>,
    pub defense: Option<DefenseFactors>,
}

impl AdjustmentInputs {
    /// Fill every gap from `policy`, producing concrete factors.
    pub fn resolve(&self, policy: &FallbackPolicy) -> RawAdjustmentFactors {
        let pace_adjustment = match pace_ratio(self.opponent_pace, self.league_average_pace) {
            Some(ratio) => ratio,
            None => {
                debug!(
                    "pace unavailable (opponent={:?}, league={:?}), using {}",
                    self.opponent_pace, self.league_average_pace, policy.pace_adjustment
                );
                policy.pace_adjustment
            }
        };

        let (dvp_fga_factor, dvp_fta_factor) = match self.defense {
            Some(defense) => (defense.fga_factor, defense.fta_factor),
            None => {
                debug!("no defense-vs-position data, using fallback factors");
                (policy.dvp_fga_factor, policy.dvp_fta_factor)
            }
        };

        RawAdjustmentFactors {
            pace_adjustment,
            dvp_fga_factor,
            dvp_fta_factor,
        }
    }
}
