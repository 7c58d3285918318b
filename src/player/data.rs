//! Player records as stored in players.json

use serde::{Deserialize, Serialize};

use crate::projection::{PlayerRates, RawPlayerRates, ValidationError};

/// A single player from the reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Display name, e.g. "Nikola Jokic"
    pub name: String,

    /// Team code of the player's current team
    pub team: String,

    /// Recorded position (PG, SG, SF, PF, C)
    pub position: String,

    /// Season points per game, echoed back alongside the projection
    #[serde(default)]
    pub season_average: Option<f64>,

    /// Per-36 rates and shooting splits; validated when projected
    #[serde(flatten)]
    pub rates: RawPlayerRates,
}

impl PlayerRecord {
    /// Validated rates for the projection engine
    pub fn validated_rates(&self) -> Result<PlayerRates, ValidationError> {
        PlayerRates::try_from(&self.rates)
    }
}
