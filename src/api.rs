//! Projection service behind the HTTP endpoint
//!
//! Turns query parameters into a projection using reference data, and maps
//! every failure to a status code. Transport-agnostic: the Lambda binary
//! and the CLI both go through `ProjectionService`.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projection::{
    AdjustmentFactors, AdjustmentInputs, GameContext, ProjectionEngine, ProjectionResult, RawAdjustmentFactors,
    RawGameContext, ValidationError,
};
use crate::reference::{normalize_position, ReferenceSource};

/// Maximum names returned by the player search route
pub const PLAYER_SEARCH_LIMIT: usize = 10;

/// Why a request could not be served
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("team not found: {0}")]
    TeamNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingParameter(_) | ApiError::Validation(_) => 400,
            ApiError::PlayerNotFound(_) | ApiError::TeamNotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }
}

/// Query parameters of a projection request, still as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionQuery {
    pub player_name: String,
    pub opponent_team: String,
    pub projected_minutes: String,
    pub usage_adjustment: String,
    #[serde(default)]
    pub player_position: Option<String>,
}

fn required(params: &HashMap<String, String>, name: &'static str) -> Result<String, ApiError> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingParameter(name))
}

impl ProjectionQuery {
    /// Extract the query from request parameters. Blank values count as missing.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        Ok(Self {
            player_name: required(params, "player_name")?,
            opponent_team: required(params, "opponent_team")?,
            projected_minutes: required(params, "projected_minutes")?,
            usage_adjustment: required(params, "usage_adjustment")?,
            player_position: params
                .get("player_position")
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        })
    }

    /// Reject blank required fields, in the same order as `from_params`
    pub fn ensure_complete(&self) -> Result<(), ApiError> {
        let fields = [
            ("player_name", &self.player_name),
            ("opponent_team", &self.opponent_team),
            ("projected_minutes", &self.projected_minutes),
            ("usage_adjustment", &self.usage_adjustment),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ApiError::MissingParameter(name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEcho {
    pub name: String,
    pub team: String,
    pub position: String,
    pub season_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentEcho {
    pub team: String,
    pub pace: f64,
    pub pace_rank: u32,
    pub dvp_fga_factor: f64,
    pub dvp_fta_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsEcho {
    pub projected_minutes: f64,
    pub usage_adjustment: f64,
    pub player_position: String,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResponse {
    pub player: PlayerEcho,
    pub opponent: OpponentEcho,
    pub inputs: InputsEcho,
    pub projection: ProjectionResult,
}

/// Body of the player search route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSearchResponse {
    pub players: Vec<String>,
}

/// Status code and JSON body, ready for any transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    fn json<T: Serialize>(body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(&ApiError::Internal(e.to_string())),
        }
    }

    fn error(err: &ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: serde_json::json!({ "error": err.to_string() }).to_string(),
        }
    }
}

/// Reference data plus engine; one per process
#[derive(Debug, Clone)]
pub struct ProjectionService<S> {
    source: S,
    engine: ProjectionEngine,
}

impl<S: ReferenceSource> ProjectionService<S> {
    pub fn new(source: S, engine: ProjectionEngine) -> Self {
        Self { source, engine }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one projection.
    ///
    /// Blank fields are rejected as missing, whichever route built the
    /// query. Game inputs are validated before any lookup, so a malformed number
    /// is a 400 even for an unknown player.
    pub fn project(&self, query: &ProjectionQuery) -> Result<ProjectionResponse, ApiError> {
        query.ensure_complete()?;
        let game = GameContext::parse(&RawGameContext::new(
            query.projected_minutes.as_str(),
            query.usage_adjustment.as_str(),
        ))?;

        let player = self
            .source
            .player(&query.player_name)
            .ok_or_else(|| ApiError::PlayerNotFound(query.player_name.clone()))?;
        let opponent = self
            .source
            .team_pace(&query.opponent_team)
            .ok_or_else(|| ApiError::TeamNotFound(query.opponent_team.clone()))?;

        let position = query
            .player_position
            .as_deref()
            .map(normalize_position)
            .unwrap_or_else(|| normalize_position(&player.position));

        let inputs = AdjustmentInputs {
            opponent_pace: Some(opponent.pace),
            league_average_pace: Some(self.source.league_average_pace()),
            defense: self.source.defense_factors(&opponent.team, &position),
        };
        let resolved: RawAdjustmentFactors = inputs.resolve(&self.engine.config().fallback);

        let rates = player.validated_rates()?;
        let factors = AdjustmentFactors::try_from(&resolved)?;
        let projection = self.engine.project(&rates, &game, &factors);

        debug!(
            "{} vs {} ({}): {} points",
            player.name, opponent.team, position, projection.projected_points
        );

        Ok(ProjectionResponse {
            player: PlayerEcho {
                name: player.name.clone(),
                team: player.team.clone(),
                position: player.position.clone(),
                season_average: player.season_average,
            },
            opponent: OpponentEcho {
                team: opponent.team.clone(),
                pace: opponent.pace,
                pace_rank: opponent.rank,
                dvp_fga_factor: resolved.dvp_fga_factor,
                dvp_fta_factor: resolved.dvp_fta_factor,
            },
            inputs: InputsEcho {
                projected_minutes: game.projected_minutes(),
                usage_adjustment: game.usage_adjustment(),
                player_position: position,
            },
            projection,
        })
    }

    /// Player names matching `query`, capped at `PLAYER_SEARCH_LIMIT`
    pub fn search(&self, query: &str) -> PlayerSearchResponse {
        PlayerSearchResponse {
            players: self
                .source
                .search_players(query, PLAYER_SEARCH_LIMIT)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Projection route: parameters in, status and JSON body out
    pub fn handle_projection(&self, params: &HashMap<String, String>) -> HttpReply {
        match ProjectionQuery::from_params(params).and_then(|query| self.project(&query)) {
            Ok(response) => HttpReply::json(&response),
            Err(err) => {
                warn!("projection request rejected ({}): {}", err.status_code(), err);
                HttpReply::error(&err)
            }
        }
    }

    /// Player search route (`q` parameter)
    pub fn handle_search(&self, params: &HashMap<String, String>) -> HttpReply {
        let query = params.get("q").map(String::as_str).unwrap_or("");
        HttpReply::json(&self.search(query))
    }
}
