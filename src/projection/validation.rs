//! Input validation for the projection formula
//!
//! Every numeric input crosses this boundary exactly once. Text inputs are
//! parsed by a total function (`&str -> Result<f64, ValidationError>`) and
//! player/adjustment records are turned into typed values whose fields can
//! no longer hold invalid states.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound (inclusive) on projected minutes for a regulation game
pub const MAX_PROJECTED_MINUTES: f64 = 48.0;

/// Upper bound (inclusive) on the usage multiplier
pub const MAX_USAGE_ADJUSTMENT: f64 = 5.0;

/// A rejected input. Messages always name the field and the received value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required but was not provided")]
    MissingField { field: String },

    #[error("{field} must be a number, got '{raw}'")]
    Unparseable { field: String, raw: String },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: String, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange { field: String, value: f64, max: f64 },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::Unparseable { field, .. }
            | ValidationError::NotFinite { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

/// Check an already-numeric value against the shared numeric rules.
fn check_number(value: f64, field: &str, lower_exclusive_zero: bool) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field: field.to_string(), value });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field: field.to_string(), value });
    }
    if lower_exclusive_zero && value <= 0.0 {
        return Err(ValidationError::NotPositive { field: field.to_string(), value });
    }
    Ok(value)
}

/// Parse `raw` as a non-negative finite number.
///
/// With `lower_exclusive_zero` the value must also be strictly positive.
/// Surrounding whitespace is ignored; an empty string is unparseable.
pub fn parse_bounded_number(raw: &str, field: &str, lower_exclusive_zero: bool) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| ValidationError::Unparseable {
        field: field.to_string(),
        raw: raw.to_string(),
    })?;
    check_number(value, field, lower_exclusive_zero)
}

fn check_upper(value: f64, field: &str, max: f64) -> Result<f64, ValidationError> {
    if value > max {
        return Err(ValidationError::OutOfRange { field: field.to_string(), value, max });
    }
    Ok(value)
}

/// Parse projected minutes: `0 < minutes <= 48`
pub fn parse_projected_minutes(raw: &str) -> Result<f64, ValidationError> {
    let minutes = parse_bounded_number(raw, "projected_minutes", true)?;
    check_upper(minutes, "projected_minutes", MAX_PROJECTED_MINUTES)
}

/// Parse the usage multiplier: `0 < usage <= 5`
pub fn parse_usage_adjustment(raw: &str) -> Result<f64, ValidationError> {
    let usage = parse_bounded_number(raw, "usage_adjustment", true)?;
    check_upper(usage, "usage_adjustment", MAX_USAGE_ADJUSTMENT)
}

/// Player rate stats as they arrive from reference data.
///
/// Every field is optional so that a record with a hole in it still loads;
/// the hole is reported when that player is projected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerRates {
    #[serde(rename = "fga_per36", default)]
    pub field_goal_attempts_per36: Option<f64>,
    #[serde(rename = "fta_per36", default)]
    pub free_throw_attempts_per36: Option<f64>,
    #[serde(default)]
    pub two_point_pct: Option<f64>,
    #[serde(default)]
    pub three_point_pct: Option<f64>,
    #[serde(default)]
    pub free_throw_pct: Option<f64>,
    #[serde(default)]
    pub three_point_attempt_rate: Option<f64>,
}

/// Validated per-36 rates and shooting percentages for one player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerRates {
    field_goal_attempts_per36: f64,
    free_throw_attempts_per36: f64,
    two_point_pct: f64,
    three_point_pct: f64,
    free_throw_pct: f64,
    three_point_attempt_rate: f64,
}

impl PlayerRates {
    /// Build validated rates from plain numbers
    pub fn new(
        field_goal_attempts_per36: f64,
        free_throw_attempts_per36: f64,
        two_point_pct: f64,
        three_point_pct: f64,
        free_throw_pct: f64,
        three_point_attempt_rate: f64,
    ) -> Result<Self, ValidationError> {
        validate_player_rates(&RawPlayerRates {
            field_goal_attempts_per36: Some(field_goal_attempts_per36),
            free_throw_attempts_per36: Some(free_throw_attempts_per36),
            two_point_pct: Some(two_point_pct),
            three_point_pct: Some(three_point_pct),
            free_throw_pct: Some(free_throw_pct),
            three_point_attempt_rate: Some(three_point_attempt_rate),
        })
    }

    pub fn field_goal_attempts_per36(&self) -> f64 {
        self.field_goal_attempts_per36
    }

    pub fn free_throw_attempts_per36(&self) -> f64 {
        self.free_throw_attempts_per36
    }

    pub fn two_point_pct(&self) -> f64 {
        self.two_point_pct
    }

    pub fn three_point_pct(&self) -> f64 {
        self.three_point_pct
    }

    pub fn free_throw_pct(&self) -> f64 {
        self.free_throw_pct
    }

    /// Share of field goal attempts taken from three. Not clamped to [0, 1].
    pub fn three_point_attempt_rate(&self) -> f64 {
        self.three_point_attempt_rate
    }
}

impl TryFrom<&RawPlayerRates> for PlayerRates {
    type Error = ValidationError;

    fn try_from(raw: &RawPlayerRates) -> Result<Self, Self::Error> {
        validate_player_rates(raw)
    }
}

fn required_rate(value: Option<f64>, field: &str) -> Result<f64, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField { field: field.to_string() })?;
    check_number(value, field, false)
}

/// All six rate fields must be present, finite and non-negative.
pub fn validate_player_rates(raw: &RawPlayerRates) -> Result<PlayerRates, ValidationError> {
    Ok(PlayerRates {
        field_goal_attempts_per36: required_rate(raw.field_goal_attempts_per36, "fga_per36")?,
        free_throw_attempts_per36: required_rate(raw.free_throw_attempts_per36, "fta_per36")?,
        two_point_pct: required_rate(raw.two_point_pct, "two_point_pct")?,
        three_point_pct: required_rate(raw.three_point_pct, "three_point_pct")?,
        free_throw_pct: required_rate(raw.free_throw_pct, "free_throw_pct")?,
        three_point_attempt_rate: required_rate(raw.three_point_attempt_rate, "three_point_attempt_rate")?,
    })
}

/// Per-request game inputs as received (query strings, CSV cells)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGameContext {
    pub projected_minutes: String,
    pub usage_adjustment: String,
}

impl RawGameContext {
    pub fn new(projected_minutes: impl Into<String>, usage_adjustment: impl Into<String>) -> Self {
        Self {
            projected_minutes: projected_minutes.into(),
            usage_adjustment: usage_adjustment.into(),
        }
    }
}

/// Validated minutes and usage for one game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameContext {
    projected_minutes: f64,
    usage_adjustment: f64,
}

impl GameContext {
    /// Build from numbers, enforcing the same bounds as the text parsers
    pub fn new(projected_minutes: f64, usage_adjustment: f64) -> Result<Self, ValidationError> {
        let projected_minutes = check_number(projected_minutes, "projected_minutes", true)
            .and_then(|m| check_upper(m, "projected_minutes", MAX_PROJECTED_MINUTES))?;
        let usage_adjustment = check_number(usage_adjustment, "usage_adjustment", true)
            .and_then(|u| check_upper(u, "usage_adjustment", MAX_USAGE_ADJUSTMENT))?;
        Ok(Self { projected_minutes, usage_adjustment })
    }

    /// Parse both fields from text
    pub fn parse(raw: &RawGameContext) -> Result<Self, ValidationError> {
        Ok(Self {
            projected_minutes: parse_projected_minutes(&raw.projected_minutes)?,
            usage_adjustment: parse_usage_adjustment(&raw.usage_adjustment)?,
        })
    }

    pub fn projected_minutes(&self) -> f64 {
        self.projected_minutes
    }

    pub fn usage_adjustment(&self) -> f64 {
        self.usage_adjustment
    }
}

/// Adjustment factors after fallback resolution, before validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawAdjustmentFactors {
    pub pace_adjustment: f64,
    pub dvp_fga_factor: f64,
    pub dvp_fta_factor: f64,
}

/// Validated multiplicative adjustments (all finite and > 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentFactors {
    pace_adjustment: f64,
    dvp_fga_factor: f64,
    dvp_fta_factor: f64,
}

impl AdjustmentFactors {
    pub fn new(pace_adjustment: f64, dvp_fga_factor: f64, dvp_fta_factor: f64) -> Result<Self, ValidationError> {
        validate_adjustment_factors(&RawAdjustmentFactors {
            pace_adjustment,
            dvp_fga_factor,
            dvp_fta_factor,
        })
    }

    /// All three factors at 1.0
    pub fn neutral() -> Self {
        Self {
            pace_adjustment: 1.0,
            dvp_fga_factor: 1.0,
            dvp_fta_factor: 1.0,
        }
    }

    pub fn pace_adjustment(&self) -> f64 {
        self.pace_adjustment
    }

    pub fn dvp_fga_factor(&self) -> f64 {
        self.dvp_fga_factor
    }

    pub fn dvp_fta_factor(&self) -> f64 {
        self.dvp_fta_factor
    }
}

impl TryFrom<&RawAdjustmentFactors> for AdjustmentFactors {
    type Error = ValidationError;

    fn try_from(raw: &RawAdjustmentFactors) -> Result<Self, Self::Error> {
        validate_adjustment_factors(raw)
    }
}

/// Pace and both defense factors must be finite and strictly positive.
pub fn validate_adjustment_factors(raw: &RawAdjustmentFactors) -> Result<AdjustmentFactors, ValidationError> {
    Ok(AdjustmentFactors {
        pace_adjustment: check_number(raw.pace_adjustment, "pace_adjustment", true)?,
        dvp_fga_factor: check_number(raw.dvp_fga_factor, "dvp_fga_factor", true)?,
        dvp_fta_factor: check_number(raw.dvp_fta_factor, "dvp_fta_factor", true)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_rates() -> RawPlayerRates {
        RawPlayerRates {
            field_goal_attempts_per36: Some(18.0),
            free_throw_attempts_per36: Some(5.0),
            two_point_pct: Some(0.55),
            three_point_pct: Some(0.38),
            free_throw_pct: Some(0.85),
            three_point_attempt_rate: Some(0.4),
        }
    }

    #[test]
    fn test_parse_bounded_number_accepts_padded_text() {
        assert_eq!(parse_bounded_number(" 32.5 ", "projected_minutes", true), Ok(32.5));
        assert_eq!(parse_bounded_number("0", "rate", false), Ok(0.0));
    }

    #[test]
    fn test_parse_bounded_number_rejections() {
        assert!(matches!(
            parse_bounded_number("abc", "x", false),
            Err(ValidationError::Unparseable { .. })
        ));
        assert!(matches!(
            parse_bounded_number("", "x", false),
            Err(ValidationError::Unparseable { .. })
        ));
        assert!(matches!(
            parse_bounded_number("NaN", "x", false),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            parse_bounded_number("inf", "x", false),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            parse_bounded_number("-0.5", "x", false),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_bounded_number("0", "x", true),
            Err(ValidationError::NotPositive { .. })
        ));
    }

    #[test]
    fn test_projected_minutes_bounds() {
        assert_eq!(parse_projected_minutes("48"), Ok(48.0));
        assert_eq!(parse_projected_minutes("0.5"), Ok(0.5));
        for bad in ["0", "49", "abc", "", "-10", "-0.1", "48.01"] {
            assert!(parse_projected_minutes(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_usage_adjustment_bounds() {
        assert_eq!(parse_usage_adjustment("5"), Ok(5.0));
        assert_eq!(parse_usage_adjustment("1.15"), Ok(1.15));
        for bad in ["0", "5.01", "-1", "", "high"] {
            assert!(parse_usage_adjustment(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_error_messages_name_field_and_value() {
        let err = parse_projected_minutes("49").unwrap_err();
        assert_eq!(err.field(), "projected_minutes");
        assert_eq!(err.to_string(), "projected_minutes must be at most 48, got 49");

        let err = parse_usage_adjustment("lots").unwrap_err();
        assert_eq!(err.to_string(), "usage_adjustment must be a number, got 'lots'");
    }

    #[test]
    fn test_validate_player_rates() {
        let rates = validate_player_rates(&complete_rates()).unwrap();
        assert_eq!(rates.field_goal_attempts_per36(), 18.0);
        assert_eq!(rates.three_point_attempt_rate(), 0.4);
    }

    #[test]
    fn test_validate_player_rates_missing_field() {
        let raw = RawPlayerRates {
            free_throw_pct: None,
            ..complete_rates()
        };
        let err = validate_player_rates(&raw).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "free_throw_pct".to_string() });
    }

    #[test]
    fn test_validate_player_rates_negative_and_nan() {
        let raw = RawPlayerRates {
            field_goal_attempts_per36: Some(-1.0),
            ..complete_rates()
        };
        assert!(matches!(validate_player_rates(&raw), Err(ValidationError::Negative { .. })));

        let raw = RawPlayerRates {
            three_point_pct: Some(f64::NAN),
            ..complete_rates()
        };
        assert!(matches!(validate_player_rates(&raw), Err(ValidationError::NotFinite { .. })));
    }

    #[test]
    fn test_three_point_rate_above_one_is_not_rejected() {
        let raw = RawPlayerRates {
            three_point_attempt_rate: Some(1.2),
            ..complete_rates()
        };
        assert!(validate_player_rates(&raw).is_ok());
    }

    #[test]
    fn test_validate_adjustment_factors() {
        assert!(AdjustmentFactors::new(1.03, 0.95, 1.1).is_ok());
        assert!(AdjustmentFactors::new(0.0, 1.0, 1.0).is_err());
        assert!(AdjustmentFactors::new(1.0, f64::INFINITY, 1.0).is_err());
        assert!(AdjustmentFactors::new(1.0, 1.0, -0.2).is_err());
        assert_eq!(AdjustmentFactors::neutral(), AdjustmentFactors::new(1.0, 1.0, 1.0).unwrap());
    }

    #[test]
    fn test_game_context() {
        let ctx = GameContext::parse(&RawGameContext::new("32", "1.0")).unwrap();
        assert_eq!(ctx.projected_minutes(), 32.0);
        assert_eq!(ctx.usage_adjustment(), 1.0);

        assert!(GameContext::new(0.0, 1.0).is_err());
        assert!(GameContext::new(30.0, 5.5).is_err());
        assert!(GameContext::parse(&RawGameContext::new("30", "")).is_err());
    }
}
