//! Point projection formula: per-36 rates scaled by minutes, usage, pace and
//! defense-vs-position, decomposed into twos, threes and free throws.
//!
//! Pure computation; reference data lookups live in `crate::reference`.

mod validation;
mod adjustments;
mod attempts;
mod result;
mod engine;

pub use validation::{
    parse_bounded_number, parse_projected_minutes, parse_usage_adjustment,
    validate_player_rates, validate_adjustment_factors,
    ValidationError, RawPlayerRates, PlayerRates, RawGameContext, GameContext,
    RawAdjustmentFactors, AdjustmentFactors, MAX_PROJECTED_MINUTES, MAX_USAGE_ADJUSTMENT,
};
pub use adjustments::{
    compute_pace_adjustment, pace_ratio, AdjustmentInputs, DefenseFactors, FallbackPolicy, NEUTRAL_FACTOR,
};
pub use attempts::{
    projected_attempts, project_field_goal_attempts, project_free_throw_attempts,
    ProjectionBreakdown, BASELINE_MINUTES,
};
pub use result::{round_to, ProjectionResult, PointsBreakdown, AttemptsBreakdown};
pub use engine::{
    compute_projection, ProjectionEngine, ProjectionConfig,
    DEFAULT_POINTS_PRECISION, DEFAULT_PACE_PRECISION,
};
