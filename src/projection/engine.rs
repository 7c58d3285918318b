//! Projection engine: validation, attempts, points and rounding in one call

use log::debug;

use super::adjustments::FallbackPolicy;
use super::attempts::{project_field_goal_attempts, project_free_throw_attempts, ProjectionBreakdown};
use super::result::ProjectionResult;
use super::validation::{
    AdjustmentFactors, GameContext, PlayerRates, RawAdjustmentFactors, RawGameContext, RawPlayerRates,
    ValidationError,
};

/// Decimals kept on point and attempt totals
pub const DEFAULT_POINTS_PRECISION: u32 = 1;

/// Decimals kept on the echoed pace adjustment
pub const DEFAULT_PACE_PRECISION: u32 = 2;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Decimal places for points and attempts in the result
    pub points_precision: u32,

    /// Decimal places for the pace adjustment echo
    pub pace_precision: u32,

    /// Substitutes for adjustment factors missing from reference data
    pub fallback: FallbackPolicy,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            points_precision: DEFAULT_POINTS_PRECISION,
            pace_precision: DEFAULT_PACE_PRECISION,
            fallback: FallbackPolicy::neutral(),
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Unrounded projection from validated inputs
    pub fn breakdown(&self, rates: &PlayerRates, game: &GameContext, factors: &AdjustmentFactors) -> ProjectionBreakdown {
        let projected_fga = project_field_goal_attempts(rates, game, factors);
        let projected_fta = project_free_throw_attempts(rates, game, factors);
        debug!(
            "minutes={} usage={} pace={} dvp_fga={} dvp_fta={} -> fga={:.3} fta={:.3}",
            game.projected_minutes(),
            game.usage_adjustment(),
            factors.pace_adjustment(),
            factors.dvp_fga_factor(),
            factors.dvp_fta_factor(),
            projected_fga,
            projected_fta,
        );
        ProjectionBreakdown::decompose(projected_fga, projected_fta, rates, factors.pace_adjustment())
    }

    /// Rounded projection from validated inputs
    pub fn project(&self, rates: &PlayerRates, game: &GameContext, factors: &AdjustmentFactors) -> ProjectionResult {
        let raw = self.breakdown(rates, game, factors);
        ProjectionResult::from_breakdown(&raw, self.config.points_precision, self.config.pace_precision)
    }

    /// Validate raw inputs and project. Stops at the first invalid input.
    pub fn compute_projection(
        &self,
        rates: &RawPlayerRates,
        game: &RawGameContext,
        factors: &RawAdjustmentFactors,
    ) -> Result<ProjectionResult, ValidationError> {
        let rates = PlayerRates::try_from(rates)?;
        let game = GameContext::parse(game)?;
        let factors = AdjustmentFactors::try_from(factors)?;
        Ok(self.project(&rates, &game, &factors))
    }
}

/// `compute_projection` with the default configuration
pub fn compute_projection(
    rates: &RawPlayerRates,
    game: &RawGameContext,
    factors: &RawAdjustmentFactors,
) -> Result<ProjectionResult, ValidationError> {
    ProjectionEngine::default().compute_projection(rates, game, factors)
}
