//! Attempt projection and points decomposition

use serde::{Deserialize, Serialize};

use super::validation::{AdjustmentFactors, GameContext, PlayerRates};

/// Minutes that per-36 rates are normalized to
pub const BASELINE_MINUTES: f64 = 36.0;

/// Scale a per-36 rate to a game.
///
/// Minutes scale linearly from the 36-minute baseline; usage, defense and
/// pace are independent multipliers, each applied once.
pub fn projected_attempts(
    rate_per36: f64,
    projected_minutes: f64,
    usage_adjustment: f64,
    defense_factor: f64,
    pace_adjustment: f64,
) -> f64 {
    rate_per36 * (projected_minutes / BASELINE_MINUTES) * usage_adjustment * defense_factor * pace_adjustment
}

/// Projected field goal attempts
pub fn project_field_goal_attempts(rates: &PlayerRates, game: &GameContext, factors: &AdjustmentFactors) -> f64 {
    projected_attempts(
        rates.field_goal_attempts_per36(),
        game.projected_minutes(),
        game.usage_adjustment(),
        factors.dvp_fga_factor(),
        factors.pace_adjustment(),
    )
}

/// Projected free throw attempts
pub fn project_free_throw_attempts(rates: &PlayerRates, game: &GameContext, factors: &AdjustmentFactors) -> f64 {
    projected_attempts(
        rates.free_throw_attempts_per36(),
        game.projected_minutes(),
        game.usage_adjustment(),
        factors.dvp_fta_factor(),
        factors.pace_adjustment(),
    )
}

/// Unrounded attempts and points for one projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBreakdown {
    pub projected_fga: f64,
    pub projected_fta: f64,
    pub two_point_attempts: f64,
    pub three_point_attempts: f64,
    pub points_from_twos: f64,
    pub points_from_threes: f64,
    pub points_from_free_throws: f64,
    pub total_points: f64,
    pub pace_adjustment: f64,
}

impl ProjectionBreakdown {
    /// Split projected attempts into two/three/free-throw points.
    ///
    /// The three-point attempt rate is used as-is; a value outside [0, 1]
    /// produces a negative share on one side rather than an error.
    pub fn decompose(projected_fga: f64, projected_fta: f64, rates: &PlayerRates, pace_adjustment: f64) -> Self {
        let three_rate = rates.three_point_attempt_rate();
        let two_point_attempts = projected_fga * (1.0 - three_rate);
        let three_point_attempts = projected_fga * three_rate;

        let points_from_twos = two_point_attempts * rates.two_point_pct() * 2.0;
        let points_from_threes = three_point_attempts * rates.three_point_pct() * 3.0;
        let points_from_free_throws = projected_fta * rates.free_throw_pct();

        Self {
            projected_fga,
            projected_fta,
            two_point_attempts,
            three_point_attempts,
            points_from_twos,
            points_from_threes,
            points_from_free_throws,
            total_points: points_from_twos + points_from_threes + points_from_free_throws,
            pace_adjustment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn rates() -> PlayerRates {
        PlayerRates::new(18.0, 5.0, 0.55, 0.38, 0.85, 0.4).unwrap()
    }

    #[test]
    fn test_baseline_returns_rate() {
        for rate in [0.0, 1.0, 7.3, 18.0, 23.456789] {
            assert_eq!(projected_attempts(rate, 36.0, 1.0, 1.0, 1.0), rate);
        }
    }

    #[test]
    fn test_factor_order_does_not_matter() {
        let a = projected_attempts(18.0, 30.0, 1.1, 0.95, 1.02);
        let b = projected_attempts(18.0, 30.0, 1.02, 1.1, 0.95);
        assert_relative_eq!(a, b, max_relative = 1e-12);
        assert_relative_eq!(a, 18.0 * (30.0 / 36.0) * 1.1 * 0.95 * 1.02, max_relative = 1e-12);
    }

    #[test]
    fn test_field_goal_and_free_throw_use_their_own_defense_factor() {
        let game = GameContext::new(36.0, 1.0).unwrap();
        let factors = AdjustmentFactors::new(1.0, 1.2, 0.5).unwrap();
        assert_relative_eq!(project_field_goal_attempts(&rates(), &game, &factors), 21.6);
        assert_relative_eq!(project_free_throw_attempts(&rates(), &game, &factors), 2.5);
    }

    #[test]
    fn test_decompose_scenario() {
        let b = ProjectionBreakdown::decompose(16.0, 5.0 * 32.0 / 36.0, &rates(), 1.0);
        assert_relative_eq!(b.two_point_attempts, 9.6, epsilon = 1e-12);
        assert_relative_eq!(b.three_point_attempts, 6.4, epsilon = 1e-12);
        assert_relative_eq!(b.points_from_twos, 10.56, epsilon = 1e-12);
        assert_relative_eq!(b.points_from_threes, 7.296, epsilon = 1e-12);
        assert_relative_eq!(b.points_from_free_throws, 3.777_777_777_8, epsilon = 1e-9);
        assert_eq!(b.total_points, b.points_from_twos + b.points_from_threes + b.points_from_free_throws);
    }

    #[test]
    fn test_three_point_rate_above_one_propagates() {
        let rates = PlayerRates::new(10.0, 0.0, 0.5, 0.4, 0.8, 1.5).unwrap();
        let b = ProjectionBreakdown::decompose(10.0, 0.0, &rates, 1.0);
        assert_relative_eq!(b.two_point_attempts, -5.0);
        assert_relative_eq!(b.three_point_attempts, 15.0);
        assert_relative_eq!(b.total_points, -5.0 + 18.0);
    }

    proptest! {
        #[test]
        fn prop_attempts_increase_with_minutes(
            rate in 0.1f64..40.0,
            minutes in 1.0f64..47.0,
            extra in 0.01f64..1.0,
            usage in 0.1f64..5.0,
            defense in 0.5f64..1.5,
            pace in 0.8f64..1.2,
        ) {
            let lower = projected_attempts(rate, minutes, usage, defense, pace);
            let higher = projected_attempts(rate, minutes + extra, usage, defense, pace);
            prop_assert!(higher > lower);
        }

        #[test]
        fn prop_total_is_sum_of_parts(
            fga in 0.0f64..40.0,
            fta in 0.0f64..20.0,
            two in 0.0f64..1.0,
            three in 0.0f64..1.0,
            ft in 0.0f64..1.0,
            rate3 in 0.0f64..1.0,
        ) {
            let rates = PlayerRates::new(fga, fta, two, three, ft, rate3).unwrap();
            let b = ProjectionBreakdown::decompose(fga, fta, &rates, 1.0);

            let twos = 2.0 * two * (fga - fga * rate3);
            let threes = 3.0 * three * (fga * rate3);
            let free_throws = ft * fta;
            let tolerance = 1e-9 * (1.0 + twos + threes + free_throws);
            prop_assert!((b.points_from_twos - twos).abs() <= tolerance);
            prop_assert!((b.points_from_threes - threes).abs() <= tolerance);
            prop_assert!((b.points_from_free_throws - free_throws).abs() <= tolerance);
            prop_assert!((b.total_points - (twos + threes + free_throws)).abs() <= tolerance);
            prop_assert!((b.two_point_attempts + b.three_point_attempts - fga).abs() <= tolerance);
        }
    }
}
