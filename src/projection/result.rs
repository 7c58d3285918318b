//! Rounded projection output as served to the frontend

use serde::{Deserialize, Serialize};

use super::attempts::ProjectionBreakdown;

/// Round half away from zero to `places` decimals.
///
/// Ties are judged on the shortest decimal form of `value`, not on the
/// binary product `value * 10^places`, so 1.005 rounds to 1.01.
///
/// 24.449999 -> 24.4, 24.45 -> 24.5, -1.25 -> -1.3
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    round_decimal(value.abs(), places as usize)
        .map(|magnitude| magnitude.copysign(value))
        .unwrap_or_else(|| {
            let scale = 10f64.powi(places as i32);
            (value * scale).round() / scale
        })
}

fn round_decimal(magnitude: f64, places: usize) -> Option<f64> {
    let text = magnitude.to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some(parts) => parts,
        None => return Some(magnitude),
    };
    if fraction.len() <= places {
        return Some(magnitude);
    }

    let truncated: f64 = format!("{}.{}", whole, &fraction[..places]).trim_end_matches('.').parse().ok()?;
    if fraction.as_bytes()[places] < b'5' {
        return Some(truncated);
    }
    let bumped = truncated + 10f64.powi(-(places as i32));
    format!("{:.*}", places, bumped).parse().ok()
}

/// Points by category, plus attempts and the pace multiplier that produced them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    #[serde(rename = "twoPointers")]
    pub two_pointers: f64,
    #[serde(rename = "threePointers")]
    pub three_pointers: f64,
    #[serde(rename = "freeThrows")]
    pub free_throws: f64,
    #[serde(rename = "projectedFGA")]
    pub projected_fga: f64,
    #[serde(rename = "projectedFTA")]
    pub projected_fta: f64,
    #[serde(rename = "paceAdjustment")]
    pub pace_adjustment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptsBreakdown {
    #[serde(rename = "twoPointAttempts")]
    pub two_point_attempts: f64,
    #[serde(rename = "threePointAttempts")]
    pub three_point_attempts: f64,
    #[serde(rename = "freeThrowAttempts")]
    pub free_throw_attempts: f64,
}

/// Final projection, each field rounded independently
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    #[serde(rename = "projectedPoints")]
    pub projected_points: f64,
    pub breakdown: PointsBreakdown,
    pub attempts: AttemptsBreakdown,
}

impl ProjectionResult {
    /// Round an unrounded breakdown for display
    pub fn from_breakdown(raw: &ProjectionBreakdown, points_precision: u32, pace_precision: u32) -> Self {
        let round = |v: f64| round_to(v, points_precision);
        Self {
            projected_points: round(raw.total_points),
            breakdown: PointsBreakdown {
                two_pointers: round(raw.points_from_twos),
                three_pointers: round(raw.points_from_threes),
                free_throws: round(raw.points_from_free_throws),
                projected_fga: round(raw.projected_fga),
                projected_fta: round(raw.projected_fta),
                pace_adjustment: round_to(raw.pace_adjustment, pace_precision),
            },
            attempts: AttemptsBreakdown {
                two_point_attempts: round(raw.two_point_attempts),
                three_point_attempts: round(raw.three_point_attempts),
                free_throw_attempts: round(raw.projected_fta),
            },
        }
    }
}
