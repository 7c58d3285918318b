//! Team pace table

use serde::{Deserialize, Serialize};

/// Possessions per 48 minutes for one team, with its league rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPace {
    /// Upper-case team code
    pub team: String,

    /// Estimated possessions per 48 minutes
    pub pace: f64,

    /// 1 = fastest team in the table
    pub rank: u32,
}

/// Normalized form of a team code
pub fn normalize_team(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Assign ranks by descending pace. Equal paces keep input order.
pub fn assign_pace_ranks(teams: &mut [TeamPace]) {
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| teams[b].pace.total_cmp(&teams[a].pace));
    for (position, index) in order.into_iter().enumerate() {
        teams[index].rank = position as u32 + 1;
    }
}

/// Mean pace across the table, 0.0 when empty
pub fn league_average_pace(teams: &[TeamPace]) -> f64 {
    if teams.is_empty() {
        return 0.0;
    }
    teams.iter().map(|t| t.pace).sum::<f64>() / teams.len() as f64
}
