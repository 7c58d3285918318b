//! Defense-vs-position table

use std::collections::HashMap;

use crate::projection::DefenseFactors;
use super::team::normalize_team;

/// Normalized form of a position label
pub fn normalize_position(position: &str) -> String {
    position.trim().to_uppercase()
}

/// Attempt multipliers keyed by (team, position)
#[derive(Debug, Clone, Default)]
pub struct DefenseTable {
    factors: HashMap<(String, String), DefenseFactors>,
}

impl DefenseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the factors for a team/position pair
    pub fn insert(&mut self, team: &str, position: &str, factors: DefenseFactors) {
        self.factors
            .insert((normalize_team(team), normalize_position(position)), factors);
    }

    /// Factors for the pair, if the table has a row for it
    pub fn get(&self, team: &str, position: &str) -> Option<DefenseFactors> {
        self.factors
            .get(&(normalize_team(team), normalize_position(position)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = DefenseTable::new();
        table.insert("bos", "pg", DefenseFactors { fga_factor: 1.04, fta_factor: 0.97 });

        let found = table.get("BOS", " PG").unwrap();
        assert_eq!(found.fga_factor, 1.04);
        assert_eq!(found.fta_factor, 0.97);
        assert!(table.get("BOS", "C").is_none());
        assert!(table.get("MIA", "PG").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = DefenseTable::new();
        table.insert("LAL", "C", DefenseFactors { fga_factor: 1.1, fta_factor: 1.1 });
        table.insert("lal", "c", DefenseFactors { fga_factor: 0.9, fta_factor: 0.8 });
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("LAL", "C").unwrap().fga_factor, 0.9);
    }
}
