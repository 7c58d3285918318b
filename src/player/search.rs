//! Name matching against loaded players
//!
//! Projections require an exact (case-insensitive) name so that the record
//! they run against is unambiguous. Substring matching is only used to
//! suggest names.

use super::PlayerRecord;

/// Trimmed, lower-cased form used for comparisons
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Exact case-insensitive lookup
pub fn find_player<'a>(players: &'a [PlayerRecord], name: &str) -> Option<&'a PlayerRecord> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }
    players.iter().find(|p| normalize_name(&p.name) == wanted)
}

/// Names containing `query` (case-insensitive), alphabetical, at most `limit`
pub fn search_players<'a>(players: &'a [PlayerRecord], query: &str, limit: usize) -> Vec<&'a str> {
    let needle = normalize_name(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<&str> = players
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .map(|p| p.name.as_str())
        .collect();
    matches.sort_unstable_by_key(|name| name.to_lowercase());
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::RawPlayerRates;

    fn player(name: &str) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            team: "DEN".to_string(),
            position: "C".to_string(),
            season_average: None,
            rates: RawPlayerRates::default(),
        }
    }

    fn roster() -> Vec<PlayerRecord> {
        vec![
            player("Jamal Murray"),
            player("Nikola Jokic"),
            player("Ja Morant"),
            player("Jaylen Brown"),
        ]
    }

    #[test]
    fn test_find_player_case_insensitive() {
        let players = roster();
        assert_eq!(find_player(&players, "nikola jokic").map(|p| p.name.as_str()), Some("Nikola Jokic"));
        assert_eq!(find_player(&players, "  JA MORANT ").map(|p| p.name.as_str()), Some("Ja Morant"));
    }

    #[test]
    fn test_find_player_requires_full_name() {
        let players = roster();
        assert!(find_player(&players, "Jokic").is_none());
        assert!(find_player(&players, "").is_none());
    }

    #[test]
    fn test_search_players() {
        let players = roster();
        assert_eq!(search_players(&players, "ja", 10), vec!["Ja Morant", "Jamal Murray", "Jaylen Brown"]);
        assert_eq!(search_players(&players, "JA", 2), vec!["Ja Morant", "Jamal Murray"]);
        assert!(search_players(&players, "  ", 10).is_empty());
        assert!(search_players(&players, "zzz", 10).is_empty());
    }
}
