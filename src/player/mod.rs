//! Player reference records, JSON loading and name lookup

mod data;
mod search;
pub mod loader;

pub use data::PlayerRecord;
pub use search::{find_player, search_players, normalize_name};
pub use loader::{load_players, load_players_from_reader, PLAYERS_FILE};
