//! Resolving the player a command refers to.

use crate::engine::{GameState, Player};

/// Finds a player by exact id, then by 1-based position, then by name
/// (case-insensitive, first match).
pub fn resolve<'a>(state: &'a GameState, reference: &str) -> Option<&'a Player> {
    let reference = reference.trim();

    if let Some(player) = state.player(reference) {
        return Some(player);
    }

    if let Ok(position) = reference.parse::<usize>() {
        if let Some(player) = position.checked_sub(1).and_then(|i| state.players.get(i)) {
            return Some(player);
        }
    }

    state
        .players
        .iter()
        .find(|p| p.name.to_lowercase() == reference.to_lowercase())
}
