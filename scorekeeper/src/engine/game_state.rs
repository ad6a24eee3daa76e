// Player collection for a Scala 40 table

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub score: u32,
}

impl Player {
    /// A new player at score 0 with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
        }
    }
}

// Stored as `{ "players": [...] }`; a document without `players` loads empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub players: Vec<Player>,
}

impl GameState {
    /// The table a first launch starts with: two players at score 0.
    pub fn new_game() -> Self {
        Self {
            players: vec![
                Player::with_id("1", "Giocatore 1"),
                Player::with_id("2", "Giocatore 2"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Lowest score; on a tie the earlier player keeps the lead.
    pub fn leader(&self) -> Option<&Player> {
        self.players
            .iter()
            .reduce(|min, player| if player.score < min.score { player } else { min })
    }

    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.players.len());
        self.players.iter().all(|p| seen.insert(p.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_scores(scores: &[(&str, u32)]) -> GameState {
        GameState {
            players: scores
                .iter()
                .map(|(name, score)| Player {
                    id: name.to_string(),
                    name: name.to_string(),
                    score: *score,
                })
                .collect(),
        }
    }

    #[test]
    fn test_new_game_has_two_players() {
        let state = GameState::new_game();

        assert_eq!(state.len(), 2);
        assert_eq!(state.players[0].id, "1");
        assert_eq!(state.players[1].name, "Giocatore 2");
        assert!(state.players.iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_leader_is_minimum_score() {
        let state = with_scores(&[("A", 10), ("B", 10), ("C", 5)]);
        assert_eq!(state.leader().unwrap().id, "C");
    }

    #[test]
    fn test_leader_tie_goes_to_first() {
        let state = with_scores(&[("A", 10), ("B", 10)]);
        assert_eq!(state.leader().unwrap().id, "A");

        let state = with_scores(&[("A", 12), ("B", 3), ("C", 3)]);
        assert_eq!(state.leader().unwrap().id, "B");
    }

    #[test]
    fn test_leader_of_empty_collection() {
        assert!(GameState::default().leader().is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Player::new("Anna");
        let b = Player::new("Anna");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_duplicate_ids_detected() {
        let mut state = GameState::new_game();
        assert!(state.has_unique_ids());

        state.players.push(Player::with_id("1", "Copy"));
        assert!(!state.has_unique_ids());
    }

    #[test]
    fn test_missing_players_field_loads_empty() {
        let state: GameState = serde_json::from_str("{}").unwrap();
        assert!(state.is_empty());
    }
}
