// Scala 40 score tracker
// Holds the players and the losing threshold and applies every table action

use tracing::{debug, info};

use crate::notices::Notice;

pub mod game_state;
pub mod rules;


pub use game_state::{GameState, Player};
pub use rules::{
    DEFAULT_MAX_SCORE, GameSettings, MAX_PLAYERS, MAX_SCORE_RANGE, MIN_PLAYERS, NEAR_LOSS_MARGIN,
    SCORE_PRESETS, Standing,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    state: GameState,
    settings: GameSettings,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(GameState::new_game(), GameSettings::default())
    }
}

impl ScoreTracker {
    pub fn new(state: GameState, settings: GameSettings) -> Self {
        Self { state, settings }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    /// Adds `delta` points to a player, never going below zero.
    pub fn apply_delta(&mut self, player_id: &str, delta: i32) -> Vec<Notice> {
        let settings = self.settings;
        let Some(player) = self.state.player_mut(player_id) else {
            return vec![unknown(player_id)];
        };

        let from = player.score;
        player.score = from.saturating_add_signed(delta);
        debug!(player = %player.id, from, to = player.score, "Score changed");

        let mut notices = vec![Notice::ScoreChanged {
            player_id: player.id.clone(),
            name: player.name.clone(),
            from,
            to: player.score,
        }];

        if settings.has_lost(player.score) {
            info!(player = %player.id, score = player.score, "Player reached the threshold");
            notices.push(Notice::Lost {
                player_id: player.id.clone(),
                name: player.name.clone(),
                score: player.score,
            });
        } else if settings.is_near_loss(player.score) {
            notices.push(Notice::NearLoss {
                player_id: player.id.clone(),
                name: player.name.clone(),
                score: player.score,
                max_score: settings.max_score,
            });
        }

        notices
    }

    pub fn rename_player(&mut self, player_id: &str, name: &str) -> Vec<Notice> {
        let name = name.trim();
        if name.is_empty() {
            return vec![Notice::EmptyName];
        }
        let Some(player) = self.state.player_mut(player_id) else {
            return vec![unknown(player_id)];
        };

        player.name = name.to_string();
        debug!(player = %player.id, new_name = name, "Player renamed");

        vec![Notice::Renamed {
            player_id: player.id.clone(),
            name: player.name.clone(),
        }]
    }

    pub fn add_player(&mut self, name: &str) -> Vec<Notice> {
        if self.state.len() >= MAX_PLAYERS {
            return vec![Notice::TooManyPlayers { max: MAX_PLAYERS }];
        }
        let name = name.trim();
        if name.is_empty() {
            return vec![Notice::EmptyName];
        }

        let player = Player::new(name);
        debug!(player = %player.id, player_name = name, "Player added");
        let notice = Notice::PlayerAdded {
            player_id: player.id.clone(),
            name: player.name.clone(),
        };
        self.state.players.push(player);

        vec![notice]
    }

    pub fn remove_player(&mut self, player_id: &str) -> Vec<Notice> {
        if self.state.len() <= MIN_PLAYERS {
            return vec![Notice::TooFewPlayers { min: MIN_PLAYERS }];
        }
        let Some(index) = self.state.position(player_id) else {
            return vec![unknown(player_id)];
        };

        let player = self.state.players.remove(index);
        debug!(player = %player.id, "Player removed");

        vec![Notice::PlayerRemoved {
            player_id: player.id,
            name: player.name,
        }]
    }

    /// Zeroes every score; names, membership and the threshold stay.
    pub fn reset_scores(&mut self) -> Vec<Notice> {
        for player in &mut self.state.players {
            player.score = 0;
        }
        debug!(players = self.state.len(), "Scores reset");

        vec![Notice::ScoresReset]
    }

    /// Changes the losing threshold. Values outside [`MAX_SCORE_RANGE`] fall
    /// back to [`DEFAULT_MAX_SCORE`].
    pub fn set_max_score(&mut self, requested: i64) -> Vec<Notice> {
        let mut notices = Vec::new();
        self.settings = match GameSettings::with_max_score(requested) {
            Some(settings) => settings,
            None => {
                notices.push(Notice::ThresholdOutOfRange {
                    requested,
                    fallback: DEFAULT_MAX_SCORE,
                });
                GameSettings::default()
            }
        };
        debug!(max_score = self.settings.max_score, "Threshold changed");

        notices.push(Notice::ThresholdChanged {
            max_score: self.settings.max_score,
        });
        notices
    }

    /// Player with the lowest score, the first one on a tie.
    ///
    /// Says nothing about losses: check [`ScoreTracker::is_game_over`] first.
    pub fn leader(&self) -> Option<&Player> {
        self.state.leader()
    }

    pub fn has_lost(&self, score: u32) -> bool {
        self.settings.has_lost(score)
    }

    pub fn is_near_loss(&self, score: u32) -> bool {
        self.settings.is_near_loss(score)
    }

    pub fn standing(&self, player: &Player) -> Standing {
        self.settings.standing(player.score)
    }

    /// Whether `player` gets the leader badge: lowest score and still in.
    pub fn is_leading(&self, player: &Player) -> bool {
        self.leader().is_some_and(|leader| leader.id == player.id) && !self.has_lost(player.score)
    }

    pub fn losers(&self) -> Vec<&Player> {
        self.state
            .players
            .iter()
            .filter(|p| self.has_lost(p.score))
            .collect()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.players.iter().any(|p| self.has_lost(p.score))
    }

    // Scoreboard in the format used by JSON output
    pub fn to_api_format(&self) -> serde_json::Value {
        serde_json::json!({
            "maxScore": self.settings.max_score,
            "gameOver": self.is_game_over(),
            "leader": self.leader().map(|p| p.id.as_str()),
            "players": self.state.players.iter().map(|player| {
                serde_json::json!({
                    "id": player.id,
                    "name": player.name,
                    "score": player.score,
                    "standing": self.standing(player),
                    "leading": self.is_leading(player),
                })
            }).collect::<Vec<_>>()
        })
    }
}

fn unknown(player_id: &str) -> Notice {
    Notice::UnknownPlayer {
        reference: player_id.to_string(),
    }
}
