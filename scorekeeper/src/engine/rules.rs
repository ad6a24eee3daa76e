// Scoring rules for a Scala 40 table

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

pub const DEFAULT_MAX_SCORE: u32 = 150;
pub const MAX_SCORE_RANGE: RangeInclusive<u32> = 50..=500;

// Points below the threshold at which a player gets warned
pub const NEAR_LOSS_MARGIN: u32 = 20;

// Point buttons offered for every player
pub const SCORE_PRESETS: [i32; 6] = [-5, -1, 1, 5, 10, 20];

// Where a score sits relative to the losing threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Safe,
    NearLoss,
    Lost,
}

impl Standing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Standing::Safe => "safe",
            Standing::NearLoss => "near loss",
            Standing::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(rename = "maxScore")]
    pub max_score: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl GameSettings {
    /// Settings for a requested threshold, or `None` when it falls outside
    /// [`MAX_SCORE_RANGE`].
    pub fn with_max_score(requested: i64) -> Option<Self> {
        let max_score = u32::try_from(requested).ok()?;
        MAX_SCORE_RANGE
            .contains(&max_score)
            .then_some(Self { max_score })
    }

    pub fn has_lost(&self, score: u32) -> bool {
        score >= self.max_score
    }

    pub fn is_near_loss(&self, score: u32) -> bool {
        score >= self.max_score.saturating_sub(NEAR_LOSS_MARGIN) && score < self.max_score
    }

    pub fn standing(&self, score: u32) -> Standing {
        if self.has_lost(score) {
            Standing::Lost
        } else if self.is_near_loss(score) {
            Standing::NearLoss
        } else {
            Standing::Safe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_lost_at_and_above_threshold() {
        let settings = GameSettings::default();

        assert!(!settings.has_lost(149));
        assert!(settings.has_lost(150));
        assert!(settings.has_lost(151));
    }

    #[test]
    fn test_near_loss_window() {
        let settings = GameSettings::default();

        assert!(!settings.is_near_loss(129));
        assert!(settings.is_near_loss(130));
        assert!(settings.is_near_loss(149));
        // Past the threshold is a loss, not a warning
        assert!(!settings.is_near_loss(150));
    }

    #[test]
    fn test_standing() {
        let settings = GameSettings { max_score: 100 };

        assert_eq!(settings.standing(0), Standing::Safe);
        assert_eq!(settings.standing(80), Standing::NearLoss);
        assert_eq!(settings.standing(100), Standing::Lost);
    }

    #[test]
    fn test_with_max_score_range() {
        assert_eq!(
            GameSettings::with_max_score(50),
            Some(GameSettings { max_score: 50 })
        );
        assert_eq!(
            GameSettings::with_max_score(500),
            Some(GameSettings { max_score: 500 })
        );
        assert_eq!(GameSettings::with_max_score(49), None);
        assert_eq!(GameSettings::with_max_score(501), None);
        assert_eq!(GameSettings::with_max_score(-150), None);
        assert_eq!(GameSettings::with_max_score(0), None);
    }

    #[test]
    fn test_settings_json_layout() {
        let json = serde_json::to_string(&GameSettings::default()).unwrap();
        assert_eq!(json, r#"{"maxScore":150}"#);
    }
}
