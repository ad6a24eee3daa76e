use std::fmt;

use serde::{Deserialize, Serialize};

/// Notice severities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// User-facing outcome of a score tracker operation.
///
/// Rejected operations are reported through notices too; the tracker never
/// fails on bad input, it leaves the table as it was and says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    ScoreChanged {
        player_id: String,
        name: String,
        from: u32,
        to: u32,
    },
    NearLoss {
        player_id: String,
        name: String,
        score: u32,
        max_score: u32,
    },
    Lost {
        player_id: String,
        name: String,
        score: u32,
    },
    Renamed {
        player_id: String,
        name: String,
    },
    PlayerAdded {
        player_id: String,
        name: String,
    },
    PlayerRemoved {
        player_id: String,
        name: String,
    },
    ScoresReset,
    ThresholdChanged {
        max_score: u32,
    },
    ThresholdOutOfRange {
        requested: i64,
        fallback: u32,
    },
    EmptyName,
    TooManyPlayers {
        max: usize,
    },
    TooFewPlayers {
        min: usize,
    },
    UnknownPlayer {
        reference: String,
    },
    AlreadyLost {
        player_id: String,
        name: String,
    },
    NotAPreset {
        delta: i32,
    },
}

impl Notice {
    pub fn kind(&self) -> NoticeKind {
        match self {
            Notice::ScoreChanged { .. } => NoticeKind::Info,
            Notice::Renamed { .. }
            | Notice::PlayerAdded { .. }
            | Notice::PlayerRemoved { .. }
            | Notice::ScoresReset
            | Notice::ThresholdChanged { .. } => NoticeKind::Success,
            Notice::NearLoss { .. } | Notice::ThresholdOutOfRange { .. } => NoticeKind::Warning,
            Notice::Lost { .. }
            | Notice::EmptyName
            | Notice::TooManyPlayers { .. }
            | Notice::TooFewPlayers { .. }
            | Notice::UnknownPlayer { .. }
            | Notice::AlreadyLost { .. }
            | Notice::NotAPreset { .. } => NoticeKind::Error,
        }
    }

    /// Whether the notice reports a change to the players or the settings.
    pub fn changes_state(&self) -> bool {
        matches!(
            self,
            Notice::ScoreChanged { .. }
                | Notice::Renamed { .. }
                | Notice::PlayerAdded { .. }
                | Notice::PlayerRemoved { .. }
                | Notice::ScoresReset
                | Notice::ThresholdChanged { .. }
        )
    }

    pub fn message(&self) -> String {
        match self {
            Notice::ScoreChanged { name, from, to, .. } => {
                format!("{name}: {from} -> {to} points")
            }
            Notice::NearLoss {
                name,
                score,
                max_score,
                ..
            } => format!("Careful! {name} is close to losing ({score}/{max_score})"),
            Notice::Lost { name, score, .. } => {
                format!("Game over! {name} lost with {score} points")
            }
            Notice::Renamed { name, .. } => format!("Player renamed to \"{name}\""),
            Notice::PlayerAdded { name, .. } => format!("{name} joined the game"),
            Notice::PlayerRemoved { name, .. } => format!("{name} left the game"),
            Notice::ScoresReset => "All scores have been reset".to_string(),
            Notice::ThresholdChanged { max_score } => {
                format!("Players lose at {max_score} points")
            }
            Notice::ThresholdOutOfRange {
                requested,
                fallback,
            } => format!("Threshold {requested} is out of range, using {fallback}"),
            Notice::EmptyName => "Player names cannot be empty".to_string(),
            Notice::TooManyPlayers { max } => format!("A table holds at most {max} players"),
            Notice::TooFewPlayers { min } => format!("At least {min} players are needed to play"),
            Notice::UnknownPlayer { reference } => format!("No player matches \"{reference}\""),
            Notice::AlreadyLost { name, .. } => {
                format!("{name} has already lost; reset the scores to play again")
            }
            Notice::NotAPreset { delta } => format!(
                "{delta:+} is not one of the point buttons; pass --custom to add it anyway"
            ),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_do_not_change_state() {
        let rejections = [
            Notice::EmptyName,
            Notice::TooManyPlayers { max: 6 },
            Notice::TooFewPlayers { min: 2 },
            Notice::UnknownPlayer {
                reference: "x".to_string(),
            },
            Notice::NotAPreset { delta: 7 },
        ];

        for notice in rejections {
            assert_eq!(notice.kind(), NoticeKind::Error);
            assert!(!notice.changes_state());
        }
    }

    #[test]
    fn test_near_loss_is_a_warning() {
        let notice = Notice::NearLoss {
            player_id: "1".to_string(),
            name: "Anna".to_string(),
            score: 135,
            max_score: 150,
        };

        assert_eq!(notice.kind(), NoticeKind::Warning);
        assert!(!notice.changes_state());
        assert_eq!(
            notice.to_string(),
            "Careful! Anna is close to losing (135/150)"
        );
    }

    #[test]
    fn test_notice_json_is_tagged() {
        let json = serde_json::to_value(Notice::ThresholdChanged { max_score: 200 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "notice": "threshold_changed", "max_score": 200 })
        );
    }
}
