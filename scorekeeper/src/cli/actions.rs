//! Table actions as the command line offers them.

use crate::cli::player_ref;
use crate::engine::SCORE_PRESETS;
use crate::keeper::ScoreKeeper;
use crate::notices::Notice;
use crate::store::{KeyValueStore, StoreError};

/// Id of the referenced player, or the reference itself when nobody matches
/// so the tracker reports it as unknown.
pub fn resolve_id<S: KeyValueStore>(keeper: &ScoreKeeper<S>, reference: &str) -> String {
    player_ref::resolve(keeper.tracker().state(), reference)
        .map(|p| p.id.clone())
        .unwrap_or_else(|| reference.to_string())
}

/// Point buttons for one player. Only [`SCORE_PRESETS`] are offered unless
/// `custom` is set, and a player who has lost has no buttons at all until
/// the next reset.
pub fn score<S: KeyValueStore>(
    keeper: &mut ScoreKeeper<S>,
    reference: &str,
    delta: i32,
    custom: bool,
) -> Result<Vec<Notice>, StoreError> {
    if !custom && !SCORE_PRESETS.contains(&delta) {
        return Ok(vec![Notice::NotAPreset { delta }]);
    }

    let tracker = keeper.tracker();
    if let Some(player) = player_ref::resolve(tracker.state(), reference) {
        if tracker.has_lost(player.score) {
            return Ok(vec![Notice::AlreadyLost {
                player_id: player.id.clone(),
                name: player.name.clone(),
            }]);
        }
    }

    let id = resolve_id(keeper, reference);
    keeper.apply_delta(&id, delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{GAME_KEY, MemoryStore};

    fn stored_game(store: &MemoryStore) -> Option<String> {
        store.get(GAME_KEY).unwrap()
    }

    #[test]
    fn test_non_preset_delta_is_rejected() {
        let mut keeper = ScoreKeeper::load(MemoryStore::default()).unwrap();

        let notices = score(&mut keeper, "1", 7, false).unwrap();

        assert_eq!(notices, vec![Notice::NotAPreset { delta: 7 }]);
        assert_eq!(keeper.tracker().players()[0].score, 0);
        assert!(stored_game(&keeper.into_store()).is_none());
    }

    #[test]
    fn test_custom_accepts_any_delta() {
        let mut keeper = ScoreKeeper::load(MemoryStore::default()).unwrap();

        let notices = score(&mut keeper, "Giocatore 2", 37, true).unwrap();

        assert!(matches!(notices[0], Notice::ScoreChanged { to: 37, .. }));
        assert_eq!(keeper.tracker().players()[1].score, 37);
        assert!(stored_game(&keeper.into_store()).is_some());
    }

    #[test]
    fn test_presets_by_position() {
        let mut keeper = ScoreKeeper::load(MemoryStore::default()).unwrap();

        for delta in SCORE_PRESETS {
            score(&mut keeper, "1", delta, false).unwrap();
        }

        // -5 and -1 clamp at zero before the positive buttons
        assert_eq!(keeper.tracker().players()[0].score, 36);
    }

    #[test]
    fn test_lost_player_has_no_buttons() {
        let mut store = MemoryStore::default();
        {
            let mut keeper = ScoreKeeper::load(&mut store).unwrap();
            keeper.set_max_score(50).unwrap();
            score(&mut keeper, "1", 55, true).unwrap();
        }
        let before = stored_game(&store);

        let mut keeper = ScoreKeeper::load(&mut store).unwrap();
        for delta in [20, -5] {
            let notices = score(&mut keeper, "1", delta, false).unwrap();
            assert_eq!(
                notices,
                vec![Notice::AlreadyLost {
                    player_id: "1".to_string(),
                    name: "Giocatore 1".to_string(),
                }]
            );
        }
        assert_eq!(keeper.tracker().players()[0].score, 55);
        drop(keeper);

        assert_eq!(stored_game(&store), before);
    }

    #[test]
    fn test_player_at_threshold_has_lost() {
        let mut keeper = ScoreKeeper::load(MemoryStore::default()).unwrap();
        keeper.set_max_score(50).unwrap();
        keeper.apply_delta("2", 50).unwrap();

        let notices = score(&mut keeper, "2", -1, false).unwrap();

        assert!(matches!(notices[0], Notice::AlreadyLost { .. }));
        assert_eq!(keeper.tracker().players()[1].score, 50);
    }

    #[test]
    fn test_others_keep_playing_after_a_loss() {
        let mut keeper = ScoreKeeper::load(MemoryStore::default()).unwrap();
        keeper.apply_delta("1", 150).unwrap();

        let notices = score(&mut keeper, "2", 10, false).unwrap();

        assert!(notices[0].changes_state());
        assert_eq!(keeper.tracker().players()[1].score, 10);
    }

    #[test]
    fn test_unknown_reference() {
        let mut keeper = ScoreKeeper::load(MemoryStore::default()).unwrap();

        let notices = score(&mut keeper, "Dario", 5, false).unwrap();

        assert_eq!(
            notices,
            vec![Notice::UnknownPlayer {
                reference: "Dario".to_string()
            }]
        );
    }
}
