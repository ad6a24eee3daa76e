//! The score tracker mirrored into a key-value store.

use tracing::instrument;

use crate::engine::ScoreTracker;
use crate::notices::Notice;
use crate::store::{self, KeyValueStore, StoreError};

/// Owns the tracker and writes it back after every accepted change.
///
/// Rejected operations leave both the tracker and the store untouched. An
/// accepted one writes the players document and then the settings document;
/// the two writes are independent.
#[derive(Debug)]
pub struct ScoreKeeper<S: KeyValueStore> {
    tracker: ScoreTracker,
    store: S,
}

impl<S: KeyValueStore> ScoreKeeper<S> {
    /// Rehydrates the tracker from `store`.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let state = store::load_players(&store)?;
        let settings = store::load_settings(&store)?;

        Ok(Self {
            tracker: ScoreTracker::new(state, settings),
            store,
        })
    }

    pub fn tracker(&self) -> &ScoreTracker {
        &self.tracker
    }

    pub fn into_store(self) -> S {
        self.store
    }

    #[instrument(skip(self))]
    pub fn apply_delta(&mut self, player_id: &str, delta: i32) -> Result<Vec<Notice>, StoreError> {
        let notices = self.tracker.apply_delta(player_id, delta);
        self.persist_if_changed(notices)
    }

    #[instrument(skip(self))]
    pub fn rename_player(&mut self, player_id: &str, name: &str) -> Result<Vec<Notice>, StoreError> {
        let notices = self.tracker.rename_player(player_id, name);
        self.persist_if_changed(notices)
    }

    #[instrument(skip(self))]
    pub fn add_player(&mut self, name: &str) -> Result<Vec<Notice>, StoreError> {
        let notices = self.tracker.add_player(name);
        self.persist_if_changed(notices)
    }

    #[instrument(skip(self))]
    pub fn remove_player(&mut self, player_id: &str) -> Result<Vec<Notice>, StoreError> {
        let notices = self.tracker.remove_player(player_id);
        self.persist_if_changed(notices)
    }

    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) -> Result<Vec<Notice>, StoreError> {
        let notices = self.tracker.reset_scores();
        self.persist_if_changed(notices)
    }

    #[instrument(skip(self))]
    pub fn set_max_score(&mut self, requested: i64) -> Result<Vec<Notice>, StoreError> {
        let notices = self.tracker.set_max_score(requested);
        self.persist_if_changed(notices)
    }

    /// Writes both documents unconditionally.
    pub fn save(&mut self) -> Result<(), StoreError> {
        store::save_players(&mut self.store, self.tracker.state())?;
        store::save_settings(&mut self.store, self.tracker.settings())
    }

    fn persist_if_changed(&mut self, notices: Vec<Notice>) -> Result<Vec<Notice>, StoreError> {
        if notices.iter().any(Notice::changes_state) {
            self.save()?;
        }
        Ok(notices)
    }
}
