//! Persistence for the players and the settings.
//!
//! Both live as separate JSON documents in a key-value store, written in full
//! after every change and read back once at start. A document that cannot be
//! parsed is logged and replaced by its default.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::engine::{GameSettings, GameState};

pub const GAME_KEY: &str = "scalastop-game";
pub const SETTINGS_KEY: &str = "scalastop-settings";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize {key}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage the game state is mirrored into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: io::Error| StoreError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        // Temp file plus rename, readers never see a partial document
        let path = self.path_for(key);
        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_err(&self.dir))?;
        file.write_all(value.as_bytes()).map_err(io_err(file.path()))?;
        file.persist(&path).map_err(|err| io_err(&path)(err.error))?;

        debug!(path = %path.display(), "Stored document");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Players from the store. A fresh two-player game when nothing is stored or
/// the stored document is unusable.
pub fn load_players(store: &impl KeyValueStore) -> Result<GameState, StoreError> {
    let Some(text) = store.get(GAME_KEY)? else {
        return Ok(GameState::new_game());
    };

    match serde_json::from_str::<GameState>(&text) {
        Ok(state) if state.has_unique_ids() => Ok(state),
        Ok(_) => {
            warn!(key = GAME_KEY, "Discarding stored game with duplicate player ids");
            Ok(GameState::new_game())
        }
        Err(error) => {
            warn!(key = GAME_KEY, %error, "Discarding unreadable stored game");
            Ok(GameState::new_game())
        }
    }
}

/// Settings from the store, defaults when absent, unreadable, or holding a
/// threshold outside the accepted range.
pub fn load_settings(store: &impl KeyValueStore) -> Result<GameSettings, StoreError> {
    let Some(text) = store.get(SETTINGS_KEY)? else {
        return Ok(GameSettings::default());
    };

    match serde_json::from_str::<GameSettings>(&text) {
        Ok(settings) => Ok(GameSettings::with_max_score(i64::from(settings.max_score))
            .unwrap_or_else(|| {
                warn!(
                    key = SETTINGS_KEY,
                    max_score = settings.max_score,
                    "Stored threshold out of range, using the default"
                );
                GameSettings::default()
            })),
        Err(error) => {
            warn!(key = SETTINGS_KEY, %error, "Discarding unreadable stored settings");
            Ok(GameSettings::default())
        }
    }
}

pub fn save_players(store: &mut impl KeyValueStore, state: &GameState) -> Result<(), StoreError> {
    save_document(store, GAME_KEY, state)
}

pub fn save_settings(
    store: &mut impl KeyValueStore,
    settings: &GameSettings,
) -> Result<(), StoreError> {
    save_document(store, SETTINGS_KEY, settings)
}

fn save_document<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let text = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &text)
}
