//! Score keeping for Scala 40 tables of two to six players.
//!
//! Players collect penalty points; whoever reaches the losing threshold is
//! out, and the player with the lowest score leads.

pub mod cli;
pub mod engine;
pub mod keeper;
pub mod notices;
pub mod store;

pub use engine::{GameSettings, GameState, Player, ScoreTracker, Standing};
pub use keeper::ScoreKeeper;
pub use notices::{Notice, NoticeKind};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
