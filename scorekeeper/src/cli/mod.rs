pub mod actions;
pub mod config;
pub mod output;
pub mod player_ref;
