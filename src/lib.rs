//! Snake on a square grid with a persisted top-10 leaderboard.
//!
//! The game core (`game`, `grid`, `leaderboard`) only sees the outside world
//! through the traits in `capabilities` and `store`, and draws through the
//! `Canvas` trait in `render`. The terminal front end lives in `main.rs`.

pub mod capabilities;
pub mod config;
pub mod game;
pub mod grid;
pub mod input;
pub mod leaderboard;
pub mod render;
pub mod store;
pub mod ticker;
