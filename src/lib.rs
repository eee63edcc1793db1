//! # Pitpool - Fantasy Motorsport Prediction Pool
//!
//! A season-long prediction pool over a third-party race data feed:
//! participants pick a driver before each race and scores accrue from
//! finishing position once results are published.
//!
//! ## Architecture
//!
//! - **App**: orchestrates user actions against the feed and the store
//! - **Feed**: resilient API access layer with rate-limit backoff
//! - **Clock**: classifies the season as in-progress / upcoming / idle
//! - **Scoring**: pure points calculation from results and picks
//! - **Pool**: participants, picks, settlement guard, JSON persistence
//! - **Config**: configuration management

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod feed;
pub mod pool;
pub mod scoring;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
