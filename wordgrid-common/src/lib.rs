//! # Wordgrid Common Library
//!
//! Persistence and query layer for the letter-grid word game:
//! - Reference catalogs (difficulty, category, word classification)
//! - Puzzle store and word catalog
//! - Rotation schedule (which puzzle is current at a given instant)
//! - Per-user progress ledger
//! - Configuration loading and puzzle file import

pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod time;

pub use error::{Error, Result};
