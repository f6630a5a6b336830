//! Database models and queries

pub mod catalogs;
pub mod init;
pub mod models;
pub mod progress;
pub mod puzzles;
pub mod rotation;
pub mod users;
pub mod words;

pub use init::*;
pub use models::*;
