//! HTTP API handlers for wordgrid-server

pub mod error;
pub mod health;
pub mod progress;
pub mod puzzles;
pub mod rotation;

pub use error::{not_found, ApiError};
pub use health::health_routes;
pub use progress::{get_progress, record_progress};
pub use puzzles::{get_puzzle, latest_puzzle, list_puzzles};
pub use rotation::{add_rotation_entry, current_rotation, list_rotation};
