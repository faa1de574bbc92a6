//! Core types shared across the codebase.

mod category;
mod state;

pub use category::FileCategory;
pub use state::{is_shutdown, is_watching, set_watching, setup_shutdown_handler};
