//! Path and URL utilities.
//!
//! - [`fs`]: Absolute path resolution (`normalize_path`, `resolve_path`)
//! - [`route`]: Link utilities (`is_external_link`, `split_path_suffix`, `join_normalized`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, resolve_path};
