//! Configuration section definitions.
//!
//! Each module corresponds to a section in `reactify.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `build`    | `[build]`      | Source/destination roots, entry page |
//! | `scaffold` | `[scaffold]`   | Destination project generation       |
//! | `watch`    | `[watch]`      | File watcher settings                |
//!
//! `[attributes]` is a plain string table kept on the root config.

mod build;
mod scaffold;
mod watch;

pub use build::BuildConfig;
pub use scaffold::ScaffoldConfig;
pub use watch::WatchConfig;
