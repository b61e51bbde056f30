//! Filesystem-backed loading of the tool configuration.
//!
//! Pure schema parsing and validation live in `domain::config`.

mod load_config;

pub use load_config::{config_path, load_config};
