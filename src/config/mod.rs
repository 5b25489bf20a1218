//! Configuration module for Sprachheld.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the completion
//! endpoint and the tutoring session, `AppPaths` for cross-platform config
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, LlmConfig, TutorConfig, API_KEY_ENV};
