//! Layered configuration loading for the confab runtime.
//!
//! Configuration is assembled from up to three TOML files in a directory,
//! deep-merged in order: `config.toml`, then `config.{env}.toml` (the `env`
//! name comes from the `APP_ENV` environment variable, default `dev`), then
//! `config.local.toml`. String values may reference environment variables
//! with `${VAR}` syntax, expanded after merging.

mod error;
mod loader;
mod model;

pub use error::{ConfigError, ConfigErrorKind};
pub use loader::{current_env, deep_merge, expand_env, load_config, load_config_str};
pub use model::{AppConfig, ProviderSettings, ToolsSettings, TurnSettings};
