//! Layered TOML loading with deep merge and `${VAR}` expansion.

use std::path::Path;

use toml::Value;

use crate::{AppConfig, ConfigError};

/// Returns the active environment name from `APP_ENV`, defaulting to `dev`.
pub fn current_env() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string())
}

/// Loads configuration from a directory, merging `config.toml`,
/// `config.{env}.toml`, and `config.local.toml` in that order. Later files
/// override earlier ones; nested tables merge recursively.
pub fn load_config(config_dir: impl AsRef<Path>, env: &str) -> Result<AppConfig, ConfigError> {
    let config_dir = config_dir.as_ref();
    let layers = [
        config_dir.join("config.toml"),
        config_dir.join(format!("config.{env}.toml")),
        config_dir.join("config.local.toml"),
    ];

    let mut merged = Value::Table(toml::map::Map::new());
    let mut found_any = false;

    for path in &layers {
        if !path.exists() {
            continue;
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::io(format!("failed to read {}: {err}", path.display())))?;
        let layer: Value = raw
            .parse()
            .map_err(|err| ConfigError::parse(format!("invalid TOML in {}: {err}", path.display())))?;
        merged = deep_merge(merged, layer);
        found_any = true;
    }

    if !found_any {
        return Err(ConfigError::io(format!(
            "no config.toml found under {}",
            config_dir.display()
        )));
    }

    finish(merged)
}

/// Parses a single TOML document, applying the same `${VAR}` expansion as
/// [`load_config`]. Useful for tests and embedded defaults.
pub fn load_config_str(raw: &str) -> Result<AppConfig, ConfigError> {
    let value: Value = raw
        .parse()
        .map_err(|err| ConfigError::parse(format!("invalid TOML: {err}")))?;
    finish(value)
}

fn finish(merged: Value) -> Result<AppConfig, ConfigError> {
    let expanded = expand_env(merged);
    let config: AppConfig = expanded
        .try_into()
        .map_err(|err| ConfigError::parse(format!("invalid configuration: {err}")))?;
    config.validate()?;
    Ok(config)
}

/// Deep-merges `override_value` into `base`; tables merge key by key, any
/// other value is replaced wholesale.
pub fn deep_merge(base: Value, override_value: Value) -> Value {
    match (base, override_value) {
        (Value::Table(mut base_table), Value::Table(override_table)) => {
            for (key, value) in override_table {
                match base_table.remove(&key) {
                    Some(existing) => {
                        base_table.insert(key, deep_merge(existing, value));
                    }
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }

            Value::Table(base_table)
        }
        (_, override_value) => override_value,
    }
}

/// Expands `${VAR}` references in every string value against the process
/// environment. Unset variables expand to the empty string.
pub fn expand_env(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(expand_env_str(&text)),
        Value::Table(table) => Value::Table(
            table
                .into_iter()
                .map(|(key, value)| (key, expand_env(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(expand_env).collect()),
        other => other,
    }
}

fn expand_env_str(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if let Ok(value) = std::env::var(name) {
                    result.push_str(&value);
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated reference, keep literally.
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}
