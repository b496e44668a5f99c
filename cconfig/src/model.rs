//! Typed application configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::ConfigError;

fn default_provider() -> String {
    "openai".to_string()
}

fn default_call_timeout_secs() -> u64 {
    60
}

fn default_max_tool_iterations() -> u32 {
    5
}

fn default_tool_timeout_secs() -> u64 {
    30
}

/// Model-provider connection settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    #[serde(default = "default_provider")]
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

impl ProviderSettings {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// Turn-loop policy settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurnSettings {
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: u32,
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            max_tool_iterations: default_max_tool_iterations(),
        }
    }
}

/// Tool registry and executor settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsSettings {
    /// Explicit allow-list of tool names. Empty keeps every builtin tool.
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default = "default_tool_timeout_secs")]
    pub execution_timeout_secs: u64,
}

impl Default for ToolsSettings {
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            execution_timeout_secs: default_tool_timeout_secs(),
        }
    }
}

impl ToolsSettings {
    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub turn: TurnSettings,
    #[serde(default)]
    pub tools: ToolsSettings,
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Free-form key/value pairs folded into the session system message.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::invalid("provider.model must not be empty"));
        }

        if self.provider.call_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "provider.call_timeout_secs must be greater than zero",
            ));
        }

        if self.turn.max_tool_iterations == 0 {
            return Err(ConfigError::invalid(
                "turn.max_tool_iterations must be greater than zero",
            ));
        }

        if self.tools.execution_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "tools.execution_timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [provider]
            model = "gpt-4o-mini"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.provider.provider, "openai");
        assert!(!config.provider.stream);
        assert_eq!(config.provider.call_timeout_secs, 60);
        assert_eq!(config.turn.max_tool_iterations, 5);
        assert_eq!(config.tools.execution_timeout_secs, 30);
        assert!(config.tools.allow.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_iteration_budget() {
        let config: AppConfig = toml::from_str(
            r#"
            [provider]
            model = "gpt-4o-mini"

            [turn]
            max_tool_iterations = 0
            "#,
        )
        .expect("config should parse");

        let error = config.validate().expect_err("zero budget should fail");
        assert_eq!(error.kind, crate::ConfigErrorKind::Invalid);
    }

    #[test]
    fn validate_rejects_empty_model() {
        let config: AppConfig = toml::from_str(
            r#"
            [provider]
            model = "   "
            "#,
        )
        .expect("config should parse");

        assert!(config.validate().is_err());
    }
}
