//! Backend adapters and the settings-driven provider factory.

use std::sync::Arc;
use std::time::Duration;

use crate::{ModelProvider, ProviderError, ProviderId};

#[cfg(feature = "provider-openai")]
pub mod openai;
#[cfg(feature = "provider-qwen")]
pub mod qwen;

/// Connection settings shared by every adapter. `base_url` of `None` selects
/// the backend's default endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub call_timeout: Duration,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            call_timeout: Duration::from_secs(60),
        }
    }
}

impl AdapterSettings {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}

/// Builds the provider for `id` against its HTTP backend.
pub fn build_provider(
    id: ProviderId,
    settings: &AdapterSettings,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    match id {
        #[cfg(feature = "provider-openai")]
        ProviderId::OpenAi => Ok(Arc::new(openai::OpenAiProvider::http(settings)?)),
        #[cfg(feature = "provider-qwen")]
        ProviderId::Qwen => Ok(Arc::new(qwen::QwenProvider::http(settings)?)),
        #[allow(unreachable_patterns)]
        other => Err(ProviderError::invalid_request(format!(
            "provider '{other}' is not enabled in this build"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_provider_selects_backend_by_id() {
        let settings = AdapterSettings::default().with_api_key("sk-test");

        let openai = build_provider(ProviderId::OpenAi, &settings).expect("openai builds");
        assert_eq!(openai.id(), ProviderId::OpenAi);

        let qwen = build_provider(ProviderId::Qwen, &settings).expect("qwen builds");
        assert_eq!(qwen.id(), ProviderId::Qwen);
    }
}
