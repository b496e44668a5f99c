//! Qwen adapter over DashScope's OpenAI-compatible endpoint.
//!
//! Qwen speaks the same chat-completions wire format, so this is a thin
//! preset over [`OpenAiProvider`] with the DashScope base URL and the Qwen
//! provider tag. Qwen models surface chain-of-thought in the
//! `reasoning_content` field, which the shared wire layer already maps.

use std::sync::Arc;

use crate::adapters::AdapterSettings;
use crate::adapters::openai::{OpenAiHttpTransport, OpenAiProvider, OpenAiTransport};
use crate::{
    BoxedDeltaStream, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
    ProviderId,
};

pub const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

#[derive(Clone)]
pub struct QwenProvider {
    inner: OpenAiProvider,
}

impl QwenProvider {
    pub fn new(transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            inner: OpenAiProvider::new(transport).with_provider_id(ProviderId::Qwen),
        }
    }

    pub fn http(settings: &AdapterSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(settings.call_timeout)
            .build()
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        let base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| DASHSCOPE_BASE_URL.to_string());
        let transport = OpenAiHttpTransport::new(client).with_base_url(base_url);

        let mut provider = Self::new(Arc::new(transport));
        if let Some(api_key) = &settings.api_key {
            provider.inner = provider.inner.with_api_key(api_key);
        }
        Ok(provider)
    }
}

impl ModelProvider for QwenProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Qwen
    }

    fn complete<'a>(&'a self, request: &'a ModelRequest) -> ProviderFuture<'a, ModelResponse> {
        self.inner.complete(request)
    }

    fn stream<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> ProviderFuture<'a, BoxedDeltaStream<'a>> {
        self.inner.stream(request)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::adapters::openai::{
        OpenAiAssistantMessage, OpenAiAuth, OpenAiChunkStream, OpenAiFinishReason, OpenAiRequest,
        OpenAiResponse, OpenAiUsage,
    };
    use crate::{Message, StopReason};

    use super::*;

    #[derive(Default)]
    struct FakeTransport {
        calls: Mutex<u32>,
    }

    impl OpenAiTransport for FakeTransport {
        fn complete<'a>(
            &'a self,
            _request: OpenAiRequest,
            _auth: OpenAiAuth,
        ) -> ProviderFuture<'a, OpenAiResponse> {
            Box::pin(async move {
                *self.calls.lock().expect("calls lock") += 1;
                Ok(OpenAiResponse {
                    model: "qwen-plus".to_string(),
                    message: OpenAiAssistantMessage {
                        content: "ni hao".to_string(),
                        reasoning: Some("greeting".to_string()),
                        tool_calls: Vec::new(),
                    },
                    finish_reason: OpenAiFinishReason::Stop,
                    usage: OpenAiUsage::default(),
                })
            })
        }

        fn stream<'a>(
            &'a self,
            _request: OpenAiRequest,
            _auth: OpenAiAuth,
        ) -> ProviderFuture<'a, OpenAiChunkStream<'a>> {
            Box::pin(async move {
                Ok(Box::pin(futures_util::stream::empty()) as OpenAiChunkStream<'a>)
            })
        }
    }

    #[tokio::test]
    async fn responses_are_tagged_with_the_qwen_provider() {
        let transport = Arc::new(FakeTransport::default());
        let provider = QwenProvider {
            inner: OpenAiProvider::new(transport.clone())
                .with_provider_id(ProviderId::Qwen)
                .with_api_key("sk-qwen"),
        };
        let request = ModelRequest::new("qwen-plus", vec![Message::user("hello")]);

        let response = provider.complete(&request).await.expect("completion succeeds");
        assert_eq!(provider.id(), ProviderId::Qwen);
        assert_eq!(response.provider, ProviderId::Qwen);
        assert_eq!(response.message.reasoning.as_deref(), Some("greeting"));
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(*transport.calls.lock().expect("calls lock"), 1);
    }
}
