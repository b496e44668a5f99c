//! The uniform provider contract every backend adapter implements.

use std::future::Future;
use std::pin::Pin;

use futures_util::StreamExt;

use crate::{BoxedDeltaStream, ModelRequest, ModelResponse, ProviderError, ResponseAccumulator};

pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// A model backend. Implementations must produce structurally equivalent
/// responses from `complete` and a drained `stream` for the same request, so
/// callers can switch modes without behavioral drift.
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> crate::ProviderId;

    /// Issues a non-streaming completion.
    fn complete<'a>(&'a self, request: &'a ModelRequest) -> ProviderFuture<'a, ModelResponse>;

    /// Issues a streaming completion, yielding deltas as they arrive.
    fn stream<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> ProviderFuture<'a, BoxedDeltaStream<'a>>;

    /// Completes the request in whichever mode `request.options.stream`
    /// selects, always returning a fully aggregated response. Streamed
    /// deltas are folded through a [`ResponseAccumulator`] so both paths
    /// produce the same shape.
    fn complete_auto<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> ProviderFuture<'a, ModelResponse> {
        if !request.options.stream {
            return self.complete(request);
        }
        Box::pin(async move {
            let mut deltas = self.stream(request).await?;
            let mut accumulator = ResponseAccumulator::new();
            while let Some(delta) = deltas.next().await {
                accumulator.push(delta?);
            }
            accumulator.finish(self.id(), &request.model)
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        AssistantMessage, Delta, Message, ModelRequest, ProviderId, StopReason, TokenUsage,
        ToolCallFragment, VecDeltaStream,
    };

    use super::*;

    struct ScriptedProvider;

    impl ModelProvider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            ProviderId::OpenAi
        }

        fn complete<'a>(
            &'a self,
            request: &'a ModelRequest,
        ) -> ProviderFuture<'a, ModelResponse> {
            let response = ModelResponse {
                provider: ProviderId::OpenAi,
                model: request.model.clone(),
                message: AssistantMessage {
                    content: "direct".into(),
                    reasoning: None,
                    tool_calls: Vec::new(),
                },
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            };
            Box::pin(async move { Ok(response) })
        }

        fn stream<'a>(
            &'a self,
            _request: &'a ModelRequest,
        ) -> ProviderFuture<'a, BoxedDeltaStream<'a>> {
            Box::pin(async move {
                let stream = VecDeltaStream::new(vec![
                    Ok(Delta::Content("str".into())),
                    Ok(Delta::Content("eamed".into())),
                    Ok(Delta::ToolCall(
                        ToolCallFragment::new(0)
                            .with_id("call_1")
                            .with_name("echo")
                            .with_arguments("{\"text\":\"hi\"}"),
                    )),
                ]);
                Ok(Box::pin(stream) as BoxedDeltaStream<'a>)
            })
        }
    }

    #[tokio::test]
    async fn complete_auto_uses_direct_path_when_streaming_disabled() {
        let provider = ScriptedProvider;
        let request = ModelRequest::new("gpt-4o", vec![Message::user("hi")]);

        let response = provider.complete_auto(&request).await.unwrap();
        assert_eq!(response.message.content, "direct");
    }

    #[tokio::test]
    async fn complete_auto_aggregates_streamed_deltas() {
        let provider = ScriptedProvider;
        let request =
            ModelRequest::new("gpt-4o", vec![Message::user("hi")]).enable_streaming();

        let response = provider.complete_auto(&request).await.unwrap();
        assert_eq!(response.message.content, "streamed");
        assert_eq!(response.message.tool_calls.len(), 1);
        assert_eq!(response.message.tool_calls[0].arguments, json!({"text": "hi"}));
        assert_eq!(response.stop_reason, StopReason::ToolUse);
    }
}
