//! Aggregation of streamed deltas into a complete model response.
//!
//! Tool call fragments are keyed by their response index so interleaved
//! fragments for different calls reassemble independently. Argument text is
//! collected verbatim and parsed as JSON only once the stream has ended.

use std::collections::BTreeMap;

use crate::{
    AssistantMessage, Delta, ModelResponse, ProviderError, ProviderId, StopReason, TokenUsage,
    ToolCall, ToolCallFragment,
};

#[derive(Debug, Default)]
struct PartialToolCall {
    id: Option<String>,
    name: Option<String>,
    arguments: String,
}

/// Folds a sequence of [`Delta`]s into the message a non-streaming completion
/// would have produced for the same response.
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    content: String,
    reasoning: String,
    tool_calls: BTreeMap<u32, PartialToolCall>,
    stop_reason: Option<StopReason>,
    usage: TokenUsage,
}

impl ResponseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delta: Delta) {
        match delta {
            Delta::Content(text) => self.content.push_str(&text),
            Delta::Thinking(text) | Delta::Reasoning(text) => self.reasoning.push_str(&text),
            Delta::ToolCall(fragment) => self.push_fragment(fragment),
            Delta::Finished(reason) => self.stop_reason = Some(reason),
        }
    }

    pub fn record_usage(&mut self, usage: TokenUsage) {
        self.usage.add(usage);
    }

    fn push_fragment(&mut self, fragment: ToolCallFragment) {
        let partial = self.tool_calls.entry(fragment.index).or_default();
        // Identity fields arrive once; later fragments carry arguments only.
        if partial.id.is_none() {
            partial.id = fragment.id;
        }
        if partial.name.is_none() {
            partial.name = fragment.name;
        }
        partial.arguments.push_str(&fragment.arguments);
    }

    /// Finalizes accumulation. Fails with a `MalformedArguments` error when
    /// any assembled tool call's argument text is not valid JSON.
    pub fn finish(self, provider: ProviderId, model: &str) -> Result<ModelResponse, ProviderError> {
        let mut tool_calls = Vec::with_capacity(self.tool_calls.len());
        for (index, partial) in self.tool_calls {
            let name = partial.name.unwrap_or_default();
            let raw = if partial.arguments.is_empty() {
                "{}"
            } else {
                partial.arguments.as_str()
            };
            let arguments = serde_json::from_str(raw).map_err(|err| {
                ProviderError::malformed_arguments(format!(
                    "tool call '{name}' (index {index}) has unparseable arguments: {err}"
                ))
            })?;
            tool_calls.push(ToolCall {
                id: partial
                    .id
                    .unwrap_or_else(|| format!("tool_call_{index}")),
                name,
                arguments,
            });
        }

        let stop_reason = self.stop_reason.unwrap_or(if tool_calls.is_empty() {
            StopReason::EndTurn
        } else {
            StopReason::ToolUse
        });

        Ok(ModelResponse {
            provider,
            model: model.to_string(),
            message: AssistantMessage {
                content: self.content,
                reasoning: if self.reasoning.is_empty() {
                    None
                } else {
                    Some(self.reasoning)
                },
                tool_calls,
            },
            stop_reason,
            usage: self.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn concatenates_content_and_reasoning() {
        let mut acc = ResponseAccumulator::new();
        acc.push(Delta::Reasoning("thinking ".into()));
        acc.push(Delta::Content("hel".into()));
        acc.push(Delta::Content("lo".into()));
        acc.push(Delta::Reasoning("hard".into()));
        acc.push(Delta::Finished(StopReason::EndTurn));

        let response = acc.finish(ProviderId::OpenAi, "gpt-4o").unwrap();
        assert_eq!(response.message.content, "hello");
        assert_eq!(response.message.reasoning.as_deref(), Some("thinking hard"));
        assert_eq!(response.stop_reason, StopReason::EndTurn);
    }

    #[test]
    fn reassembles_interleaved_tool_call_fragments() {
        let mut acc = ResponseAccumulator::new();
        acc.push(Delta::ToolCall(
            ToolCallFragment::new(0)
                .with_id("call_a")
                .with_name("get_weather")
                .with_arguments("{\"city\":"),
        ));
        acc.push(Delta::ToolCall(
            ToolCallFragment::new(1)
                .with_id("call_b")
                .with_name("get_time")
                .with_arguments("{}"),
        ));
        acc.push(Delta::ToolCall(
            ToolCallFragment::new(0).with_arguments("\"Lyon\"}"),
        ));

        let response = acc.finish(ProviderId::OpenAi, "gpt-4o").unwrap();
        let calls = &response.message.tool_calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "call_a");
        assert_eq!(calls[0].arguments, json!({"city": "Lyon"}));
        assert_eq!(calls[1].name, "get_time");
        assert_eq!(response.stop_reason, StopReason::ToolUse);
    }

    #[test]
    fn missing_id_gets_synthetic_index_id() {
        let mut acc = ResponseAccumulator::new();
        acc.push(Delta::ToolCall(
            ToolCallFragment::new(2)
                .with_name("echo")
                .with_arguments("{\"text\":\"hi\"}"),
        ));

        let response = acc.finish(ProviderId::Qwen, "qwen-plus").unwrap();
        assert_eq!(response.message.tool_calls[0].id, "tool_call_2");
    }

    #[test]
    fn empty_arguments_parse_as_empty_object() {
        let mut acc = ResponseAccumulator::new();
        acc.push(Delta::ToolCall(
            ToolCallFragment::new(0).with_id("call_a").with_name("ping"),
        ));

        let response = acc.finish(ProviderId::OpenAi, "gpt-4o").unwrap();
        assert_eq!(response.message.tool_calls[0].arguments, json!({}));
    }

    #[test]
    fn unparseable_arguments_fail_as_malformed() {
        let mut acc = ResponseAccumulator::new();
        acc.push(Delta::ToolCall(
            ToolCallFragment::new(0)
                .with_id("call_a")
                .with_name("get_weather")
                .with_arguments("{\"city\": "),
        ));

        let err = acc.finish(ProviderId::OpenAi, "gpt-4o").unwrap_err();
        assert_eq!(err.kind, crate::ProviderErrorKind::MalformedArguments);
        assert!(!err.retryable);
    }
}
