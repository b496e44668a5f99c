//! Wire-level turn events.
//!
//! Field names and the `event` tag are a stable external contract; renaming
//! a variant or field here breaks every downstream consumer.

use cprovider::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TurnEvent {
    Content { text: String },
    ToolCall { id: String, name: String, arguments: Value },
    ToolResult { id: String, result: Value },
    ToolError { id: String, error: String },
    Thinking { text: String },
    Reasoning { text: String },
    Done,
    Error { message: String },
}

impl TurnEvent {
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content { text: text.into() }
    }

    pub fn tool_call(call: &ToolCall) -> Self {
        Self::ToolCall {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        }
    }

    pub fn tool_result(id: impl Into<String>, result: Value) -> Self {
        Self::ToolResult {
            id: id.into(),
            result,
        }
    }

    pub fn tool_error(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::ToolError {
            id: id.into(),
            error: error.into(),
        }
    }

    pub fn thinking(text: impl Into<String>) -> Self {
        Self::Thinking { text: text.into() }
    }

    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::Reasoning { text: text.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Content { .. } => "content",
            Self::ToolCall { .. } => "tool_call",
            Self::ToolResult { .. } => "tool_result",
            Self::ToolError { .. } => "tool_error",
            Self::Thinking { .. } => "thinking",
            Self::Reasoning { .. } => "reasoning",
            Self::Done => "done",
            Self::Error { .. } => "error",
        }
    }

    /// `done` and `error` close a turn; at most one of them may appear.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn events_serialize_to_the_wire_shape() {
        let event = TurnEvent::content("hello");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"event": "content", "text": "hello"})
        );

        let event = TurnEvent::tool_call(&ToolCall {
            id: "call_1".to_string(),
            name: "get_weather".to_string(),
            arguments: json!({"city": "Lyon"}),
        });
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "tool_call",
                "id": "call_1",
                "name": "get_weather",
                "arguments": {"city": "Lyon"}
            })
        );

        let event = TurnEvent::tool_result("call_1", json!({"temp": 21}));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"event": "tool_result", "id": "call_1", "result": {"temp": 21}})
        );

        let event = TurnEvent::tool_error("call_1", "boom");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"event": "tool_error", "id": "call_1", "error": "boom"})
        );

        assert_eq!(
            serde_json::to_value(TurnEvent::thinking("hm")).unwrap(),
            json!({"event": "thinking", "text": "hm"})
        );
        assert_eq!(
            serde_json::to_value(TurnEvent::reasoning("so")).unwrap(),
            json!({"event": "reasoning", "text": "so"})
        );
        assert_eq!(
            serde_json::to_value(TurnEvent::Done).unwrap(),
            json!({"event": "done"})
        );
        assert_eq!(
            serde_json::to_value(TurnEvent::error("bad")).unwrap(),
            json!({"event": "error", "message": "bad"})
        );
    }

    #[test]
    fn events_round_trip_through_their_tag() {
        let parsed: TurnEvent =
            serde_json::from_str(r#"{"event":"content","text":"hi"}"#).unwrap();
        assert_eq!(parsed, TurnEvent::content("hi"));
        assert_eq!(parsed.name(), "content");
    }

    #[test]
    fn only_done_and_error_are_terminal() {
        assert!(TurnEvent::Done.is_terminal());
        assert!(TurnEvent::error("x").is_terminal());
        assert!(!TurnEvent::content("x").is_terminal());
        assert!(!TurnEvent::tool_error("id", "x").is_terminal());
    }
}
