//! Small convenience constructors for common types.

use crate::{Message, ProviderId, Role, Session, SessionId};

pub fn system_message(content: impl Into<String>) -> Message {
    Message::new(Role::System, content)
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::new(Role::Assistant, content)
}

pub fn tool_message(tool_call_id: impl Into<String>, content: impl Into<String>) -> Message {
    Message::tool(tool_call_id, content)
}

pub fn session(id: impl Into<SessionId>) -> Session {
    Session::new(id)
}

pub fn parse_provider_id(value: &str) -> Option<ProviderId> {
    match value.trim().to_ascii_lowercase().as_str() {
        "openai" => Some(ProviderId::OpenAi),
        "qwen" | "dashscope" => Some(ProviderId::Qwen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{ProviderId, Role};

    use super::{parse_provider_id, tool_message, user_message};

    #[test]
    fn parse_provider_id_supports_aliases() {
        assert_eq!(parse_provider_id("openai"), Some(ProviderId::OpenAi));
        assert_eq!(parse_provider_id("Qwen"), Some(ProviderId::Qwen));
        assert_eq!(parse_provider_id("dashscope"), Some(ProviderId::Qwen));
        assert_eq!(parse_provider_id("unknown"), None);
    }

    #[test]
    fn message_helpers_apply_expected_defaults() {
        let message = user_message("hello");
        assert_eq!(message.role, Role::User);

        let tool = tool_message("call-1", "42");
        assert_eq!(tool.role, Role::Tool);
        assert_eq!(tool.tool_call_id.as_deref(), Some("call-1"));
    }
}
