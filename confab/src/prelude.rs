//! Common imports for most confab applications.

pub use crate::{
    assistant_message, build_runtime, build_runtime_with_store, in_memory_store,
    parse_provider_id, session, session_from_config, system_message, tool_message, user_message,
};
pub use crate::{cf_messages, cf_msg};
pub use crate::{
    AppConfig, BoxFuture, CancelToken, InMemorySessionStore, Message, MetadataMap, ModelProvider,
    ModelRequest, ModelRequestBuilder, ProviderError, ProviderId, Role, RuntimeBundle, Session,
    SessionId, SessionStore, Tool, ToolCall, ToolDefinition, ToolError, ToolExecutionContext,
    ToolExecutionResult, ToolExecutor, ToolRegistry, TurnError, TurnEvent, TurnEventReceiver,
    TurnEventSender, TurnLoop, TurnOutcome, TurnPolicy, TurnState, turn_event_channel,
};
