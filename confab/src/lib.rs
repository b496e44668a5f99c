//! Unified facade over the confab workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core confab crates and provides convenience utilities
//! and macros for common setup and message-building flows.

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use cchat;
pub use ccommon;
pub use cconfig;
pub use cobserve;
pub use cprovider;
pub use ctooling;

pub use cchat::{
    CancelToken, InMemorySessionStore, NoopTurnHooks, PipelineClosed, Session, SessionStore,
    StoreFuture, TurnError, TurnErrorKind, TurnEvent, TurnEventReceiver, TurnEventSender,
    TurnHooks, TurnLoop, TurnOutcome, TurnPolicy, TurnState, turn_event_channel,
};
pub use ccommon::{BoxFuture, MetadataMap, SessionId, TraceId};
pub use cconfig::{
    AppConfig, ConfigError, ConfigErrorKind, ProviderSettings, ToolsSettings, TurnSettings,
    current_env, load_config, load_config_str,
};
pub use cobserve::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeToolHooks, SafeTurnHooks,
    TracingObservabilityHooks,
};
pub use cprovider::{
    AssistantMessage, BoxedDeltaStream, Delta, DeltaStream, Message, ModelProvider, ModelRequest,
    ModelRequestBuilder, ModelResponse, NoopOperationHooks, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderId, ProviderOperationHooks, ResponseAccumulator, RetryPolicy, Role,
    StopReason, TokenUsage, ToolCall, ToolCallFragment, ToolDefinition, VecDeltaStream,
    execute_with_retry,
};
pub use ctooling::{
    FunctionTool, NoopToolRuntimeHooks, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
    ToolExecutionResult, ToolExecutor, ToolFuture, ToolRegistry, ToolRuntimeHooks,
    builtin_registry, calculator_tool, echo_tool, fill_defaults, validate_arguments,
};

pub use runtime::{
    RuntimeBundle, adapter_settings, build_runtime, build_runtime_with_store, in_memory_store,
    provider_from_config, session_from_config, tool_executor_from_config, turn_policy_from_config,
};
pub use util::{
    assistant_message, parse_provider_id, session, system_message, tool_message, user_message,
};
