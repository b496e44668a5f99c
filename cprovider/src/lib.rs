//! Uniform adapter contract over model provider backends.
//!
//! Every provider exposes the same three operations: a blocking completion,
//! an incremental delta stream, and an auto mode that picks one based on the
//! request and always returns the same response shape.

mod accumulate;
mod error;
mod model;
mod provider;
mod resilience;
mod stream;

pub mod adapters;

pub mod prelude {
    pub use crate::{
        AssistantMessage, BoxedDeltaStream, Delta, Message, ModelProvider, ModelRequest,
        ModelResponse, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
        ResponseAccumulator, Role, StopReason, TokenUsage, ToolCall, ToolCallFragment,
        ToolDefinition, VecDeltaStream,
    };
}

pub use accumulate::ResponseAccumulator;
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    AssistantMessage, Message, ModelRequest, ModelRequestBuilder, ModelResponse, ProviderId, Role,
    StopReason, TokenUsage, ToolCall, ToolDefinition,
};
pub use provider::{ModelProvider, ProviderFuture};
pub use resilience::{
    NoopOperationHooks, ProviderOperationHooks, RetryPolicy, execute_with_retry,
};
pub use stream::{BoxedDeltaStream, Delta, DeltaStream, ToolCallFragment, VecDeltaStream};
