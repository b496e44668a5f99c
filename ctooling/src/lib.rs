//! Capability layer for registering, validating and executing tools.

mod builtins;
mod error;
mod executor;
mod hooks;
mod registry;
mod schema;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        FunctionTool, Tool, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
        ToolExecutor, ToolFuture, ToolRegistry,
    };
}

pub use builtins::{builtin_registry, calculator_tool, echo_tool};
pub use error::{ToolError, ToolErrorKind};
pub use executor::ToolExecutor;
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use schema::{fill_defaults, validate_arguments};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};
