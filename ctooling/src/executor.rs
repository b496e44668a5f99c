//! Registry-backed tool executor with argument validation and timeouts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use cprovider::ToolCall;
use futures_timer::Delay;
use futures_util::future::{Either, select};

use crate::{
    NoopToolRuntimeHooks, ToolError, ToolExecutionContext, ToolExecutionResult, ToolFuture,
    ToolRegistry, ToolRuntimeHooks, schema,
};

const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs tool calls against a shared registry. Every failure mode comes back
/// as a classified [`ToolError`]; the executor never panics on tool input.
#[derive(Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    timeout: Duration,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            timeout: DEFAULT_EXECUTION_TIMEOUT,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    /// Resolves, validates and runs a single tool call: defaults are filled
    /// from the declared schema, arguments validated, then the invocation is
    /// raced against the execution timeout.
    pub fn execute<'a>(
        &'a self,
        tool_call: &'a ToolCall,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            let started = Instant::now();
            self.hooks.on_execution_start(tool_call, context);

            let outcome = self.run(tool_call, context).await.map_err(|error| {
                error
                    .with_tool_name(tool_call.name.clone())
                    .with_tool_call_id(tool_call.id.clone())
            });

            match &outcome {
                Ok(result) => {
                    self.hooks
                        .on_execution_success(tool_call, context, result, started.elapsed());
                }
                Err(error) => {
                    self.hooks
                        .on_execution_failure(tool_call, context, error, started.elapsed());
                }
            }

            outcome
        })
    }

    async fn run(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
    ) -> Result<ToolExecutionResult, ToolError> {
        let tool = self.registry.get(&tool_call.name).ok_or_else(|| {
            ToolError::not_found(format!("tool '{}' is not registered", tool_call.name))
        })?;

        let definition = tool.definition();
        let mut args = tool_call.arguments.clone();
        schema::fill_defaults(&definition.parameters, &mut args);
        schema::validate_arguments(&tool_call.name, &definition.parameters, &args)?;

        let invocation = tool.invoke(&args, context);
        let output = match select(invocation, Delay::new(self.timeout)).await {
            Either::Left((output, _)) => output?,
            Either::Right(((), _)) => {
                return Err(ToolError::timeout(format!(
                    "tool '{}' exceeded {:?}",
                    tool_call.name, self.timeout
                )));
            }
        };

        Ok(ToolExecutionResult::from_call(tool_call, output))
    }
}
