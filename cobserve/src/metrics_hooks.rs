//! Metrics-based observability hooks for provider, tool runtime, and turn phases.
//!
//! ```rust
//! use cobserve::MetricsObservabilityHooks;
//! use cprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use ccommon::SessionId;
use cchat::{TurnHooks, TurnOutcome};
use cprovider::{ProviderError, ProviderId, ProviderOperationHooks};
use ctooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, provider: ProviderId, operation: &str, _attempt: u32) {
        metrics::counter!(
            "confab_provider_attempt_start_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        provider: ProviderId,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "confab_provider_retry_scheduled_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "confab_provider_retry_delay_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, provider: ProviderId, operation: &str, attempts: u32) {
        metrics::counter!(
            "confab_provider_success_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "confab_provider_attempts_per_success",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        attempts: u32,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "confab_provider_failure_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "confab_provider_attempts_per_failure",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &cprovider::ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "confab_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &cprovider::ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "confab_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "confab_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &cprovider::ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "confab_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "confab_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl TurnHooks for MetricsObservabilityHooks {
    fn on_turn_start(&self, _session_id: &SessionId) {
        metrics::counter!("confab_turn_start_total").increment(1);
    }

    fn on_iteration(&self, _session_id: &SessionId, _iteration: u32) {
        metrics::counter!("confab_turn_iteration_total").increment(1);
    }

    fn on_tool_phase(&self, _session_id: &SessionId, _iteration: u32, calls: usize) {
        metrics::counter!("confab_turn_tool_phase_total").increment(1);
        metrics::histogram!("confab_turn_tool_calls_per_phase").record(calls as f64);
    }

    fn on_turn_end(&self, _session_id: &SessionId, outcome: &TurnOutcome) {
        metrics::counter!(
            "confab_turn_end_total",
            "state" => format!("{:?}", outcome.state)
        )
        .increment(1);
        metrics::histogram!(
            "confab_turn_iterations",
            "state" => format!("{:?}", outcome.state)
        )
        .record(outcome.iterations as f64);
        metrics::counter!("confab_turn_input_tokens_total")
            .increment(outcome.usage.input_tokens as u64);
        metrics::counter!("confab_turn_output_tokens_total")
            .increment(outcome.usage.output_tokens as u64);
    }
}
