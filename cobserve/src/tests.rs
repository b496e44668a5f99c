use std::sync::{Arc, Mutex};
use std::time::Duration;

use ccommon::SessionId;
use cchat::{TurnHooks, TurnOutcome, TurnState};
use cprovider::{ProviderError, ProviderId, ProviderOperationHooks, TokenUsage, ToolCall};
use ctooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};
use serde_json::json;

use crate::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeToolHooks, SafeTurnHooks,
    TracingObservabilityHooks,
};

fn sample_tool_call() -> ToolCall {
    ToolCall {
        id: "call-1".to_string(),
        name: "echo".to_string(),
        arguments: json!({}),
    }
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::new("session-1").with_trace_id("trace-1")
}

fn sample_outcome(state: TurnState) -> TurnOutcome {
    TurnOutcome {
        session_id: SessionId::from("session-1"),
        state,
        assistant_message: None,
        iterations: 2,
        usage: TokenUsage::default(),
    }
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingObservabilityHooks;
    let provider_error = ProviderError::timeout("provider timeout");
    let tool_error = ToolError::execution("tool failed");

    hooks.on_attempt_start(ProviderId::OpenAi, "chat.complete", 1);
    hooks.on_retry_scheduled(
        ProviderId::OpenAi,
        "chat.complete",
        1,
        Duration::from_millis(10),
        &provider_error,
    );
    hooks.on_success(ProviderId::OpenAi, "chat.complete", 2);
    hooks.on_failure(ProviderId::OpenAi, "chat.complete", 2, &provider_error);

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::new("call-1", json!("ok")),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(20),
    );

    let session_id = SessionId::from("session-1");
    hooks.on_turn_start(&session_id);
    hooks.on_iteration(&session_id, 1);
    hooks.on_tool_phase(&session_id, 1, 2);
    hooks.on_turn_end(&session_id, &sample_outcome(TurnState::Done));
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    let hooks = MetricsObservabilityHooks;
    let provider_error = ProviderError::timeout("provider timeout");
    let tool_error = ToolError::execution("tool failed");

    hooks.on_attempt_start(ProviderId::OpenAi, "chat.complete", 1);
    hooks.on_retry_scheduled(
        ProviderId::OpenAi,
        "chat.complete",
        1,
        Duration::from_millis(10),
        &provider_error,
    );
    hooks.on_success(ProviderId::OpenAi, "chat.complete", 2);
    hooks.on_failure(ProviderId::OpenAi, "chat.complete", 2, &provider_error);

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::new("call-1", json!("ok")),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(20),
    );

    let session_id = SessionId::from("session-1");
    hooks.on_turn_start(&session_id);
    hooks.on_iteration(&session_id, 1);
    hooks.on_tool_phase(&session_id, 1, 2);
    hooks.on_turn_end(&session_id, &sample_outcome(TurnState::Truncated));
}

#[derive(Default, Clone)]
struct RecordingProviderHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ProviderOperationHooks for RecordingProviderHooks {
    fn on_attempt_start(&self, _provider: ProviderId, _operation: &str, _attempt: u32) {
        self.events
            .lock()
            .expect("events lock")
            .push("attempt_start");
    }

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push("retry_scheduled");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {
        self.events.lock().expect("events lock").push("success");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
        self.events.lock().expect("events lock").push("failure");
    }
}

#[derive(Default, Clone)]
struct RecordingTurnHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl TurnHooks for RecordingTurnHooks {
    fn on_turn_start(&self, _session_id: &SessionId) {
        self.events.lock().expect("events lock").push("turn_start");
    }

    fn on_iteration(&self, _session_id: &SessionId, _iteration: u32) {
        self.events.lock().expect("events lock").push("iteration");
    }

    fn on_tool_phase(&self, _session_id: &SessionId, _iteration: u32, _calls: usize) {
        self.events.lock().expect("events lock").push("tool_phase");
    }

    fn on_turn_end(&self, _session_id: &SessionId, _outcome: &TurnOutcome) {
        self.events.lock().expect("events lock").push("turn_end");
    }
}

struct PanicProviderHooks;

impl ProviderOperationHooks for PanicProviderHooks {
    fn on_attempt_start(&self, _provider: ProviderId, _operation: &str, _attempt: u32) {
        panic!("start panic");
    }

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
        panic!("retry panic");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {
        panic!("success panic");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
        panic!("failure panic");
    }
}

struct PanicToolHooks;

impl ToolRuntimeHooks for PanicToolHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        panic!("start panic");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        panic!("success panic");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        panic!("failure panic");
    }
}

struct PanicTurnHooks;

impl TurnHooks for PanicTurnHooks {
    fn on_turn_start(&self, _session_id: &SessionId) {
        panic!("start panic");
    }

    fn on_iteration(&self, _session_id: &SessionId, _iteration: u32) {
        panic!("iteration panic");
    }

    fn on_tool_phase(&self, _session_id: &SessionId, _iteration: u32, _calls: usize) {
        panic!("tool phase panic");
    }

    fn on_turn_end(&self, _session_id: &SessionId, _outcome: &TurnOutcome) {
        panic!("end panic");
    }
}

#[test]
fn safe_provider_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingProviderHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeProviderHooks::new(inner);
    let provider_error = ProviderError::timeout("provider timeout");

    hooks.on_attempt_start(ProviderId::OpenAi, "chat.complete", 1);
    hooks.on_retry_scheduled(
        ProviderId::OpenAi,
        "chat.complete",
        1,
        Duration::from_millis(10),
        &provider_error,
    );
    hooks.on_success(ProviderId::OpenAi, "chat.complete", 2);
    hooks.on_failure(ProviderId::OpenAi, "chat.complete", 2, &provider_error);

    assert_eq!(events.lock().expect("events lock").len(), 4);
}

#[test]
fn safe_turn_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingTurnHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeTurnHooks::new(inner);
    let session_id = SessionId::from("session-1");

    hooks.on_turn_start(&session_id);
    hooks.on_iteration(&session_id, 1);
    hooks.on_tool_phase(&session_id, 1, 3);
    hooks.on_turn_end(&session_id, &sample_outcome(TurnState::Done));

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["turn_start", "iteration", "tool_phase", "turn_end"]
    );
}

#[test]
fn safe_provider_hooks_swallow_panics() {
    let hooks = SafeProviderHooks::new(PanicProviderHooks);
    let provider_error = ProviderError::timeout("provider timeout");

    hooks.on_attempt_start(ProviderId::OpenAi, "chat.complete", 1);
    hooks.on_retry_scheduled(
        ProviderId::OpenAi,
        "chat.complete",
        1,
        Duration::from_millis(10),
        &provider_error,
    );
    hooks.on_success(ProviderId::OpenAi, "chat.complete", 2);
    hooks.on_failure(ProviderId::OpenAi, "chat.complete", 2, &provider_error);
}

#[test]
fn safe_tool_hooks_swallow_panics() {
    let hooks = SafeToolHooks::new(PanicToolHooks);
    let tool_error = ToolError::execution("tool failed");

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::new("call-1", json!("ok")),
        Duration::from_millis(20),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(20),
    );
}

#[test]
fn safe_turn_hooks_swallow_panics() {
    let hooks = SafeTurnHooks::new(PanicTurnHooks);
    let session_id = SessionId::from("session-1");

    hooks.on_turn_start(&session_id);
    hooks.on_iteration(&session_id, 1);
    hooks.on_tool_phase(&session_id, 1, 3);
    hooks.on_turn_end(&session_id, &sample_outcome(TurnState::Cancelled));
}
