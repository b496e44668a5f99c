//! The tool-calling turn loop.
//!
//! One call to [`TurnLoop::run_turn`] drives a full user turn: model call,
//! tool execution rounds, and event emission, until the model answers
//! without tool calls, the iteration budget runs out, a fatal error occurs,
//! or the consumer cancels.

use std::sync::Arc;

use ccommon::SessionId;
use cprovider::{
    AssistantMessage, Message, ModelProvider, ModelRequest, ProviderError, TokenUsage,
};
use ctooling::{ToolError, ToolExecutionContext, ToolExecutor};

use crate::{Session, TurnError, TurnEvent, TurnEventSender};

const TRUNCATION_NOTICE: &str =
    "I reached the maximum number of tool iterations without completing the request.";

/// Per-turn behavior knobs, typically sourced from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnPolicy {
    pub stream: bool,
    pub max_tool_iterations: u32,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for TurnPolicy {
    fn default() -> Self {
        Self {
            stream: false,
            max_tool_iterations: 5,
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Done,
    Truncated,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub session_id: SessionId,
    pub state: TurnState,
    pub assistant_message: Option<AssistantMessage>,
    pub iterations: u32,
    pub usage: TokenUsage,
}

/// Observability seams around the loop. All methods default to no-ops.
pub trait TurnHooks: Send + Sync {
    fn on_turn_start(&self, _session_id: &SessionId) {}

    fn on_iteration(&self, _session_id: &SessionId, _iteration: u32) {}

    fn on_tool_phase(&self, _session_id: &SessionId, _iteration: u32, _calls: usize) {}

    fn on_turn_end(&self, _session_id: &SessionId, _outcome: &TurnOutcome) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTurnHooks;

impl TurnHooks for NoopTurnHooks {}

enum Emit {
    Sent,
    Closed,
}

#[derive(Clone)]
pub struct TurnLoop {
    provider: Arc<dyn ModelProvider>,
    executor: ToolExecutor,
    model: String,
    policy: TurnPolicy,
    hooks: Arc<dyn TurnHooks>,
}

impl TurnLoop {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        executor: ToolExecutor,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            executor,
            model: model.into(),
            policy: TurnPolicy::default(),
            hooks: Arc::new(NoopTurnHooks),
        }
    }

    pub fn with_policy(mut self, policy: TurnPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn TurnHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn policy(&self) -> &TurnPolicy {
        &self.policy
    }

    /// Runs one user turn against the session. Fatal failures emit a single
    /// `error` event and come back as `Err`; cancellation ends the turn
    /// silently with a `Cancelled` outcome and no terminal event.
    pub async fn run_turn(
        &self,
        session: &mut Session,
        user_input: impl Into<String>,
        events: &TurnEventSender,
    ) -> Result<TurnOutcome, TurnError> {
        let user_input = user_input.into();
        if user_input.trim().is_empty() {
            return Err(TurnError::invalid_request("user input must not be empty"));
        }

        self.hooks.on_turn_start(session.id());
        session.append(Message::user(user_input));

        let outcome = self.drive(session, events).await;
        match &outcome {
            Ok(outcome) => self.hooks.on_turn_end(session.id(), outcome),
            Err(_) => {
                let failed = TurnOutcome {
                    session_id: session.id().clone(),
                    state: TurnState::Failed,
                    assistant_message: None,
                    iterations: 0,
                    usage: TokenUsage::default(),
                };
                self.hooks.on_turn_end(session.id(), &failed);
            }
        }
        outcome
    }

    async fn drive(
        &self,
        session: &mut Session,
        events: &TurnEventSender,
    ) -> Result<TurnOutcome, TurnError> {
        let tool_definitions = self.executor.registry().definitions();
        let context = ToolExecutionContext::new(session.id().clone());
        let mut iterations = 0_u32;
        let mut usage = TokenUsage::default();

        loop {
            iterations += 1;
            self.hooks.on_iteration(session.id(), iterations);

            if iterations > self.policy.max_tool_iterations {
                return self.truncate(session, events, iterations, usage).await;
            }

            if events.is_cancelled() {
                return Ok(self.cancelled(session, iterations, usage));
            }

            let request = self.build_request(session, tool_definitions.clone())?;
            let response = match self.provider.complete_auto(&request).await {
                Ok(response) => response,
                Err(error) => return self.fail_provider(events, error).await,
            };
            usage.add(response.usage);

            if events.is_cancelled() {
                return Ok(self.cancelled(session, iterations, usage));
            }

            let message = response.message;
            if !message.has_tool_calls() {
                return self
                    .finish(session, events, message, iterations, usage)
                    .await;
            }

            self.hooks
                .on_tool_phase(session.id(), iterations, message.tool_calls.len());
            session.append(message.clone().into_message());

            // Tool calls run strictly in model order; each call's events and
            // transcript entry land before the next call starts.
            for call in &message.tool_calls {
                // A call the registry cannot resolve is fatal before any
                // execution starts; the consumer sees only the error event.
                if !self.executor.registry().contains(&call.name) {
                    let turn_error = TurnError::from(
                        ToolError::not_found(format!("tool '{}' is not registered", call.name))
                            .with_tool_name(call.name.clone())
                            .with_tool_call_id(call.id.clone()),
                    );
                    let _ = events.emit(TurnEvent::error(turn_error.message.clone())).await;
                    return Err(turn_error);
                }

                if let Emit::Closed = self.emit(events, TurnEvent::tool_call(call)).await {
                    return Ok(self.cancelled(session, iterations, usage));
                }

                if events.is_cancelled() {
                    return Ok(self.cancelled(session, iterations, usage));
                }

                match self.executor.execute(call, &context).await {
                    Ok(result) => {
                        session.append(Message::tool(call.id.clone(), result.render()));
                        let event = TurnEvent::tool_result(call.id.clone(), result.output);
                        if let Emit::Closed = self.emit(events, event).await {
                            return Ok(self.cancelled(session, iterations, usage));
                        }
                    }
                    Err(error) => {
                        session
                            .append(Message::tool(call.id.clone(), format!("Error: {error}")));
                        let event = TurnEvent::tool_error(call.id.clone(), error.to_string());
                        if let Emit::Closed = self.emit(events, event).await {
                            return Ok(self.cancelled(session, iterations, usage));
                        }
                    }
                }
            }
        }
    }

    fn build_request(
        &self,
        session: &Session,
        tools: Vec<cprovider::ToolDefinition>,
    ) -> Result<ModelRequest, TurnError> {
        let mut builder = ModelRequest::builder(self.model.clone())
            .messages(session.history().to_vec())
            .tools(tools)
            .streaming(self.policy.stream);

        if let Some(temperature) = self.policy.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.policy.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        builder.build().map_err(TurnError::from)
    }

    async fn finish(
        &self,
        session: &mut Session,
        events: &TurnEventSender,
        message: AssistantMessage,
        iterations: u32,
        usage: TokenUsage,
    ) -> Result<TurnOutcome, TurnError> {
        session.append(message.clone().into_message());

        if let Some(reasoning) = &message.reasoning {
            if let Emit::Closed = self
                .emit(events, TurnEvent::reasoning(reasoning.clone()))
                .await
            {
                return Ok(self.cancelled(session, iterations, usage));
            }
        }

        if let Emit::Closed = self
            .emit(events, TurnEvent::content(message.content.clone()))
            .await
        {
            return Ok(self.cancelled(session, iterations, usage));
        }

        if let Emit::Closed = self.emit(events, TurnEvent::Done).await {
            return Ok(self.cancelled(session, iterations, usage));
        }

        Ok(TurnOutcome {
            session_id: session.id().clone(),
            state: TurnState::Done,
            assistant_message: Some(message),
            iterations,
            usage,
        })
    }

    async fn truncate(
        &self,
        session: &mut Session,
        events: &TurnEventSender,
        iterations: u32,
        usage: TokenUsage,
    ) -> Result<TurnOutcome, TurnError> {
        let message = AssistantMessage {
            content: TRUNCATION_NOTICE.to_string(),
            reasoning: None,
            tool_calls: Vec::new(),
        };
        session.append(message.clone().into_message());

        if let Emit::Closed = self
            .emit(events, TurnEvent::content(TRUNCATION_NOTICE))
            .await
        {
            return Ok(self.cancelled(session, iterations, usage));
        }
        if let Emit::Closed = self.emit(events, TurnEvent::Done).await {
            return Ok(self.cancelled(session, iterations, usage));
        }

        Ok(TurnOutcome {
            session_id: session.id().clone(),
            state: TurnState::Truncated,
            assistant_message: Some(message),
            iterations,
            usage,
        })
    }

    async fn fail_provider(
        &self,
        events: &TurnEventSender,
        error: ProviderError,
    ) -> Result<TurnOutcome, TurnError> {
        let turn_error = TurnError::from(error);
        let _ = events.emit(TurnEvent::error(turn_error.message.clone())).await;
        Err(turn_error)
    }

    fn cancelled(&self, session: &Session, iterations: u32, usage: TokenUsage) -> TurnOutcome {
        TurnOutcome {
            session_id: session.id().clone(),
            state: TurnState::Cancelled,
            assistant_message: None,
            iterations,
            usage,
        }
    }

    async fn emit(&self, events: &TurnEventSender, event: TurnEvent) -> Emit {
        match events.emit(event).await {
            Ok(()) => Emit::Sent,
            Err(_) => Emit::Closed,
        }
    }
}
