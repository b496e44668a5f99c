//! OpenAI chat-completions adapter.
//!
//! The provider speaks through an [`OpenAiTransport`] so tests can script the
//! wire layer. [`OpenAiHttpTransport`] is the real backend: JSON POSTs for
//! completions and SSE parsing for streams.

use std::fmt::Formatter;
use std::pin::Pin;
use std::sync::Arc;

use async_stream::try_stream;
use futures_core::Stream;
use futures_timer::Delay;
use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::AdapterSettings;
use crate::{
    AssistantMessage, BoxedDeltaStream, Delta, Message, ModelProvider, ModelRequest,
    ModelResponse, NoopOperationHooks, ProviderError, ProviderFuture, ProviderId,
    ProviderOperationHooks, RetryPolicy, Role, StopReason, TokenUsage, ToolCall,
    ToolCallFragment, ToolDefinition, execute_with_retry,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone)]
pub struct OpenAiProvider {
    provider: ProviderId,
    transport: Arc<dyn OpenAiTransport>,
    api_key: Option<String>,
    retry_policy: RetryPolicy,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl OpenAiProvider {
    pub fn new(transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            provider: ProviderId::OpenAi,
            transport,
            api_key: None,
            retry_policy: RetryPolicy::default(),
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    /// Builds the provider against the live HTTP backend described by
    /// `settings`.
    pub fn http(settings: &AdapterSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.call_timeout)
            .build()
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        let mut transport = OpenAiHttpTransport::new(client);
        if let Some(base_url) = &settings.base_url {
            transport = transport.with_base_url(base_url);
        }

        let mut provider = Self::new(Arc::new(transport));
        provider.api_key = settings.api_key.clone();
        Ok(provider)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Re-tags responses for wire-compatible backends that share this
    /// adapter.
    pub fn with_provider_id(mut self, provider: ProviderId) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_operation_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    fn resolve_auth(&self) -> Result<OpenAiAuth, ProviderError> {
        match &self.api_key {
            Some(key) => Ok(OpenAiAuth::bearer(key)),
            None => Err(ProviderError::authentication(format!(
                "no API key configured for provider '{}'",
                self.provider
            ))),
        }
    }

    fn build_wire_request(&self, request: &ModelRequest, stream: bool) -> OpenAiRequest {
        OpenAiRequest {
            model: request.model.clone(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            tools: request.tools.iter().map(OpenAiTool::from).collect(),
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
            stream,
        }
    }

    fn convert_response(&self, response: OpenAiResponse) -> Result<ModelResponse, ProviderError> {
        let mut tool_calls = Vec::with_capacity(response.message.tool_calls.len());
        for call in response.message.tool_calls {
            let raw = if call.arguments.is_empty() {
                "{}"
            } else {
                call.arguments.as_str()
            };
            let arguments = serde_json::from_str(raw).map_err(|err| {
                ProviderError::malformed_arguments(format!(
                    "tool call '{}' has unparseable arguments: {err}",
                    call.name
                ))
            })?;
            tool_calls.push(ToolCall {
                id: call.id,
                name: call.name,
                arguments,
            });
        }

        Ok(ModelResponse {
            provider: self.provider,
            model: response.model,
            message: AssistantMessage {
                content: response.message.content,
                reasoning: response.message.reasoning,
                tool_calls,
            },
            stop_reason: response.finish_reason.into(),
            usage: response.usage.into(),
        })
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        self.provider
    }

    fn complete<'a>(&'a self, request: &'a ModelRequest) -> ProviderFuture<'a, ModelResponse> {
        Box::pin(async move {
            request.validate()?;
            let auth = self.resolve_auth()?;
            let wire_request = self.build_wire_request(request, false);

            let response = execute_with_retry(
                self.provider,
                "chat.complete",
                &self.retry_policy,
                self.hooks.as_ref(),
                |_attempt| {
                    let wire_request = wire_request.clone();
                    let auth = auth.clone();
                    async move { self.transport.complete(wire_request, auth).await }
                },
                Delay::new,
            )
            .await?;

            self.convert_response(response)
        })
    }

    fn stream<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> ProviderFuture<'a, BoxedDeltaStream<'a>> {
        Box::pin(async move {
            request.validate()?;
            let auth = self.resolve_auth()?;
            let wire_request = self.build_wire_request(request, true);
            let chunks = self.transport.stream(wire_request, auth).await?;
            let deltas = chunks.map(|chunk| chunk.map(Delta::from));

            Ok(Box::pin(deltas) as BoxedDeltaStream<'a>)
        })
    }
}

/// Raw chunk sequence off the wire, yielded as each SSE line is parsed.
pub type OpenAiChunkStream<'a> =
    Pin<Box<dyn Stream<Item = Result<OpenAiStreamChunk, ProviderError>> + Send + 'a>>;

pub trait OpenAiTransport: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, OpenAiResponse>;

    fn stream<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, OpenAiChunkStream<'a>>;
}

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn build_api_request(request: OpenAiRequest) -> Result<OpenAiApiRequest, ProviderError> {
        if request.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "request requires at least one message",
            ));
        }

        let messages = request
            .messages
            .into_iter()
            .map(OpenAiApiMessage::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(request.tools.into_iter().map(OpenAiApiTool::from).collect())
        };

        Ok(OpenAiApiRequest {
            model: request.model,
            messages,
            tools,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: request.stream,
        })
    }

    fn map_send_error(err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::timeout(err.to_string())
        } else {
            ProviderError::transport(err.to_string())
        }
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            _ => ProviderError::transport(message),
        }
    }

    fn parse_finish_reason(value: Option<&str>) -> OpenAiFinishReason {
        match value {
            Some("stop") => OpenAiFinishReason::Stop,
            Some("length") => OpenAiFinishReason::Length,
            Some("tool_calls") => OpenAiFinishReason::ToolCalls,
            _ => OpenAiFinishReason::Other,
        }
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, OpenAiResponse> {
        Box::pin(async move {
            let api_request = Self::build_api_request(request)?;
            let url = self.endpoint("chat/completions");
            let response = self
                .client
                .post(url)
                .bearer_auth(auth.token())
                .json(&api_request)
                .send()
                .await
                .map_err(Self::map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: OpenAiApiResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::transport(err.to_string()))?;

            OpenAiResponse::try_from(parsed)
        })
    }

    fn stream<'a>(
        &'a self,
        mut request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, OpenAiChunkStream<'a>> {
        Box::pin(async move {
            request.stream = true;
            let api_request = Self::build_api_request(request)?;
            let url = self.endpoint("chat/completions");
            let response = self
                .client
                .post(url)
                .bearer_auth(auth.token())
                .json(&api_request)
                .send()
                .await
                .map_err(Self::map_send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            // Each chunk is yielded as soon as its SSE line parses; nothing
            // is held back for the end of the response.
            let stream = try_stream! {
                let mut body = response.bytes_stream();
                let mut sse_buffer = String::new();
                let mut finish_reason = None::<OpenAiFinishReason>;
                let mut done = false;

                while let Some(item) = body.next().await {
                    let bytes = item.map_err(|err| ProviderError::transport(err.to_string()))?;
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|err| ProviderError::transport(err.to_string()))?;
                    sse_buffer.push_str(text);

                    while let Some(newline_index) = sse_buffer.find('\n') {
                        let line = sse_buffer.drain(..=newline_index).collect::<String>();
                        let line = line.trim();

                        if !line.starts_with("data:") {
                            continue;
                        }

                        let payload = line.trim_start_matches("data:").trim();
                        if payload == "[DONE]" {
                            done = true;
                            break;
                        }

                        let parsed: OpenAiApiStreamResponse = serde_json::from_str(payload)
                            .map_err(|err| ProviderError::transport(err.to_string()))?;

                        let Some(choice) = parsed.choices.first() else {
                            continue;
                        };

                        if let Some(content) = &choice.delta.content {
                            if !content.is_empty() {
                                yield OpenAiStreamChunk::ContentDelta(content.clone());
                            }
                        }

                        if let Some(reasoning) = &choice.delta.reasoning_content {
                            if !reasoning.is_empty() {
                                yield OpenAiStreamChunk::ReasoningDelta(reasoning.clone());
                            }
                        }

                        if let Some(delta_calls) = &choice.delta.tool_calls {
                            for delta_call in delta_calls {
                                let mut fragment =
                                    OpenAiToolCallFragment::new(delta_call.index.unwrap_or(0));
                                fragment.id = delta_call.id.clone();
                                if let Some(function) = &delta_call.function {
                                    fragment.name = function.name.clone();
                                    fragment.arguments =
                                        function.arguments.clone().unwrap_or_default();
                                }
                                yield OpenAiStreamChunk::ToolCallDelta(fragment);
                            }
                        }

                        if choice.finish_reason.is_some() {
                            finish_reason =
                                Some(Self::parse_finish_reason(choice.finish_reason.as_deref()));
                        }
                    }

                    if done {
                        break;
                    }
                }

                if let Some(reason) = finish_reason {
                    yield OpenAiStreamChunk::Finish(reason);
                }
            };

            Ok(Box::pin(stream) as OpenAiChunkStream<'a>)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    pub tools: Vec<OpenAiTool>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiMessage {
    pub role: OpenAiRole,
    pub content: String,
    pub tool_call_id: Option<String>,
    pub tool_calls: Vec<OpenAiToolCallSpec>,
}

impl From<&Message> for OpenAiMessage {
    fn from(value: &Message) -> Self {
        Self {
            role: value.role.into(),
            content: value.content.clone(),
            tool_call_id: value.tool_call_id.clone(),
            tool_calls: value.tool_calls.iter().map(OpenAiToolCallSpec::from).collect(),
        }
    }
}

/// A fully formed tool call echoed back in assistant history, arguments as
/// the serialized JSON text the wire expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiToolCallSpec {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl From<&ToolCall> for OpenAiToolCallSpec {
    fn from(value: &ToolCall) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            arguments: value.arguments.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiRole {
    System,
    User,
    Assistant,
    Tool,
}

impl OpenAiRole {
    fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

impl From<Role> for OpenAiRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => Self::System,
            Role::User => Self::User,
            Role::Assistant => Self::Assistant,
            Role::Tool => Self::Tool,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiTool {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<&ToolDefinition> for OpenAiTool {
    fn from(value: &ToolDefinition) -> Self {
        Self {
            name: value.name.clone(),
            description: value.description.clone(),
            parameters: value.parameters.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiResponse {
    pub model: String,
    pub message: OpenAiAssistantMessage,
    pub finish_reason: OpenAiFinishReason,
    pub usage: OpenAiUsage,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenAiAssistantMessage {
    pub content: String,
    pub reasoning: Option<String>,
    pub tool_calls: Vec<OpenAiWireToolCall>,
}

/// A complete tool call as received on the wire, arguments still raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiWireToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiFinishReason {
    Stop,
    Length,
    ToolCalls,
    Other,
}

impl From<OpenAiFinishReason> for StopReason {
    fn from(value: OpenAiFinishReason) -> Self {
        match value {
            OpenAiFinishReason::Stop => Self::EndTurn,
            OpenAiFinishReason::Length => Self::MaxTokens,
            OpenAiFinishReason::ToolCalls => Self::ToolUse,
            OpenAiFinishReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<OpenAiUsage> for TokenUsage {
    fn from(value: OpenAiUsage) -> Self {
        Self {
            input_tokens: value.prompt_tokens,
            output_tokens: value.completion_tokens,
            total_tokens: value.total_tokens,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiAuth(String);

impl OpenAiAuth {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for OpenAiAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("OpenAiAuth([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenAiToolCallFragment {
    pub index: u32,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments: String,
}

impl OpenAiToolCallFragment {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpenAiStreamChunk {
    ContentDelta(String),
    ReasoningDelta(String),
    ToolCallDelta(OpenAiToolCallFragment),
    Finish(OpenAiFinishReason),
}

impl From<OpenAiStreamChunk> for Delta {
    fn from(value: OpenAiStreamChunk) -> Self {
        match value {
            OpenAiStreamChunk::ContentDelta(text) => Self::Content(text),
            OpenAiStreamChunk::ReasoningDelta(text) => Self::Reasoning(text),
            OpenAiStreamChunk::ToolCallDelta(fragment) => Self::ToolCall(ToolCallFragment {
                index: fragment.index,
                id: fragment.id,
                name: fragment.name,
                arguments: fragment.arguments,
            }),
            OpenAiStreamChunk::Finish(reason) => Self::Finished(reason.into()),
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<OpenAiApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
struct OpenAiApiErrorEnvelope {
    error: OpenAiApiError,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiError {
    message: String,
}

#[derive(Debug, Serialize)]
struct OpenAiApiRequest {
    model: String,
    messages: Vec<OpenAiApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAiApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OpenAiApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<OpenAiApiRequestToolCall>,
}

impl TryFrom<OpenAiMessage> for OpenAiApiMessage {
    type Error = ProviderError;

    fn try_from(value: OpenAiMessage) -> Result<Self, Self::Error> {
        // Tool results may legitimately be empty; the empty string still has
        // to go over the wire so the model can pair it with its call.
        if value.content.trim().is_empty()
            && value.role != OpenAiRole::Assistant
            && value.role != OpenAiRole::Tool
        {
            return Err(ProviderError::invalid_request(
                "message content must not be empty",
            ));
        }

        // An assistant turn that only carries tool calls omits content.
        let content = if value.content.is_empty() && !value.tool_calls.is_empty() {
            None
        } else {
            Some(value.content)
        };

        Ok(Self {
            role: value.role.as_str().to_string(),
            content,
            tool_call_id: value.tool_call_id,
            tool_calls: value
                .tool_calls
                .into_iter()
                .map(OpenAiApiRequestToolCall::from)
                .collect(),
        })
    }
}

#[derive(Debug, Serialize)]
struct OpenAiApiRequestToolCall {
    id: String,
    r#type: String,
    function: OpenAiApiRequestFunction,
}

impl From<OpenAiToolCallSpec> for OpenAiApiRequestToolCall {
    fn from(value: OpenAiToolCallSpec) -> Self {
        Self {
            id: value.id,
            r#type: "function".to_string(),
            function: OpenAiApiRequestFunction {
                name: value.name,
                arguments: value.arguments,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAiApiRequestFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct OpenAiApiTool {
    r#type: String,
    function: OpenAiApiFunction,
}

impl From<OpenAiTool> for OpenAiApiTool {
    fn from(value: OpenAiTool) -> Self {
        Self {
            r#type: "function".to_string(),
            function: OpenAiApiFunction {
                name: value.name,
                description: value.description,
                parameters: value.parameters,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAiApiFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiResponse {
    model: String,
    choices: Vec<OpenAiApiChoice>,
    usage: Option<OpenAiApiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiChoice {
    message: OpenAiApiAssistantMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiAssistantMessage {
    content: Option<String>,
    reasoning_content: Option<String>,
    tool_calls: Option<Vec<OpenAiApiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiToolCall {
    id: String,
    function: OpenAiApiToolFunction,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiToolFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl TryFrom<OpenAiApiResponse> for OpenAiResponse {
    type Error = ProviderError;

    fn try_from(value: OpenAiApiResponse) -> Result<Self, Self::Error> {
        let choice = value
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::transport("response did not include choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| OpenAiWireToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect::<Vec<_>>();

        let usage = value.usage.map(|usage| OpenAiUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        });

        Ok(Self {
            model: value.model,
            message: OpenAiAssistantMessage {
                content: choice.message.content.unwrap_or_default(),
                reasoning: choice.message.reasoning_content,
                tool_calls,
            },
            finish_reason: OpenAiHttpTransport::parse_finish_reason(
                choice.finish_reason.as_deref(),
            ),
            usage: usage.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiApiStreamResponse {
    choices: Vec<OpenAiApiStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiStreamChoice {
    delta: OpenAiApiStreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiStreamDelta {
    content: Option<String>,
    reasoning_content: Option<String>,
    tool_calls: Option<Vec<OpenAiApiDeltaToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiDeltaToolCall {
    index: Option<u32>,
    id: Option<String>,
    function: Option<OpenAiApiDeltaToolFunction>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiDeltaToolFunction {
    name: Option<String>,
    arguments: Option<String>,
}
