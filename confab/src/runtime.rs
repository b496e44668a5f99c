//! Runtime wiring helpers: configuration in, a ready-to-run turn loop out.

use std::sync::Arc;

use cconfig::{AppConfig, ProviderSettings, ToolsSettings};
use cprovider::adapters::{AdapterSettings, build_provider};

use crate::{
    InMemorySessionStore, ModelProvider, ProviderError, Session, SessionId, SessionStore,
    TurnLoop, TurnPolicy, builtin_registry,
};
use ctooling::{ToolExecutor, ToolRegistry};

use crate::util::parse_provider_id;

/// Everything an application needs to serve chat turns.
#[derive(Clone)]
pub struct RuntimeBundle {
    pub provider: Arc<dyn ModelProvider>,
    pub turn_loop: TurnLoop,
    pub store: Arc<dyn SessionStore>,
}

pub fn in_memory_store() -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new())
}

pub fn adapter_settings(settings: &ProviderSettings) -> AdapterSettings {
    let mut adapter = AdapterSettings::default().with_call_timeout(settings.call_timeout());
    if let Some(api_key) = &settings.api_key {
        adapter = adapter.with_api_key(api_key.clone());
    }
    if let Some(base_url) = &settings.base_url {
        adapter = adapter.with_base_url(base_url.clone());
    }
    adapter
}

pub fn provider_from_config(
    settings: &ProviderSettings,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let id = parse_provider_id(&settings.provider).ok_or_else(|| {
        ProviderError::invalid_request(format!("unknown provider: {}", settings.provider))
    })?;
    build_provider(id, &adapter_settings(settings))
}

pub fn tool_executor_from_config(settings: &ToolsSettings) -> ToolExecutor {
    let mut registry: ToolRegistry = builtin_registry();
    registry.apply_allow_list(&settings.allow);
    ToolExecutor::new(Arc::new(registry)).with_timeout(settings.execution_timeout())
}

pub fn turn_policy_from_config(config: &AppConfig) -> TurnPolicy {
    TurnPolicy {
        stream: config.provider.stream,
        max_tool_iterations: config.turn.max_tool_iterations,
        ..TurnPolicy::default()
    }
}

/// Opens a session carrying the configured system prompt and metadata.
pub fn session_from_config(id: impl Into<SessionId>, config: &AppConfig) -> Session {
    Session::with_system_prompt(id, config.system_prompt.as_deref(), &config.metadata)
}

pub fn build_runtime(config: &AppConfig) -> Result<RuntimeBundle, ProviderError> {
    build_runtime_with_store(config, in_memory_store())
}

pub fn build_runtime_with_store(
    config: &AppConfig,
    store: Arc<dyn SessionStore>,
) -> Result<RuntimeBundle, ProviderError> {
    let provider = provider_from_config(&config.provider)?;
    let executor = tool_executor_from_config(&config.tools);
    let turn_loop = TurnLoop::new(
        Arc::clone(&provider),
        executor,
        config.provider.model.clone(),
    )
    .with_policy(turn_policy_from_config(config));

    Ok(RuntimeBundle {
        provider,
        turn_loop,
        store,
    })
}
