//! Host runtime seams.
//!
//! The host agent runtime — message state composition, LLM invocation,
//! settings storage, and the durable cache backend — is an external
//! collaborator. This module defines the traits the plugin expects the
//! host to implement, plus the small message types that cross the
//! boundary.
//!
//! # Architecture
//!
//! ```text
//! AgentRuntime        settings, state composition, structured extraction
//! CacheManager        durable keyed cache with absolute expiry
//! DeriveKeyProvider   TEE-backed key derivation (wallet::tee)
//! Action / Provider   capabilities the plugin registers with the host
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::wallet::tee::DeriveKeyProvider;

/// A message in the agent's conversation history.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    /// The user (or agent) that produced the message.
    pub user: String,
    /// The message text.
    pub text: String,
}

/// Composed conversation state handed to actions and providers.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Display name of the agent, when the host knows it.
    pub agent_name: Option<String>,
    /// Host-composed template values (recent messages, wallet info, ...).
    pub values: Value,
}

/// Payload delivered to the host through a handler callback.
#[derive(Debug, Clone)]
pub struct ActionResponse {
    /// User-facing text.
    pub text: String,
    /// Optional structured content accompanying the text.
    pub content: Option<Value>,
}

/// Callback invoked by action handlers to notify the host of an outcome.
pub type HandlerCallback = dyn Fn(ActionResponse) + Send + Sync;

/// A single turn in an action usage example.
#[derive(Debug, Clone, Copy)]
pub struct ActionExample {
    /// Speaker ("user" or "assistant").
    pub user: &'static str,
    /// Example message text.
    pub text: &'static str,
    /// Action name the turn demonstrates.
    pub action: &'static str,
}

/// A host-invocable action.
///
/// Actions carry static metadata the host uses for routing (`name`,
/// `similes`, `examples`) and a `handler` that runs one logical request
/// to completion. The handler's `bool` result tells the host whether the
/// interaction was resolved; `Err` leaves the turn in a rejected state.
#[async_trait]
pub trait Action: Send + Sync {
    /// Unique action name.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Alternative trigger phrases.
    fn similes(&self) -> &'static [&'static str];

    /// Example conversations demonstrating the action.
    fn examples(&self) -> Vec<Vec<ActionExample>> {
        Vec::new()
    }

    /// Check whether the action can run under the current configuration.
    async fn validate(&self, runtime: &dyn AgentRuntime) -> Result<bool>;

    /// Run the action against the current conversation turn.
    async fn handler(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
        options: &Value,
        callback: Option<&HandlerCallback>,
    ) -> Result<bool>;
}

/// A context provider queried by the host when composing state.
///
/// Providers are presentation-layer: failures degrade to `None` rather
/// than erroring the surrounding turn.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Produce a display string for the current turn, or `None`.
    async fn get(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<&State>,
    ) -> Option<String>;
}

/// The host agent runtime.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Stable identifier of the agent this runtime serves.
    fn agent_id(&self) -> &str;

    /// Read a named setting from host configuration/environment.
    fn get_setting(&self, key: &str) -> Option<String>;

    /// EVM chain names enabled in the agent's character configuration.
    fn configured_chains(&self) -> Vec<String> {
        Vec::new()
    }

    /// The host's durable cache backend.
    fn cache_manager(&self) -> Arc<dyn CacheManager>;

    /// TEE key-derivation provider, when the host runs one.
    fn derive_key_provider(&self) -> Option<Arc<dyn DeriveKeyProvider>> {
        None
    }

    /// Compose fresh conversation state from a message.
    async fn compose_state(&self, message: &Memory) -> Result<State>;

    /// Refresh the recent-messages portion of an existing state.
    async fn update_recent_message_state(&self, state: State) -> Result<State>;

    /// Run a structured-extraction completion against the state and a
    /// template, returning the extracted JSON object if the model
    /// produced one.
    async fn generate_object(&self, state: &State, template: &str) -> Result<Option<Value>>;
}

/// Error from a durable cache backend.
#[derive(Debug, thiserror::Error)]
#[error("Cache backend error: {source}")]
pub struct CacheError {
    #[from]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl CacheError {
    /// Create a cache error from a message.
    #[must_use]
    pub fn msg(msg: impl Into<String>) -> Self {
        let message: String = msg.into();
        Self {
            source: message.into(),
        }
    }
}

/// Durable keyed cache with absolute expiry, provided by the host.
#[async_trait]
pub trait CacheManager: Send + Sync {
    /// Read a value, if present and not expired.
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, CacheError>;

    /// Write a value that expires at the given instant.
    async fn set(
        &self,
        key: &str,
        value: &str,
        expires_at: SystemTime,
    ) -> std::result::Result<(), CacheError>;
}

/// A process-local [`CacheManager`] for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryCacheManager {
    entries: Mutex<HashMap<String, (String, SystemTime)>>,
}

impl InMemoryCacheManager {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheManager for InMemoryCacheManager {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > SystemTime::now() => {
                Ok(Some(value.clone()))
            }
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        expires_at: SystemTime,
    ) -> std::result::Result<(), CacheError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }
}
