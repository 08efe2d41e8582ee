//! Test double for the remote gateway: records every call and can be
//! scripted to fail or to assign server-side identifiers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use atelier_core::EntityId;

use crate::gateway::{GatewayError, RemoteGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(String),
    Create(String),
    Update(String, EntityId),
    Delete(String, EntityId),
    SubmitBrief(String),
}

#[derive(Debug, Clone, Copy)]
pub enum ScriptedFailure {
    Session,
    Status(u16),
    Transport,
}

impl ScriptedFailure {
    fn to_error(self) -> GatewayError {
        match self {
            Self::Session => GatewayError::SessionExpired,
            Self::Status(code) => GatewayError::Status(code),
            Self::Transport => GatewayError::Transport("connection reset".to_string()),
        }
    }
}

#[derive(Default)]
pub struct RecordingGateway {
    pub calls: Mutex<Vec<Call>>,
    /// While set, every call fails with this error.
    pub fail: Mutex<Option<ScriptedFailure>>,
    /// Canned `list` responses keyed by collection name.
    pub list_responses: Mutex<HashMap<String, Vec<Value>>>,
    /// Identifier the fake server assigns to the next created record.
    pub assign_id: Mutex<Option<String>>,
}

impl RecordingGateway {
    pub fn failing(failure: ScriptedFailure) -> Self {
        Self {
            fail: Mutex::new(Some(failure)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        match *self.fail.lock().unwrap() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteGateway for RecordingGateway {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, GatewayError> {
        self.record(Call::List(collection.to_string()))?;
        Ok(self
            .list_responses
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, mut body: Value) -> Result<Value, GatewayError> {
        self.record(Call::Create(collection.to_string()))?;
        if let Some(id) = self.assign_id.lock().unwrap().clone() {
            body["id"] = Value::String(id);
        }
        Ok(body)
    }

    async fn update(
        &self,
        collection: &str,
        id: &EntityId,
        body: Value,
    ) -> Result<Value, GatewayError> {
        self.record(Call::Update(collection.to_string(), id.clone()))?;
        Ok(body)
    }

    async fn delete(&self, collection: &str, id: &EntityId) -> Result<(), GatewayError> {
        self.record(Call::Delete(collection.to_string(), id.clone()))
    }

    async fn submit_brief(&self, token: &str, _answers: Value) -> Result<(), GatewayError> {
        self.record(Call::SubmitBrief(token.to_string()))
    }
}
