//! Test doubles shared by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};
use store::MemoryStore;
use tokio::sync::oneshot;

use crate::client::TaskClient;
use crate::error::TransportError;
use crate::gateway::{ApiRequest, ApiResponse, Transport};
use crate::models::{Identity, Role};
use crate::session::SessionStore;

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<ApiResponse, TransportError>>,
    requests: Vec<ApiRequest>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Transport that answers from a queue of scripted replies and records every
/// request it sees.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn respond(&self, response: ApiResponse) {
        self.script().replies.push_back(Ok(response));
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.respond(ApiResponse::new(status, body.to_string()));
    }

    pub fn fail(&self, error: TransportError) {
        self.script().replies.push_back(Err(error));
    }

    /// Hold the next request in flight until the returned sender fires.
    pub fn hold(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script().gate = Some(rx);
        tx
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script().requests.clone()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let gate = {
            let mut script = self.script();
            script.requests.push(request);
            script.gate.take()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.script()
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted reply")))
    }
}

pub fn identity(role: Role) -> Identity {
    Identity {
        id: format!("{role}-1"),
        name: "Bat".to_string(),
        email: "bat@b.com".to_string(),
        role,
        profile_image_url: None,
    }
}

/// Body of a successful login or registration.
pub fn auth_body(role: &str, token: &str) -> Value {
    json!({
        "_id": "66a1",
        "name": "Bat",
        "email": "a@b.com",
        "role": role,
        "profileImageUrl": "",
        "token": token,
    })
}

pub fn client() -> (TaskClient<MockTransport, MemoryStore>, MockTransport) {
    client_with(MemoryStore::new())
}

pub fn client_with(backing: MemoryStore) -> (TaskClient<MockTransport, MemoryStore>, MockTransport) {
    let transport = MockTransport::new();
    let session = SessionStore::open(backing, "token");
    (TaskClient::new(transport.clone(), session), transport)
}
