//! Shared test helpers for `mizan-core` integration tests.
//!
//! A scripted in-memory gateway and storage so service tests can focus on
//! behaviour instead of HTTP plumbing.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mizan_core::{ApiGateway, Backend, KeyValueStorage, SessionStore};
use mizan_domain::{ApiError, ApiRequest, HttpMethod, Result as DomainResult, Session};
use serde_json::Value;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

type Reply = Result<Value, ApiError>;

enum Step {
    Reply(Reply),
    /// Wait for the gate before replying
    Gated(Arc<Notify>, Reply),
    /// Never reply; only cancellation ends the call
    Hang,
}

/// Scripted gateway.
///
/// Each `(method, path)` has a queue of steps; the last step repeats. An
/// unscripted route answers 404 like the backend does.
#[derive(Default, Clone)]
pub struct MockGateway {
    routes: Arc<Mutex<HashMap<(HttpMethod, String), VecDeque<Arc<Step>>>>>,
    calls: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: HttpMethod, path: &str, step: Step) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Arc::new(step));
    }

    pub fn on(&self, method: HttpMethod, path: &str, reply: Reply) -> &Self {
        self.push(method, path, Step::Reply(reply));
        self
    }

    pub fn on_gated(&self, method: HttpMethod, path: &str, gate: Arc<Notify>, reply: Reply) -> &Self {
        self.push(method, path, Step::Gated(gate, reply));
        self
    }

    pub fn hang(&self, method: HttpMethod, path: &str) -> &Self {
        self.push(method, path, Step::Hang);
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// `"METHOD path"` for every call, in order.
    pub fn call_log(&self) -> Vec<String> {
        self.calls().iter().map(|r| format!("{} {}", r.method, r.path)).collect()
    }

    fn next_step(&self, method: HttpMethod, path: &str) -> Option<Arc<Step>> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ApiGateway for MockGateway {
    async fn send(&self, request: ApiRequest, cancel: &CancellationToken) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(request.clone());

        let Some(step) = self.next_step(request.method, &request.path) else {
            return Err(ApiError::http(404, None, None));
        };

        match &*step {
            Step::Reply(reply) => reply.clone(),
            Step::Gated(gate, reply) => {
                tokio::select! {
                    _ = cancel.cancelled() => Err(ApiError::cancelled()),
                    _ = gate.notified() => reply.clone(),
                }
            }
            Step::Hang => {
                cancel.cancelled().await;
                Err(ApiError::cancelled())
            }
        }
    }
}

/// Map-backed storage
#[derive(Default)]
pub struct MemoryKv {
    items: Mutex<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryKv {
    fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> DomainResult<()> {
        self.items.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DomainResult<()> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

pub fn signed_out() -> Arc<SessionStore> {
    Arc::new(SessionStore::load(Arc::new(MemoryKv::default())).unwrap())
}

pub fn signed_in(token: &str) -> Arc<SessionStore> {
    let store = signed_out();
    store.sign_in(Session::new(token, "Ali")).unwrap();
    store
}

pub fn backend(gateway: &MockGateway, session: Arc<SessionStore>) -> Backend {
    Backend::new(Arc::new(gateway.clone()), session)
}
