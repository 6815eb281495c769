use async_trait::async_trait;
use hrportal_rs_core::{ApiRequest, Method, PortalError, Transport};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Clone)]
enum Outcome {
    Ok(Value),
    Status(u16, String),
    Unreachable,
}

#[derive(Clone)]
struct Scripted {
    outcome: Outcome,
    gate: Option<Arc<Notify>>,
}

#[derive(Default)]
struct StubState {
    routes: HashMap<(Method, String), VecDeque<Scripted>>,
    requests: Vec<ApiRequest>,
}

/// Transport answering from a script keyed by method and path.
///
/// Responses for a route are consumed in order; the last one repeats. Routes
/// without a script answer 404.
#[derive(Clone, Default)]
pub struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) -> &Self {
        self.state
            .lock()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
        self
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                outcome: Outcome::Ok(body),
                gate: None,
            },
        )
    }

    /// Respond only after `gate` is notified.
    pub fn respond_after(
        &self,
        method: Method,
        path: &str,
        body: Value,
        gate: Arc<Notify>,
    ) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                outcome: Outcome::Ok(body),
                gate: Some(gate),
            },
        )
    }

    pub fn fail(&self, method: Method, path: &str, status: u16, detail: &str) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                outcome: Outcome::Status(status, detail.to_string()),
                gate: None,
            },
        )
    }

    pub fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.push(
            method,
            path,
            Scripted {
                outcome: Outcome::Unreachable,
                gate: None,
            },
        )
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().requests.clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }

    fn next(&self, request: &ApiRequest) -> Option<Scripted> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());
        let queue = state
            .routes
            .get_mut(&(request.method, request.path.clone()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, PortalError> {
        let Some(scripted) = self.next(&request) else {
            return Err(PortalError::Status {
                status: 404,
                message: format!("no stub for {} {}", request.method.as_str(), request.path),
            });
        };
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        match scripted.outcome {
            Outcome::Ok(body) => Ok(body),
            Outcome::Status(status, message) => Err(PortalError::Status { status, message }),
            Outcome::Unreachable => Err(PortalError::Transport("connection refused".to_string())),
        }
    }
}
