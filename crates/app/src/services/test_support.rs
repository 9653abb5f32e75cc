//! Scriptable in-memory transport shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use hoo_domain::error::DeviceError;

use crate::ports::{BridgeRequest, BridgeTransport};

#[derive(Default)]
struct Script {
    bodies: HashMap<String, String>,
    failing: Vec<String>,
    fail_all: bool,
    sent: Vec<String>,
}

/// Answers by request path; records every request it receives.
///
/// Unscripted paths answer with an empty body.
#[derive(Clone, Default)]
pub(crate) struct StubTransport {
    script: Arc<Mutex<Script>>,
}

impl StubTransport {
    pub(crate) fn respond(self, path: &str, body: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .bodies
            .insert(path.to_string(), body.into());
        self
    }

    pub(crate) fn fail(self, path: &str) -> Self {
        self.script.lock().unwrap().failing.push(path.to_string());
        self
    }

    pub(crate) fn failing() -> Self {
        let stub = Self::default();
        stub.script.lock().unwrap().fail_all = true;
        stub
    }

    pub(crate) fn set_body(&self, path: &str, body: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .bodies
            .insert(path.to_string(), body.into());
    }

    pub(crate) fn set_fail_all(&self, fail_all: bool) {
        self.script.lock().unwrap().fail_all = fail_all;
    }

    /// Every request received so far, as `path?query`.
    pub(crate) fn sent(&self) -> Vec<String> {
        self.script.lock().unwrap().sent.clone()
    }
}

impl BridgeTransport for StubTransport {
    fn send(
        &self,
        request: &BridgeRequest,
    ) -> impl Future<Output = Result<String, DeviceError>> + Send {
        let path = request.path();
        let mut script = self.script.lock().unwrap();
        script.sent.push(request.path_and_query());
        let result = if script.fail_all || script.failing.contains(&path) {
            Err(DeviceError::transport("stub transport failure"))
        } else {
            Ok(script.bodies.get(&path).cloned().unwrap_or_default())
        };
        async move { result }
    }
}
