//! Common test support utilities and fixtures

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use ghpr_http::HttpTransport;
use ghpr_http::header::HeaderMap;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

/// A request captured by [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub json: Value,
}

/// Response handed back by [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct FakeResponse {
    pub status: u16,
    pub body: Value,
}

/// Transport that records every POST instead of sending it
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    response: FakeResponse,
    fail_with: Option<String>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::responding(201, serde_json::json!({"number": 1}))
    }

    pub fn responding(status: u16, body: Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: FakeResponse { status, body },
            fail_with: None,
        }
    }

    /// A transport whose every call fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    type Response = FakeResponse;

    async fn post(&self, url: &str, headers: HeaderMap, json: &Value) -> Result<FakeResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers,
            json: json.clone(),
        });

        match &self.fail_with {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

/// Result of running the CLI binary
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run the ghpr binary with given arguments inside `cwd`
///
/// `GHPR_SECRET_*` variables from the test environment are not passed on.
pub fn run_cli(args: &[&str], cwd: &Path, envs: &[(&str, &str)]) -> CliOutput {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ghpr"));
    cmd.args(args).current_dir(cwd);

    for (key, _) in std::env::vars().filter(|(k, _)| k.starts_with("GHPR_SECRET_")) {
        cmd.env_remove(key);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("Failed to execute ghpr");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
