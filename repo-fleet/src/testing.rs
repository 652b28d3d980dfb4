//! In-memory collaborators for unit tests.

use crate::api::{ApiError, ApiResponse, HostingApi};
use crate::git::{GitError, VersionControl};
use crate::prompt::{PromptError, Prompter};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;

/// One request seen by [`FakeApi`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) method: &'static str,
    pub(crate) route: String,
    pub(crate) body: Option<Value>,
}

enum Scripted {
    Respond(ApiResponse),
    Fail,
}

/// Hosting API answering from scripted responses keyed by method and route.
///
/// Unscripted routes answer 404. The last scripted answer for a route repeats.
#[derive(Default)]
pub(crate) struct FakeApi {
    scripted: Mutex<HashMap<(&'static str, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: &'static str, route: &str, answer: Scripted) {
        self.scripted
            .lock()
            .unwrap()
            .entry((method, route.to_string()))
            .or_default()
            .push_back(answer);
    }

    pub(crate) fn respond_get(&self, route: &str, status: u16, body: impl Into<String>) {
        self.push("GET", route, Scripted::Respond(ApiResponse::new(status, body)));
    }

    pub(crate) fn respond_post(&self, route: &str, status: u16, body: impl Into<String>) {
        self.push("POST", route, Scripted::Respond(ApiResponse::new(status, body)));
    }

    pub(crate) fn fail_get(&self, route: &str) {
        self.push("GET", route, Scripted::Fail);
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn get_count(&self) -> usize {
        self.calls().iter().filter(|c| c.method == "GET").count()
    }

    pub(crate) fn posts_to(&self, route: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == "POST" && c.route == route)
            .filter_map(|c| c.body)
            .collect()
    }

    fn answer(
        &self,
        method: &'static str,
        route: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            route: route.to_string(),
            body,
        });

        let mut scripted = self.scripted.lock().unwrap();
        let Some(queue) = scripted.get_mut(&(method, route.to_string())) else {
            return Ok(ApiResponse::new(404, r#"{"message":"Not Found"}"#));
        };
        let answer = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|a| match a {
                Scripted::Respond(response) => Scripted::Respond(response.clone()),
                Scripted::Fail => Scripted::Fail,
            })
        };
        match answer {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail) => Err(ApiError::Transport {
                route: route.to_string(),
                message: "connection reset".to_string(),
            }),
            None => Ok(ApiResponse::new(404, r#"{"message":"Not Found"}"#)),
        }
    }
}

#[async_trait]
impl HostingApi for FakeApi {
    async fn get(&self, route: &str) -> Result<ApiResponse, ApiError> {
        self.answer("GET", route, None)
    }

    async fn post(&self, route: &str, body: &Value) -> Result<ApiResponse, ApiError> {
        self.answer("POST", route, Some(body.clone()))
    }
}

/// Builds a JSON page of repositories as returned by the listing endpoint.
pub(crate) fn repo_page(owner: &str, names: &[&str]) -> String {
    let items: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "full_name": format!("{owner}/{name}"),
                "clone_url": format!("https://github.com/{owner}/{name}.git"),
                "owner": { "login": owner },
                "private": true,
            })
        })
        .collect();
    Value::Array(items).to_string()
}

/// Version control that records operations instead of running git.
///
/// Cloning creates the destination directory.
#[derive(Default)]
pub(crate) struct FakeGit {
    operations: Mutex<Vec<String>>,
    fail_on: Mutex<Option<String>>,
}

impl FakeGit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every operation whose name starts with `operation` fail.
    pub(crate) fn fail_on(&self, operation: &str) {
        *self.fail_on.lock().unwrap() = Some(operation.to_string());
    }

    pub(crate) fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, operation: String) -> Result<(), GitError> {
        let failing = self
            .fail_on
            .lock()
            .unwrap()
            .as_deref()
            .is_some_and(|prefix| operation.starts_with(prefix));
        self.operations.lock().unwrap().push(operation.clone());
        if failing {
            return Err(GitError::Failed {
                command: operation,
                stderr: "fatal: simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VersionControl for FakeGit {
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), GitError> {
        self.record(format!("clone {url}"))?;
        std::fs::create_dir_all(destination).map_err(|e| GitError::Spawn {
            command: "clone".to_string(),
            source: e,
        })
    }

    async fn checkout_new_branch(&self, _repository: &Path, branch: &str) -> Result<(), GitError> {
        self.record(format!("checkout -b {branch}"))
    }

    async fn add(&self, _repository: &Path, pathspec: &Path) -> Result<(), GitError> {
        self.record(format!("add {}", pathspec.display()))
    }

    async fn commit(&self, _repository: &Path, message: &str) -> Result<(), GitError> {
        self.record(format!("commit -m {message}"))
    }

    async fn push(&self, _repository: &Path, remote: &str, branch: &str) -> Result<(), GitError> {
        self.record(format!("push {remote} {branch}"))
    }
}

/// Prompter answering from a fixed script.
pub(crate) struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub(crate) fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub(crate) fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub(crate) fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, message: &str) -> Result<String, PromptError> {
        self.transcript.push(message.to_string());
        self.answers.pop_front().ok_or(PromptError::InputClosed)
    }
}
