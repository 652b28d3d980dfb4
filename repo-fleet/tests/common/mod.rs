//! Shared fakes for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use repo_fleet::{
    ApiError, ApiResponse, GitError, HostingApi, PromptError, Prompter, VersionControl,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Hosting API with one fixed answer per method and route.
#[derive(Default)]
pub struct StubApi {
    answers: Mutex<HashMap<(String, String), ApiResponse>>,
    calls: Mutex<Vec<(String, String, Option<Value>)>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: &str, route: &str, status: u16, body: impl Into<String>) {
        self.answers.lock().unwrap().insert(
            (method.to_string(), route.to_string()),
            ApiResponse::new(status, body),
        );
    }

    /// Answers the base ref lookup of `owner/repo` with `sha`.
    pub fn on_base_ref(&self, owner: &str, repo: &str, base: &str, sha: &str) {
        self.on(
            "GET",
            &format!("/repos/{owner}/{repo}/git/ref/heads/{base}"),
            200,
            json!({ "ref": format!("refs/heads/{base}"), "object": { "sha": sha } }).to_string(),
        );
    }

    /// Method and route of every call, in order.
    pub fn routes(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(method, route, _)| (method.clone(), route.clone()))
            .collect()
    }

    pub fn post_bodies(&self, route: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(method, r, _)| method == "POST" && r == route)
            .filter_map(|(_, _, body)| body.clone())
            .collect()
    }

    fn answer(&self, method: &str, route: &str, body: Option<Value>) -> ApiResponse {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), route.to_string(), body));
        self.answers
            .lock()
            .unwrap()
            .get(&(method.to_string(), route.to_string()))
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(404, r#"{"message":"Not Found"}"#))
    }
}

#[async_trait]
impl HostingApi for StubApi {
    async fn get(&self, route: &str) -> Result<ApiResponse, ApiError> {
        Ok(self.answer("GET", route, None))
    }

    async fn post(&self, route: &str, body: &Value) -> Result<ApiResponse, ApiError> {
        Ok(self.answer("POST", route, Some(body.clone())))
    }
}

pub fn repo_page(owner: &str, names: &[String]) -> String {
    let items: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "full_name": format!("{owner}/{name}"),
                "clone_url": format!("https://github.com/{owner}/{name}.git"),
                "owner": { "login": owner },
            })
        })
        .collect();
    Value::Array(items).to_string()
}

/// Version control that creates the clone directory and records commands.
#[derive(Default)]
pub struct RecordingGit {
    commands: Mutex<Vec<String>>,
    failing_clones: Vec<String>,
}

impl RecordingGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails clones whose URL contains `fragment`.
    pub fn failing_clone_of(mut self, fragment: &str) -> Self {
        self.failing_clones.push(fragment.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, command: String) {
        self.commands.lock().unwrap().push(command);
    }
}

#[async_trait]
impl VersionControl for RecordingGit {
    async fn clone_repository(&self, url: &str, destination: &Path) -> Result<(), GitError> {
        self.record(format!("clone {url}"));
        if self.failing_clones.iter().any(|f| url.contains(f.as_str())) {
            return Err(GitError::Failed {
                command: format!("clone {url}"),
                stderr: "fatal: repository not found".to_string(),
            });
        }
        std::fs::create_dir_all(destination).unwrap();
        Ok(())
    }

    async fn checkout_new_branch(&self, _repository: &Path, branch: &str) -> Result<(), GitError> {
        self.record(format!("checkout -b {branch}"));
        Ok(())
    }

    async fn add(&self, _repository: &Path, pathspec: &Path) -> Result<(), GitError> {
        self.record(format!("add {}", pathspec.display()));
        Ok(())
    }

    async fn commit(&self, _repository: &Path, message: &str) -> Result<(), GitError> {
        self.record(format!("commit -m {message}"));
        Ok(())
    }

    async fn push(&self, _repository: &Path, remote: &str, branch: &str) -> Result<(), GitError> {
        self.record(format!("push {remote} {branch}"));
        Ok(())
    }
}

/// Prompter replaying canned answers.
pub struct CannedPrompter {
    answers: Vec<String>,
    pub lines: Vec<String>,
}

impl CannedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().rev().map(|a| a.to_string()).collect(),
            lines: Vec::new(),
        }
    }
}

impl Prompter for CannedPrompter {
    fn say(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn ask(&mut self, message: &str) -> Result<String, PromptError> {
        self.lines.push(message.to_string());
        self.answers.pop().ok_or(PromptError::InputClosed)
    }
}
