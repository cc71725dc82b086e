//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linear_viewer::client::{LinearClient, Transport};
use linear_viewer::error::FetchError;
use linear_viewer::types::{Issue, Priority, Project, StateType, WorkflowState};
use serde_json::{json, Value};

/// Transport that replays canned bodies and records every call.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<String, FetchError>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<RecordedRequest>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub api_key: String,
    pub body: Value,
}

impl FakeTransport {
    pub fn replying(bodies: impl IntoIterator<Item = Result<String, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(bodies.into_iter().collect()),
            ..Self::default()
        })
    }

    pub fn with_json(body: Value) -> Arc<Self> {
        Self::replying([Ok(body.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post(&self, endpoint: &str, api_key: &str, body: String) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(RecordedRequest {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            body: serde_json::from_str(&body).unwrap(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no canned response".to_string())))
    }
}

pub fn client_with(transport: Arc<FakeTransport>, api_key: Option<&str>) -> LinearClient {
    LinearClient::with_transport(transport, api_key.map(String::from))
}

pub fn issue(identifier: &str) -> Issue {
    Issue {
        id: format!("id-{identifier}"),
        identifier: identifier.to_string(),
        title: format!("Issue {identifier}"),
        description: None,
        priority: Priority::None,
        url: format!("https://linear.app/acme/issue/{identifier}"),
        state: None,
        assignee: None,
        project: None,
        labels: None,
        comments: None,
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

pub fn with_priority(mut issue: Issue, priority: i32) -> Issue {
    issue.priority = Priority::from_i32(priority);
    issue
}

pub fn with_state(mut issue: Issue, name: &str, state_type: StateType) -> Issue {
    issue.state = Some(WorkflowState {
        id: format!("state-{name}"),
        name: name.to_string(),
        color: "#5e6ad2".to_string(),
        state_type,
    });
    issue
}

pub fn with_project(mut issue: Issue, name: &str) -> Issue {
    issue.project = Some(Project {
        id: format!("project-{name}"),
        name: name.to_string(),
        icon: None,
        color: None,
    });
    issue
}

pub fn updated(mut issue: Issue, updated_at: &str) -> Issue {
    issue.updated_at = updated_at.to_string();
    issue
}

pub fn identifiers(view: &[&Issue]) -> Vec<String> {
    view.iter().map(|i| i.identifier.clone()).collect()
}

/// A mixed snapshot used across engine and controller tests.
pub fn sample_issues() -> Vec<Issue> {
    vec![
        updated(
            with_project(with_state(with_priority(issue("ENG-1"), 2), "In Progress", StateType::Started), "Backend"),
            "2024-03-02T10:00:00.000Z",
        ),
        updated(
            with_project(with_state(with_priority(issue("ENG-2"), 0), "Todo", StateType::Unstarted), "Frontend"),
            "2024-03-05T10:00:00.000Z",
        ),
        updated(
            with_state(with_priority(issue("ENG-3"), 1), "Backlog", StateType::Backlog),
            "2024-02-20T10:00:00.000Z",
        ),
        updated(
            with_project(with_priority(issue("ENG-4"), 4), "Backend"),
            "2024-03-01T10:00:00.000Z",
        ),
        updated(
            with_project(with_state(with_priority(issue("ENG-5"), 3), "In Review", StateType::Started), "Backend"),
            "2024-03-04T10:00:00.000Z",
        ),
    ]
}

/// Wire-format issue node as the API returns it.
pub fn issue_node(identifier: &str, state_type: &str, project: Option<&str>) -> Value {
    json!({
        "id": format!("uuid-{identifier}"),
        "identifier": identifier,
        "title": format!("Title of {identifier}"),
        "description": "Some **markdown**",
        "priority": 2,
        "url": format!("https://linear.app/acme/issue/{identifier}"),
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-02T00:00:00.000Z",
        "state": { "id": "s1", "name": "In Progress", "color": "#f2c94c", "type": state_type },
        "assignee": { "id": "u1", "name": "Dana", "email": "dana@example.com", "avatarUrl": null },
        "project": project.map(|name| json!({ "id": "p1", "name": name, "icon": null, "color": "#bec2c8" })),
        "labels": { "nodes": [ { "id": "l1", "name": "bug", "color": "#eb5757" } ] },
        "comments": { "nodes": [
            { "id": "c1", "body": "first", "createdAt": "2024-01-01T01:00:00.000Z", "user": { "id": "u2", "name": "Lee" } },
            { "id": "c2", "body": "second", "createdAt": "2024-01-03T01:00:00.000Z", "user": null }
        ] }
    })
}

pub fn issues_response(nodes: Vec<Value>) -> Value {
    json!({ "data": { "issues": { "nodes": nodes } } })
}
