use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::Settings;
use crate::error::FetchError;
use crate::queries::{ALL_ISSUES_QUERY, MY_ISSUES_QUERY, VIEWER_QUERY};
use crate::types::{Connection, Issue, User};

pub const API_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Carries one already-encoded GraphQL request to the tracker and returns the
/// raw response body. Implementations report network failures and non-2xx
/// statuses as `FetchError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, endpoint: &str, api_key: &str, body: String) -> Result<String, FetchError>;
}

/// `reqwest`-backed transport. No timeout beyond the client defaults.
#[derive(Default)]
pub struct HttpTransport {
    http: Client,
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, endpoint: &str, api_key: &str, body: String) -> Result<String, FetchError> {
        let response = self
            .http
            .post(endpoint)
            .header("Authorization", api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            return Err(FetchError::Transport(format!(
                "API error (status {}): {}",
                status.as_u16(),
                text
            )));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

/// Which issue query a refresh should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueScope {
    Mine,
    All,
}

impl IssueScope {
    pub fn from_preference(show_only_mine: bool) -> Self {
        if show_only_mine {
            Self::Mine
        } else {
            Self::All
        }
    }
}

#[derive(Clone)]
pub struct LinearClient {
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    endpoint: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

#[derive(Deserialize)]
struct IssuesData {
    issues: Option<Connection<Issue>>,
}

#[derive(Deserialize)]
struct ViewerData {
    viewer: Option<User>,
}

impl LinearClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_transport(Arc::new(HttpTransport::default()), api_key)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_key.clone())
    }

    pub fn with_transport(transport: Arc<dyn Transport>, api_key: Option<String>) -> Self {
        Self {
            transport,
            api_key,
            endpoint: API_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Issues assigned to the caller that are neither completed nor canceled.
    pub async fn fetch_my_issues(&self) -> Result<Vec<Issue>, FetchError> {
        self.fetch_issue_page(MY_ISSUES_QUERY).await
    }

    /// Open issues regardless of assignee.
    pub async fn fetch_all_issues(&self) -> Result<Vec<Issue>, FetchError> {
        self.fetch_issue_page(ALL_ISSUES_QUERY).await
    }

    pub async fn fetch_issues(&self, scope: IssueScope) -> Result<Vec<Issue>, FetchError> {
        match scope {
            IssueScope::Mine => self.fetch_my_issues().await,
            IssueScope::All => self.fetch_all_issues().await,
        }
    }

    /// Resolve the identity behind the configured key.
    pub async fn test_connection(&self) -> Result<User, FetchError> {
        let data: Option<ViewerData> = self.query(VIEWER_QUERY).await?;
        data.and_then(|d| d.viewer).ok_or(FetchError::EmptyResult)
    }

    async fn fetch_issue_page(&self, query: &str) -> Result<Vec<Issue>, FetchError> {
        let data: Option<IssuesData> = self.query(query).await?;
        let issues = data
            .and_then(|d| d.issues)
            .map(|c| c.nodes)
            .unwrap_or_default();
        tracing::debug!(count = issues.len(), "fetched issues");
        Ok(issues)
    }

    async fn query<T: DeserializeOwned>(&self, query: &str) -> Result<Option<T>, FetchError> {
        // Sent as-is; trimming only decides whether a key is configured.
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(FetchError::Unauthenticated),
        };

        let request = GraphQLRequest {
            query,
            variables: serde_json::Map::new(),
        };
        let body =
            serde_json::to_string(&request).map_err(|e| FetchError::Transport(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, "sending GraphQL request");
        let text = self.transport.post(&self.endpoint, api_key, body).await?;

        let gql_response: GraphQLResponse<T> = serde_json::from_str(&text)
            .map_err(|e| FetchError::Transport(format!("malformed response: {e}")))?;

        if let Some(errors) = gql_response.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!("GraphQL errors: {message}");
            return Err(FetchError::RemoteRejected(message));
        }

        Ok(gql_response.data)
    }
}
