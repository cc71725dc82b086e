pub mod browse;
pub mod connection;
pub mod init;
pub mod issues;

use crate::cli::ScopeArgs;
use crate::client::{IssueScope, LinearClient};
use crate::config::Settings;
use crate::error::{Result, ViewerError};
use crate::types::Issue;

/// Fetch the snapshot for one-shot commands, honouring `--mine/--all` over
/// the saved preference.
pub async fn fetch_snapshot(
    client: &LinearClient,
    settings: &Settings,
    scope: ScopeArgs,
) -> Result<Vec<Issue>> {
    let only_mine = scope
        .only_mine()
        .unwrap_or(settings.preferences.show_only_my_issues);
    Ok(client
        .fetch_issues(IssueScope::from_preference(only_mine))
        .await?)
}

/// Look an issue up by identifier (case-insensitive) or internal id.
pub fn find_issue<'a>(issues: &'a [Issue], id: &str) -> Result<&'a Issue> {
    issues
        .iter()
        .find(|issue| issue.identifier.eq_ignore_ascii_case(id) || issue.id == id)
        .ok_or_else(|| ViewerError::IssueNotFound(id.to_string()))
}
