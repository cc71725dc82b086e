use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Comment, Connection, Label, Priority, Project, User};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub url: String,
    pub state: Option<WorkflowState>,
    pub assignee: Option<User>,
    pub project: Option<Project>,
    pub labels: Option<Connection<Label>>,
    pub comments: Option<Connection<Comment>>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Issue {
    pub fn labels(&self) -> &[Label] {
        self.labels.as_ref().map_or(&[], |c| c.nodes.as_slice())
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.as_ref().map_or(&[], |c| c.nodes.as_slice())
    }

    /// Comments ordered newest first, as the detail view shows them.
    pub fn comments_newest_first(&self) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self.comments().iter().collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }

    pub fn state_type(&self) -> Option<StateType> {
        self.state.as_ref().map(|s| s.state_type)
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    /// Completed and canceled issues are rendered muted.
    pub fn is_closed(&self) -> bool {
        matches!(
            self.state_type(),
            Some(StateType::Completed | StateType::Canceled)
        )
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "type")]
    pub state_type: StateType,
}

/// Coarse workflow bucket. Anything the tracker sends outside the five known
/// buckets decodes as `Unclassified`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StateType {
    Started,
    Unstarted,
    Backlog,
    Completed,
    Canceled,
    #[serde(other)]
    Unclassified,
}

impl StateType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Unstarted => "unstarted",
            Self::Backlog => "backlog",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Unclassified => "unclassified",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Started => "◉",
            Self::Backlog => "◌",
            Self::Completed => "✓",
            Self::Canceled => "✕",
            Self::Unstarted | Self::Unclassified => "○",
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_issue_and_ignores_unknown_fields() {
        let json = r#"{
            "id": "uuid-1",
            "identifier": "ENG-1",
            "title": "Title",
            "url": "https://linear.app/t/issue/ENG-1",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z",
            "somethingNew": {"nested": true}
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.priority, Priority::None);
        assert!(issue.state.is_none());
        assert!(issue.labels().is_empty());
        assert!(issue.comments().is_empty());
    }

    #[test]
    fn unknown_state_type_is_unclassified() {
        let json = r##"{"id": "s", "name": "Triage", "color": "#fff", "type": "triage"}"##;
        let state: WorkflowState = serde_json::from_str(json).unwrap();
        assert_eq!(state.state_type, StateType::Unclassified);
    }
}
