//! Filter-sort engine: turns the fetched snapshot into the ordered list the
//! user sees. Pure; never mutates its input.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use clap::ValueEnum;

use crate::types::{Issue, StateType};

/// Synthetic first entry of the project selector.
pub const ALL_PROJECTS: &str = "All Projects";

/// Placeholder name for stateless issues under an ascending status sort.
const MISSING_STATE_ASCENDING: &str = "zzz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Started,
    Unstarted,
    Backlog,
    Completed,
    Canceled,
}

impl StatusFilter {
    pub const ALL_FILTERS: [StatusFilter; 6] = [
        Self::All,
        Self::Started,
        Self::Unstarted,
        Self::Backlog,
        Self::Completed,
        Self::Canceled,
    ];

    /// The workflow bucket this filter selects, `None` for `All`.
    pub fn state_type(self) -> Option<StateType> {
        match self {
            Self::All => None,
            Self::Started => Some(StateType::Started),
            Self::Unstarted => Some(StateType::Unstarted),
            Self::Backlog => Some(StateType::Backlog),
            Self::Completed => Some(StateType::Completed),
            Self::Canceled => Some(StateType::Canceled),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Started => "Started",
            Self::Unstarted => "Unstarted",
            Self::Backlog => "Backlog",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }

    fn matches(self, issue: &Issue) -> bool {
        match self.state_type() {
            None => true,
            Some(wanted) => issue.state_type() == Some(wanted),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    #[value(name = "updated")]
    UpdatedAt,
    #[value(name = "created")]
    CreatedAt,
    Priority,
    Status,
}

impl SortKey {
    pub const ALL_KEYS: [SortKey; 4] = [
        Self::UpdatedAt,
        Self::Priority,
        Self::Status,
        Self::CreatedAt,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::UpdatedAt => "Updated",
            Self::CreatedAt => "Created",
            Self::Priority => "Priority",
            Self::Status => "Status",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Descending => "Descending",
            Self::Ascending => "Ascending",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Descending => "↓",
            Self::Ascending => "↑",
        }
    }
}

/// Everything the engine needs besides the snapshot itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelection {
    pub status: StatusFilter,
    pub project: Option<String>,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl ViewSelection {
    /// Picking the active key flips direction; picking another key selects it
    /// and resets to descending.
    pub fn select_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.toggled();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn has_filters(&self) -> bool {
        self.status != StatusFilter::All || self.project.is_some()
    }

    /// Human-readable descriptors of the non-default filters.
    pub fn active_filters(&self) -> Vec<String> {
        let mut chips = Vec::new();
        if self.status != StatusFilter::All {
            chips.push(format!("Status: {}", self.status));
        }
        if let Some(project) = &self.project {
            chips.push(format!("Project: {project}"));
        }
        chips
    }

    pub fn apply<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        filter_sort(
            issues,
            self.status,
            self.project.as_deref(),
            self.sort_key,
            self.direction,
        )
    }
}

/// Status filter, then project filter, then a stable sort.
pub fn filter_sort<'a>(
    issues: &'a [Issue],
    status: StatusFilter,
    project: Option<&str>,
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a Issue> {
    let mut view: Vec<&Issue> = issues
        .iter()
        .filter(|issue| status.matches(issue))
        .filter(|issue| match project {
            Some(name) => issue.project_name() == Some(name),
            None => true,
        })
        .collect();

    // `sort_by` is stable, so equal keys keep their fetched order.
    view.sort_by(|a, b| compare(a, b, key, direction));
    view
}

fn compare(a: &Issue, b: &Issue, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at), direction),
        SortKey::CreatedAt => directed(a.created_at.cmp(&b.created_at), direction),
        SortKey::Priority => priority_rank(a, direction).cmp(&priority_rank(b, direction)),
        SortKey::Status => {
            let ordering = status_name(a, direction).cmp(status_name(b, direction));
            directed(ordering, direction)
        }
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Ascending rank for the priority sort. "No priority" always ranks last.
/// Descending lists the most urgent (1) first; ascending lists the least
/// urgent (4) first.
fn priority_rank(issue: &Issue, direction: SortDirection) -> i32 {
    let value = issue.priority.as_i32();
    if !issue.priority.is_set() {
        return i32::MAX;
    }
    match direction {
        SortDirection::Descending => value,
        SortDirection::Ascending => -value,
    }
}

fn status_name(issue: &Issue, direction: SortDirection) -> &str {
    match &issue.state {
        Some(state) => &state.name,
        None => match direction {
            SortDirection::Descending => "",
            SortDirection::Ascending => MISSING_STATE_ASCENDING,
        },
    }
}

/// Distinct project names across the whole snapshot, sorted.
pub fn project_options(issues: &[Issue]) -> Vec<String> {
    issues
        .iter()
        .filter_map(|issue| issue.project_name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Project selector entries: "All Projects" followed by [`project_options`].
pub fn project_menu_labels(issues: &[Issue]) -> Vec<String> {
    std::iter::once(ALL_PROJECTS.to_string())
        .chain(project_options(issues))
        .collect()
}
