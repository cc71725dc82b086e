//! Menus as data. Each row is a label, an enabled predicate, an optional
//! state marker and a handler; one generic renderer and one dispatcher serve
//! every menu.

use crate::branch;
use crate::controller::ViewController;
use crate::filter::{SortKey, StatusFilter, ALL_PROJECTS};
use crate::types::Issue;

/// What a handler asks the front end to do once it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Put this text on the clipboard (printed by the terminal front end).
    Copy(String),
    /// Open this link in the browser.
    Open(String),
    /// A refresh was dispatched.
    Refreshing,
    /// Filters or sort changed; the visible list was recomputed.
    Reselected,
}

type Predicate<C> = Box<dyn Fn(&C) -> bool>;
type Marker<C> = Box<dyn Fn(&C) -> Option<&'static str>>;
type Handler<C> = Box<dyn Fn(&mut C) -> ActionOutcome>;

pub struct MenuEntry<C> {
    pub label: String,
    enabled: Predicate<C>,
    marker: Marker<C>,
    handler: Handler<C>,
}

impl<C> MenuEntry<C> {
    pub fn new(label: impl Into<String>, handler: impl Fn(&mut C) -> ActionOutcome + 'static) -> Self {
        Self {
            label: label.into(),
            enabled: Box::new(|_| true),
            marker: Box::new(|_| None),
            handler: Box::new(handler),
        }
    }

    pub fn enabled_when(mut self, predicate: impl Fn(&C) -> bool + 'static) -> Self {
        self.enabled = Box::new(predicate);
        self
    }

    pub fn marked_by(mut self, marker: impl Fn(&C) -> Option<&'static str> + 'static) -> Self {
        self.marker = Box::new(marker);
        self
    }

    pub fn is_enabled(&self, ctx: &C) -> bool {
        (self.enabled)(ctx)
    }
}

/// One rendered menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    pub index: usize,
    pub label: String,
    pub enabled: bool,
    pub marker: Option<&'static str>,
}

pub fn render<C>(entries: &[MenuEntry<C>], ctx: &C) -> Vec<MenuLine> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| MenuLine {
            index,
            label: entry.label.clone(),
            enabled: entry.is_enabled(ctx),
            marker: (entry.marker)(ctx),
        })
        .collect()
}

/// Run the handler at `index`. Out-of-range and disabled rows do nothing.
pub fn dispatch<C>(entries: &[MenuEntry<C>], ctx: &mut C, index: usize) -> Option<ActionOutcome> {
    let entry = entries.get(index)?;
    if !entry.is_enabled(ctx) {
        tracing::debug!(label = %entry.label, "menu entry disabled");
        return None;
    }
    Some((entry.handler)(ctx))
}

/// Toolbar: refresh, sort keys, status filters, project filters.
pub fn toolbar(controller: &ViewController) -> Vec<MenuEntry<ViewController>> {
    let mut entries = vec![MenuEntry::new("Refresh", |c: &mut ViewController| {
        c.refresh();
        ActionOutcome::Refreshing
    })
    .enabled_when(|c| !c.is_loading())];

    for key in SortKey::ALL_KEYS {
        entries.push(
            MenuEntry::new(format!("Sort: {key}"), move |c: &mut ViewController| {
                c.select_sort(key);
                ActionOutcome::Reselected
            })
            .marked_by(move |c| {
                let selection = c.selection();
                (selection.sort_key == key).then(|| selection.direction.arrow())
            }),
        );
    }

    for status in StatusFilter::ALL_FILTERS {
        entries.push(
            MenuEntry::new(format!("Status: {status}"), move |c: &mut ViewController| {
                c.set_status_filter(status);
                ActionOutcome::Reselected
            })
            .marked_by(move |c| (c.selection().status == status).then_some("✓")),
        );
    }

    entries.push(
        MenuEntry::new(ALL_PROJECTS, |c: &mut ViewController| {
            c.set_project_filter(None);
            ActionOutcome::Reselected
        })
        .marked_by(|c| c.selection().project.is_none().then_some("✓")),
    );

    for project in controller.project_options() {
        let selected = project.clone();
        let marked = project.clone();
        entries.push(
            MenuEntry::new(format!("Project: {project}"), move |c: &mut ViewController| {
                c.set_project_filter(Some(selected.clone()));
                ActionOutcome::Reselected
            })
            .marked_by(move |c| {
                (c.selection().project.as_deref() == Some(marked.as_str())).then_some("✓")
            }),
        );
    }

    entries
}

/// Context for the per-issue menu.
pub struct IssueMenuContext {
    pub issue: Issue,
    pub branch_format: String,
}

pub fn issue_menu(issue: &Issue) -> Vec<MenuEntry<IssueMenuContext>> {
    vec![
        MenuEntry::new("Copy Branch Name", |c: &mut IssueMenuContext| {
            ActionOutcome::Copy(branch::generate(&c.issue, &c.branch_format))
        }),
        MenuEntry::new(
            format!("Copy Issue ID ({})", issue.identifier),
            |c: &mut IssueMenuContext| ActionOutcome::Copy(c.issue.identifier.clone()),
        ),
        MenuEntry::new("Copy Issue URL", |c: &mut IssueMenuContext| {
            ActionOutcome::Copy(c.issue.url.clone())
        }),
        MenuEntry::new("Open in Browser", |c: &mut IssueMenuContext| {
            ActionOutcome::Open(c.issue.url.clone())
        })
        .enabled_when(|c| !c.issue.url.is_empty()),
    ]
}
