//! View state owner. Fetches run on spawned tasks; their results come back
//! through a channel and are applied only by the owner, one at a time.

use tokio::sync::mpsc;

use crate::branch;
use crate::client::{IssueScope, LinearClient};
use crate::config::Settings;
use crate::error::FetchError;
use crate::filter::{self, SortKey, StatusFilter, ViewSelection};
use crate::types::Issue;

pub const LOADING_STATUS: &str = "Loading...";
pub const MISSING_KEY_STATUS: &str =
    "Please configure your Linear API key (run `linear-viewer init`)";

const COMPLETION_BUFFER: usize = 16;

/// Result of one dispatched fetch, tagged with its request sequence.
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub result: Result<Vec<Issue>, FetchError>,
}

pub struct ViewController {
    client: LinearClient,
    settings: Settings,
    issues: Vec<Issue>,
    selection: ViewSelection,
    list_cleared: bool,
    loading: bool,
    status: String,
    last_dispatched: u64,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
}

impl ViewController {
    pub fn new(client: LinearClient, settings: Settings) -> Self {
        let (tx, rx) = mpsc::channel(COMPLETION_BUFFER);
        Self {
            client,
            settings,
            issues: Vec::new(),
            selection: ViewSelection::default(),
            list_cleared: false,
            loading: false,
            status: String::new(),
            last_dispatched: 0,
            tx,
            rx,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status_line(&self) -> &str {
        &self.status
    }

    pub fn selection(&self) -> &ViewSelection {
        &self.selection
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The full snapshot from the last successful fetch.
    pub fn all_issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The filtered, sorted list currently on screen.
    pub fn visible(&self) -> Vec<&Issue> {
        if self.list_cleared {
            return Vec::new();
        }
        self.selection.apply(&self.issues)
    }

    pub fn visible_issue(&self, row: usize) -> Option<&Issue> {
        self.visible().into_iter().nth(row)
    }

    pub fn project_options(&self) -> Vec<String> {
        filter::project_options(&self.issues)
    }

    pub fn branch_name(&self, issue: &Issue) -> String {
        branch::generate(issue, self.settings.preferences.branch_format())
    }

    /// Dispatch a fetch on the runtime and return its sequence number. Must be
    /// called from within a tokio runtime. Earlier in-flight fetches are not
    /// cancelled; their results are discarded when they arrive.
    pub fn refresh(&mut self) -> u64 {
        self.last_dispatched += 1;
        let seq = self.last_dispatched;

        self.loading = true;
        self.status = LOADING_STATUS.to_string();
        self.list_cleared = true;

        let client = self.client.clone();
        let scope = IssueScope::from_preference(self.settings.preferences.show_only_my_issues);
        let tx = self.tx.clone();

        tracing::debug!(seq, ?scope, "dispatching refresh");
        tokio::spawn(async move {
            let result = client.fetch_issues(scope).await;
            if tx.send(Completion { seq, result }).await.is_err() {
                tracing::debug!(seq, "view closed before refresh completed");
            }
        });

        seq
    }

    /// Apply every completion already waiting, without blocking.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion and apply it. Returns whether it was
    /// current (stale completions are dropped).
    pub async fn next_completion(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => self.apply_completion(completion),
            None => false,
        }
    }

    /// Returns `false` when the completion belongs to a superseded request.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        if completion.seq < self.last_dispatched {
            tracing::debug!(
                seq = completion.seq,
                latest = self.last_dispatched,
                "discarding stale refresh result"
            );
            return false;
        }

        self.loading = false;
        match completion.result {
            Ok(issues) => {
                self.issues = issues;
                self.recompute();
            }
            Err(e) => {
                tracing::warn!("Refresh failed: {e}");
                self.status = status_for_error(&e);
            }
        }
        true
    }

    pub fn select_sort(&mut self, key: SortKey) {
        self.selection.select_sort(key);
        self.recompute();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.selection.status = status;
        self.recompute();
    }

    pub fn set_project_filter(&mut self, project: Option<String>) {
        self.selection.project = project;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.selection.status = StatusFilter::All;
        self.selection.project = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.list_cleared = false;
        let shown = self.selection.apply(&self.issues).len();
        self.status = format!("{shown} / {} issues", self.issues.len());
    }
}

/// User-facing status line for a failed fetch.
pub fn status_for_error(error: &FetchError) -> String {
    match error {
        FetchError::Unauthenticated => MISSING_KEY_STATUS.to_string(),
        other => format!("Error: {other}"),
    }
}
