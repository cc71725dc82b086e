//! View controller: refresh lifecycle, stale completions, recompute.

mod common;

use common::{client_with, identifiers, issue_node, issues_response, sample_issues, FakeTransport};
use linear_viewer::client::LinearClient;
use linear_viewer::config::{Preferences, Settings};
use linear_viewer::controller::{Completion, ViewController, LOADING_STATUS, MISSING_KEY_STATUS};
use linear_viewer::error::FetchError;
use linear_viewer::filter::{SortDirection, SortKey, StatusFilter};
use linear_viewer::queries::{ALL_ISSUES_QUERY, MY_ISSUES_QUERY};
use pretty_assertions::assert_eq;
use serde_json::json;

fn settings(show_only_mine: bool) -> Settings {
    Settings::new(
        Preferences {
            show_only_my_issues: show_only_mine,
            ..Preferences::default()
        },
        Some("key".to_string()),
    )
}

fn idle_controller() -> ViewController {
    let client = LinearClient::with_transport(FakeTransport::replying([]), Some("key".to_string()));
    ViewController::new(client, settings(true))
}

fn loaded_controller() -> ViewController {
    let mut controller = idle_controller();
    assert!(controller.apply_completion(Completion {
        seq: 0,
        result: Ok(sample_issues()),
    }));
    controller
}

#[tokio::test]
async fn refresh_replaces_snapshot_and_reports_counts() {
    let transport = FakeTransport::with_json(issues_response(vec![
        issue_node("ENG-1", "started", Some("Backend")),
        issue_node("ENG-2", "backlog", None),
    ]));
    let mut controller = ViewController::new(client_with(transport.clone(), Some("key")), settings(true));

    controller.refresh();
    assert!(controller.is_loading());
    assert_eq!(controller.status_line(), LOADING_STATUS);
    assert!(controller.visible().is_empty());

    assert!(controller.next_completion().await);
    assert!(!controller.is_loading());
    assert_eq!(controller.status_line(), "2 / 2 issues");
    assert_eq!(controller.all_issues().len(), 2);
    assert_eq!(transport.last_request().unwrap().body["query"], MY_ISSUES_QUERY);
}

#[tokio::test]
async fn poll_applies_finished_refreshes_without_blocking() {
    let transport = FakeTransport::with_json(issues_response(vec![issue_node("ENG-9", "unstarted", None)]));
    let mut controller = ViewController::new(client_with(transport, Some("key")), settings(true));

    controller.refresh();
    assert_eq!(controller.poll_completions(), 0);

    while controller.poll_completions() == 0 {
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.status_line(), "1 / 1 issues");
    assert_eq!(identifiers(&controller.visible()), ["ENG-9"]);
}

#[tokio::test]
async fn preference_off_fetches_all_issues() {
    let transport = FakeTransport::with_json(issues_response(vec![]));
    let mut controller = ViewController::new(client_with(transport.clone(), Some("key")), settings(false));

    controller.refresh();
    controller.next_completion().await;

    assert_eq!(transport.last_request().unwrap().body["query"], ALL_ISSUES_QUERY);
    assert_eq!(controller.status_line(), "0 / 0 issues");
}

#[tokio::test]
async fn missing_key_gets_the_configure_message() {
    let transport = FakeTransport::with_json(issues_response(vec![]));
    let mut controller = ViewController::new(client_with(transport.clone(), None), settings(true));

    controller.refresh();
    controller.next_completion().await;

    assert_eq!(controller.status_line(), MISSING_KEY_STATUS);
    assert!(!controller.is_loading());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn failure_clears_list_and_shows_error() {
    let transport = FakeTransport::with_json(json!({ "data": null, "errors": [{ "message": "bad token" }] }));
    let mut controller = ViewController::new(client_with(transport, Some("key")), settings(true));
    controller.apply_completion(Completion { seq: 0, result: Ok(sample_issues()) });
    assert_eq!(controller.visible().len(), 5);

    controller.refresh();
    controller.next_completion().await;

    assert_eq!(controller.status_line(), "Error: bad token");
    assert!(controller.visible().is_empty());
    assert_eq!(controller.all_issues().len(), 5);
}

#[tokio::test]
async fn stale_completion_is_discarded() {
    let mut controller = idle_controller();
    let first = controller.refresh();
    let second = controller.refresh();
    assert!(first < second);

    // The newer request finishes first.
    assert!(controller.apply_completion(Completion {
        seq: second,
        result: Ok(sample_issues()),
    }));
    assert_eq!(controller.status_line(), "5 / 5 issues");

    // The older one arrives late and must not overwrite it.
    assert!(!controller.apply_completion(Completion {
        seq: first,
        result: Err(FetchError::Transport("late".to_string())),
    }));
    assert_eq!(controller.status_line(), "5 / 5 issues");
    assert_eq!(controller.all_issues().len(), 5);
}

#[tokio::test]
async fn loading_stays_set_until_latest_request_completes() {
    let mut controller = idle_controller();
    let first = controller.refresh();
    let second = controller.refresh();

    controller.apply_completion(Completion { seq: first, result: Ok(vec![]) });
    assert!(controller.is_loading());

    controller.apply_completion(Completion { seq: second, result: Ok(vec![]) });
    assert!(!controller.is_loading());
}

#[test]
fn selection_changes_recompute_without_fetching() {
    let mut controller = loaded_controller();

    controller.set_status_filter(StatusFilter::Started);
    assert_eq!(identifiers(&controller.visible()), ["ENG-5", "ENG-1"]);
    assert_eq!(controller.status_line(), "2 / 5 issues");

    controller.set_project_filter(Some("Frontend".to_string()));
    assert!(controller.visible().is_empty());
    assert_eq!(controller.status_line(), "0 / 5 issues");

    controller.clear_filters();
    controller.select_sort(SortKey::Priority);
    assert_eq!(identifiers(&controller.visible()), ["ENG-3", "ENG-1", "ENG-5", "ENG-4", "ENG-2"]);

    controller.select_sort(SortKey::Priority);
    assert_eq!(controller.selection().direction, SortDirection::Ascending);
    assert_eq!(identifiers(&controller.visible()), ["ENG-4", "ENG-5", "ENG-1", "ENG-3", "ENG-2"]);
}

#[test]
fn branch_name_uses_configured_format() {
    let client = LinearClient::with_transport(FakeTransport::replying([]), None);
    let settings = Settings::new(
        Preferences {
            branch_name_format: "feature/{ID}-{title}".to_string(),
            ..Preferences::default()
        },
        None,
    );
    let mut controller = ViewController::new(client, settings);
    controller.apply_completion(Completion { seq: 0, result: Ok(sample_issues()) });

    let issue = controller.visible_issue(0).unwrap().clone();
    assert_eq!(issue.identifier, "ENG-2");
    assert_eq!(controller.branch_name(&issue), "feature/ENG-2-issue-eng-2");
}
