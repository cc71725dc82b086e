use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use crate::branch;
use crate::browser;
use crate::cli::{IssueListArgs, ScopeArgs};
use crate::client::LinearClient;
use crate::config::Settings;
use crate::error::Result;
use crate::filter::{self, SortDirection, ViewSelection, ALL_PROJECTS};
use crate::output::{self, colored_hex, format_date, status_colored};
use crate::types::Issue;

use super::{fetch_snapshot, find_issue};

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "Issues")]
    issues: usize,
}

pub async fn list(client: &LinearClient, settings: &Settings, args: IssueListArgs) -> Result<()> {
    let issues = fetch_snapshot(client, settings, args.scope).await?;

    let selection = ViewSelection {
        status: args.status,
        project: args.project,
        sort_key: args.sort,
        direction: if args.asc {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        },
    };
    let view = selection.apply(&issues);

    output::print_issue_list(&view);
    if !output::is_json_output() {
        let mut summary = format!("{} / {} issues", view.len(), issues.len());
        let chips = selection.active_filters();
        if !chips.is_empty() {
            summary.push_str(&format!("  Filters: {}", chips.join(", ")));
        }
        println!("{}", summary.bright_black());
    }

    Ok(())
}

pub async fn projects(client: &LinearClient, settings: &Settings, scope: ScopeArgs) -> Result<()> {
    let issues = fetch_snapshot(client, settings, scope).await?;

    let labels = filter::project_menu_labels(&issues);
    output::print_table(&labels, |name| ProjectRow {
        issues: if name == ALL_PROJECTS {
            issues.len()
        } else {
            issues
                .iter()
                .filter(|i| i.project_name() == Some(name.as_str()))
                .count()
        },
        name: name.clone(),
    });

    Ok(())
}

pub async fn view(
    client: &LinearClient,
    settings: &Settings,
    id: &str,
    scope: ScopeArgs,
) -> Result<()> {
    let issues = fetch_snapshot(client, settings, scope).await?;
    let issue = find_issue(&issues, id)?;

    output::print_item(issue, print_detail);

    Ok(())
}

pub async fn branch(
    client: &LinearClient,
    settings: &Settings,
    id: &str,
    format: Option<&str>,
    scope: ScopeArgs,
) -> Result<()> {
    let issues = fetch_snapshot(client, settings, scope).await?;
    let issue = find_issue(&issues, id)?;

    let pattern = format.unwrap_or_else(|| settings.preferences.branch_format());
    let name = branch::generate(issue, pattern);

    output::print_item(
        &json!({ "identifier": issue.identifier, "branch": name }),
        |_| println!("{name}"),
    );

    Ok(())
}

pub async fn open(
    client: &LinearClient,
    settings: &Settings,
    id: &str,
    scope: ScopeArgs,
) -> Result<()> {
    let issues = fetch_snapshot(client, settings, scope).await?;
    let issue = find_issue(&issues, id)?;

    browser::validate(&issue.url)?;
    if browser::open_url(&issue.url) {
        output::print_message(&format!("Opened {} in browser", issue.identifier));
    } else {
        output::print_message(&format!("Could not launch a browser. Link: {}", issue.url));
    }

    Ok(())
}

/// Human-readable detail view.
pub fn print_detail(issue: &Issue) {
    println!("{} - {}", issue.identifier.bold(), issue.title.bold());
    println!();

    let mut meta = Vec::new();
    if let Some(state) = &issue.state {
        meta.push(status_colored(
            &format!("{} {}", state.state_type.glyph(), state.name),
            Some(state.color.as_str()),
        ));
    }
    if issue.priority.is_set() {
        meta.push(format!("● {}", issue.priority.colored()));
    }
    if let Some(project) = &issue.project {
        meta.push(colored_hex(&project.name, project.display_color()));
    }
    if let Some(assignee) = &issue.assignee {
        meta.push(format!("@{}", assignee.name).bright_black().to_string());
    }
    if !meta.is_empty() {
        println!("{}", meta.join("  "));
    }

    if !issue.labels().is_empty() {
        let labels: Vec<String> = issue
            .labels()
            .iter()
            .map(|l| colored_hex(&l.name, &l.color))
            .collect();
        println!("Labels:   {}", labels.join(", "));
    }
    println!("Created:  {}", format_date(&issue.created_at));
    println!("Updated:  {}", format_date(&issue.updated_at));
    println!("URL:      {}", issue.url);
    println!();

    match issue.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(desc) => println!("{desc}"),
        None => println!("{}", "No description".bright_black()),
    }
    println!();

    let comments = issue.comments_newest_first();
    println!("{}", format!("Comments ({})", comments.len()).bold());
    if comments.is_empty() {
        println!("{}", "No comments".bright_black());
    }
    for comment in comments {
        let author = comment
            .user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("Unknown");
        println!();
        println!(
            "{} {}",
            author.bold(),
            format_date(&comment.created_at).bright_black()
        );
        println!("{}", comment.body);
    }
}
