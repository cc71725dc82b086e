use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::types::Issue;

static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!("Failed to encode JSON output: {e}"),
    }
}

/// Rounded table in text mode, a JSON array otherwise.
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        print_json(items);
        return;
    }
    println!("{}", Table::new(items.iter().map(to_row)).with(Style::rounded()));
}

pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if is_json_output() {
        print_json(item);
    } else {
        display(item);
    }
}

/// Plain line in text mode, `{"message": ...}` in JSON mode.
pub fn print_message(message: &str) {
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

#[derive(Tabled)]
pub struct IssueRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl IssueRow {
    pub fn new(row: usize, issue: &Issue) -> Self {
        let title = truncate(&issue.title, 50);
        Self {
            row,
            id: issue.identifier.clone(),
            title: if issue.is_closed() {
                title.bright_black().strikethrough().to_string()
            } else {
                title
            },
            status: issue
                .state
                .as_ref()
                .map(|s| {
                    status_colored(&format!("{} {}", s.state_type.glyph(), s.name), Some(s.color.as_str()))
                })
                .unwrap_or_default(),
            priority: if issue.priority.is_set() {
                issue.priority.colored()
            } else {
                String::new()
            },
            project: issue
                .project
                .as_ref()
                .map(|p| colored_hex(&p.name, p.display_color()))
                .unwrap_or_default(),
            updated: format_relative(&issue.updated_at),
        }
    }
}

/// Numbered issue table. Rows start at 1 so the interactive session can
/// refer back to them.
pub fn print_issue_list(issues: &[&Issue]) {
    if is_json_output() {
        print_json(issues);
        return;
    }
    let rows = issues
        .iter()
        .enumerate()
        .map(|(n, issue)| IssueRow::new(n + 1, issue));
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Tint text with a workflow state's `#rrggbb` colour when it parses.
pub fn status_colored(status: &str, color: Option<&str>) -> String {
    match color.and_then(parse_hex_color) {
        Some((r, g, b)) => status.truecolor(r, g, b).to_string(),
        None => status.to_string(),
    }
}

/// Colour text with a hex colour, falling back to plain text.
pub fn colored_hex(text: &str, hex: &str) -> String {
    status_colored(text, Some(hex))
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn parse_timestamp(iso: &str) -> Option<DateTime<Utc>> {
    iso.parse().ok()
}

/// Everything before the `T`, for timestamps chrono can't read.
fn date_prefix(iso: &str) -> String {
    iso.split('T').next().unwrap_or(iso).to_string()
}

/// Local date and time, minute precision.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => date_prefix(iso),
    }
}

pub fn format_date_only(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => date_prefix(iso),
    }
}

/// "3 hours ago" style age; older than 30 days shows the date.
pub fn format_relative(iso: &str) -> String {
    let Some(dt) = parse_timestamp(iso) else {
        return date_prefix(iso);
    };
    let age = Utc::now().signed_duration_since(dt);

    let (amount, unit) = if age.num_minutes() < 1 {
        return "just now".to_string();
    } else if age.num_hours() < 1 {
        (age.num_minutes(), "min")
    } else if age.num_days() < 1 {
        (age.num_hours(), "hour")
    } else if age.num_days() < 30 {
        (age.num_days(), "day")
    } else {
        return format_date_only(iso);
    };

    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} ago")
}

/// Cut to `max` characters including the trailing `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
