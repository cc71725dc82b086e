//! Line-oriented interactive session over the view controller.

use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::actions::{self, ActionOutcome, IssueMenuContext, MenuEntry, MenuLine};
use crate::browser;
use crate::client::LinearClient;
use crate::config::Settings;
use crate::controller::ViewController;
use crate::error::Result;
use crate::output;

use super::issues::print_detail;

const HELP: &str = "\
Commands:
  l               show the list
  r               refresh
  m               toolbar menu (sort, status, project)
  m <n>           run toolbar entry n
  i <row>         actions for an issue
  i <row> <n>     run action n for an issue
  d <row>         issue details
  c               clear filters
  h               help
  q               quit";

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    List,
    Refresh,
    Toolbar(Option<usize>),
    IssueMenu(usize, Option<usize>),
    Detail(usize),
    ClearFilters,
    Help,
    Quit,
    Unknown(String),
}

fn parse(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let mut number = || words.next().and_then(|w| w.parse::<usize>().ok());

    let input = match command {
        "l" | "list" => Input::List,
        "r" | "refresh" => Input::Refresh,
        "m" | "menu" => Input::Toolbar(number()),
        "i" | "issue" => match number() {
            Some(row) => Input::IssueMenu(row, number()),
            None => Input::Unknown(line.to_string()),
        },
        "d" | "detail" => match number() {
            Some(row) => Input::Detail(row),
            None => Input::Unknown(line.to_string()),
        },
        "c" | "clear" => Input::ClearFilters,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    };
    Some(input)
}

pub async fn run(client: LinearClient, settings: Settings) -> Result<()> {
    let mut controller = ViewController::new(client, settings);
    controller.refresh();
    println!("{}", controller.status_line());
    println!("{HELP}");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            current = controller.next_completion() => {
                if current {
                    print_list(&controller);
                    prompt()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(input) = parse(&line) else {
                    prompt()?;
                    continue;
                };
                if input == Input::Quit {
                    break;
                }
                handle(&mut controller, input);
                prompt()?;
            }
        }
    }

    Ok(())
}

fn handle(controller: &mut ViewController, input: Input) {
    match input {
        Input::List => print_list(controller),
        Input::Refresh => {
            // Same path as the toolbar so the enabled check applies.
            let entries = actions::toolbar(controller);
            match actions::dispatch(&entries, controller, 0) {
                Some(outcome) => report(controller, outcome),
                None => println!("Refresh already in progress"),
            }
        }
        Input::Toolbar(None) => {
            let entries = actions::toolbar(controller);
            print_menu(&actions::render(&entries, controller));
        }
        Input::Toolbar(Some(n)) => {
            let entries = actions::toolbar(controller);
            match n.checked_sub(1).and_then(|i| actions::dispatch(&entries, controller, i)) {
                Some(outcome) => report(controller, outcome),
                None => println!("No enabled menu entry {n}"),
            }
        }
        Input::IssueMenu(row, action) => {
            let Some(issue) = row_issue(controller, row) else {
                println!("No issue at row {row}");
                return;
            };
            let entries = actions::issue_menu(&issue);
            let mut ctx = IssueMenuContext {
                issue,
                branch_format: controller.settings().preferences.branch_format().to_string(),
            };
            run_issue_menu(&entries, &mut ctx, action, controller);
        }
        Input::Detail(row) => match row_issue(controller, row) {
            Some(issue) => print_detail(&issue),
            None => println!("No issue at row {row}"),
        },
        Input::ClearFilters => {
            controller.clear_filters();
            print_list(controller);
        }
        Input::Help => println!("{HELP}"),
        Input::Unknown(text) => println!("Unknown command '{text}'. Type h for help."),
        Input::Quit => {}
    }
}

fn run_issue_menu(
    entries: &[MenuEntry<IssueMenuContext>],
    ctx: &mut IssueMenuContext,
    action: Option<usize>,
    controller: &ViewController,
) {
    match action {
        None => print_menu(&actions::render(entries, ctx)),
        Some(n) => match n.checked_sub(1).and_then(|i| actions::dispatch(entries, ctx, i)) {
            Some(outcome) => report(controller, outcome),
            None => println!("No enabled action {n}"),
        },
    }
}

fn row_issue(controller: &ViewController, row: usize) -> Option<crate::types::Issue> {
    row.checked_sub(1)
        .and_then(|i| controller.visible_issue(i))
        .cloned()
}

fn report(controller: &ViewController, outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Copy(text) => println!("{} {text}", "Copied:".green()),
        ActionOutcome::Open(url) => {
            if !browser::open_url(&url) {
                println!("Could not launch a browser. Link: {url}");
            }
        }
        ActionOutcome::Refreshing => println!("{}", controller.status_line()),
        ActionOutcome::Reselected => print_list(controller),
    }
}

fn print_list(controller: &ViewController) {
    let visible = controller.visible();
    if !visible.is_empty() {
        output::print_issue_list(&visible);
    }
    let selection = controller.selection();
    if selection.has_filters() {
        let chips = selection.active_filters();
        println!("{}  Filters: {}", controller.status_line(), chips.join(", "));
    } else {
        println!("{}", controller.status_line());
    }
}

fn print_menu(lines: &[MenuLine]) {
    for line in lines {
        let marker = line.marker.unwrap_or(" ");
        let text = format!("{:>3}. {marker} {}", line.index + 1, line.label);
        if line.enabled {
            println!("{text}");
        } else {
            println!("{}", text.bright_black());
        }
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
