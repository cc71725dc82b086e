use std::io::{self, Write};

use crate::client::LinearClient;
use crate::config::{
    CredentialStore, FileCredentialStore, Preferences, CREDENTIAL_SERVICE, DEFAULT_BRANCH_FORMAT,
};
use crate::error::Result;

pub async fn run() -> Result<()> {
    let store = FileCredentialStore::default_location()?;
    let current = Preferences::load()?;
    let previous_key = store.get(CREDENTIAL_SERVICE)?;

    println!("Linear Viewer Configuration");
    println!("===========================\n");

    let api_key = prompt(
        "Enter your Linear API key (create one at https://linear.app/settings/api)",
        previous_key.as_deref().map(|_| "keep current"),
    )?;
    let api_key = if api_key.is_empty() {
        previous_key.clone()
    } else {
        Some(api_key)
    };

    let only_mine = prompt(
        "Show only issues assigned to you? [Y/n]",
        Some(if current.show_only_my_issues { "y" } else { "n" }),
    )?;
    let show_only_my_issues = match only_mine.as_str() {
        "" => current.show_only_my_issues,
        answer => !answer.eq_ignore_ascii_case("n"),
    };

    println!("Branch name placeholders: {{id}} = eng-123, {{ID}} = ENG-123, {{title}} = issue-title");
    let format = prompt("Branch name format", Some(current.branch_name_format.as_str()))?;
    let branch_name_format = if format.is_empty() {
        current.branch_name_format.clone()
    } else {
        format
    };

    let preferences = Preferences {
        show_only_my_issues,
        branch_name_format,
    };
    let prefs_path = preferences.save()?;
    store.set(CREDENTIAL_SERVICE, api_key.as_deref())?;

    println!("\nPreferences saved to {}", prefs_path.display());
    println!("API key saved to {}", store.path().display());

    if api_key.is_none() {
        println!("No API key configured yet. Run 'linear-viewer init' again once you have one.");
        return Ok(());
    }

    print!("Testing connection... ");
    io::stdout().flush()?;

    match LinearClient::new(api_key).test_connection().await {
        Ok(user) => println!("Connected as {}", user.name),
        Err(e) => {
            println!("Error: {e}");
            store.set(CREDENTIAL_SERVICE, previous_key.as_deref())?;
            println!("Restored the previously stored API key.");
        }
    }

    if preferences.branch_name_format.trim().is_empty() {
        println!("Empty branch format; '{DEFAULT_BRANCH_FORMAT}' will be used.");
    }

    Ok(())
}

fn prompt(question: &str, current: Option<&str>) -> io::Result<String> {
    match current {
        Some(current) => print!("{question} [{current}]: "),
        None => print!("{question}: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
