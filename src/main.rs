use std::io;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use linear_viewer::cli::{Cli, Commands};
use linear_viewer::client::LinearClient;
use linear_viewer::commands;
use linear_viewer::config::Settings;
use linear_viewer::controller::MISSING_KEY_STATUS;
use linear_viewer::error::{FetchError, ViewerError};
use linear_viewer::output;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<ViewerError>() {
            Some(ViewerError::Fetch(FetchError::Unauthenticated)) => {
                eprintln!("Error: {MISSING_KEY_STATUS}");
            }
            _ => eprintln!("Error: {e}"),
        }

        if verbose {
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {cause}");
            }
        }

        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("linear_viewer={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require settings/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "linear-viewer", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that require settings and client
        command => {
            let settings = Settings::load().context("Failed to load settings")?;
            let client = LinearClient::from_settings(&settings);

            match command {
                Commands::Issues(args) => {
                    commands::issues::list(&client, &settings, args).await?;
                }
                Commands::Projects(scope) => {
                    commands::issues::projects(&client, &settings, scope).await?;
                }
                Commands::View { id, scope } => {
                    commands::issues::view(&client, &settings, &id, scope).await?;
                }
                Commands::Branch { id, format, scope } => {
                    commands::issues::branch(&client, &settings, &id, format.as_deref(), scope)
                        .await?;
                }
                Commands::Open { id, scope } => {
                    commands::issues::open(&client, &settings, &id, scope).await?;
                }
                Commands::Browse(scope) => {
                    let mut settings = settings;
                    if let Some(only_mine) = scope.only_mine() {
                        settings.preferences.show_only_my_issues = only_mine;
                    }
                    commands::browse::run(client, settings).await?;
                }
                Commands::TestConnection => {
                    commands::connection::test(&client).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
