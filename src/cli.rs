use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::filter::{SortKey, StatusFilter};

#[derive(Parser)]
#[command(name = "linear-viewer")]
#[command(about = "Browse your Linear issues from the terminal", version)]
#[command(after_help = "EXAMPLES:
    linear-viewer issues                      List your open issues
    linear-viewer issues --sort priority      Most urgent first
    linear-viewer view ENG-123                Show issue details
    linear-viewer branch ENG-123              Print a branch name
    linear-viewer browse                      Interactive session")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List issues, filtered and sorted
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    linear-viewer issues --status started
    linear-viewer issues --project \"Backend\" --sort created --asc
    linear-viewer issues --all --sort status"
    )]
    Issues(IssueListArgs),
    /// List the projects present in the fetched issues
    #[command(after_help = "EXAMPLES:
    linear-viewer projects
    linear-viewer projects --all")]
    Projects(ScopeArgs),
    /// Show issue details with comments
    #[command(
        alias = "v",
        after_help = "EXAMPLES:
    linear-viewer view ENG-123"
    )]
    View {
        /// Issue identifier (e.g., ENG-123)
        id: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Print a branch name for an issue
    #[command(after_help = "EXAMPLES:
    linear-viewer branch ENG-123
    linear-viewer branch ENG-123 --format \"me/{id}\"
    git switch -c \"$(linear-viewer branch ENG-123)\"")]
    Branch {
        /// Issue identifier (e.g., ENG-123)
        id: String,
        /// Pattern with {id}, {ID} and {title} placeholders
        #[arg(long)]
        format: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Open an issue in the browser
    #[command(after_help = "EXAMPLES:
    linear-viewer open ENG-123")]
    Open {
        /// Issue identifier (e.g., ENG-123)
        id: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Interactive session with menus
    #[command(after_help = "EXAMPLES:
    linear-viewer browse
    linear-viewer browse --all")]
    Browse(ScopeArgs),
    /// Check that the configured API key works
    #[command(name = "test-connection")]
    TestConnection,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    linear-viewer completions bash > ~/.bash_completion.d/linear-viewer
    linear-viewer completions zsh > ~/.zfunc/_linear-viewer
    linear-viewer completions fish > ~/.config/fish/completions/linear-viewer.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Configure the API key and preferences interactively
    #[command(after_help = "EXAMPLES:
    linear-viewer init")]
    Init,
}

/// Which issues to fetch, overriding the saved preference.
#[derive(Args, Clone, Copy, Default)]
pub struct ScopeArgs {
    /// Only issues assigned to me
    #[arg(long, conflicts_with = "all")]
    pub mine: bool,

    /// All open issues, not just mine
    #[arg(long)]
    pub all: bool,
}

impl ScopeArgs {
    /// `Some(true)` for mine, `Some(false)` for all, `None` to use the preference.
    pub fn only_mine(self) -> Option<bool> {
        match (self.mine, self.all) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Clone)]
pub struct IssueListArgs {
    /// Filter by workflow state type
    #[arg(long, value_enum, default_value = "all")]
    pub status: StatusFilter,

    /// Filter by exact project name
    #[arg(long)]
    pub project: Option<String>,

    /// Sort key
    #[arg(long, value_enum, default_value = "updated")]
    pub sort: SortKey,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    #[command(flatten)]
    pub scope: ScopeArgs,
}
