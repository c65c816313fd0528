//! CLI subcommand definitions

use clap::{Args, Subcommand};

use crate::core::SessionFilter;
use crate::error::AppError;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start a new time tracking session
    Start {
        /// Project name (prompts with the configured project list if omitted)
        #[arg(short, long)]
        project: Option<String>,
        /// Task description (prompts if omitted)
        #[arg(short, long)]
        task: Option<String>,
        /// Stop an already running session without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Stop the currently active session
    Stop,
    /// Show the currently active session
    Current,
    /// Show recorded sessions
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Delete a session by ID
    Remove {
        /// ID of the session to delete
        #[arg(allow_negative_numbers = true)]
        session_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Export sessions to a CSV file
    Export {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Session selection flags shared by `summary` and `export`
#[derive(Debug, Args)]
pub(crate) struct FilterArgs {
    /// Only sessions started today (local time)
    #[arg(short, long)]
    pub(crate) today: bool,
    /// Only sessions started this week (since Monday 00:00 UTC)
    #[arg(short, long)]
    pub(crate) week: bool,
    /// Range start, 00:00 UTC on this day (YYYY-MM-DD; needs --end)
    #[arg(short, long, value_name = "DATE")]
    pub(crate) start: Option<String>,
    /// Range end, 00:00 UTC on this day (YYYY-MM-DD; needs --start)
    #[arg(short, long, value_name = "DATE")]
    pub(crate) end: Option<String>,
}

impl FilterArgs {
    pub(crate) fn to_filter(&self) -> Result<SessionFilter, AppError> {
        SessionFilter::from_flags(
            self.today,
            self.week,
            self.start.as_deref(),
            self.end.as_deref(),
        )
    }
}
