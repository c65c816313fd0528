//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// Oldest first (default)
    #[default]
    Asc,
    /// Newest first
    Desc,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "timelog")]
#[command(about = "Track time spent on projects from the command line", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Session database file
    #[arg(long, global = true, value_name = "PATH", env = "TIMELOG_DB")]
    pub(crate) db: Option<PathBuf>,

    /// Directory that CSV exports are written to
    #[arg(long, global = true, value_name = "DIR", env = "TIMELOG_EXPORT_DIR")]
    pub(crate) export_dir: Option<PathBuf>,

    /// Timezone for date display (e.g., "America/Los_Angeles", "UTC", "local")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Sort order for summaries and exports
    #[arg(short, long, global = true, value_enum, default_value = "asc")]
    pub(crate) order: SortOrder,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(order) = config.order
            && self.order == SortOrder::Asc
        {
            self.order = match order {
                ConfigSortOrder::Asc => SortOrder::Asc,
                ConfigSortOrder::Desc => SortOrder::Desc,
            };
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.db.is_none() {
            self.db = config.database.clone();
        }
        if self.export_dir.is_none() {
            self.export_dir = config.export_dir.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(default_db_path)
    }

    pub(crate) fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(default_export_dir)
    }
}

fn default_db_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("timelog").join("timelog.db"),
        None => PathBuf::from("timelog.db"),
    }
}

fn default_export_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join("Desktop").join("timelog_exports"),
        None => PathBuf::from("timelog_exports"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["timelog"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn config_fills_unset_options() {
        let config: Config = toml::from_str(
            r#"
            timezone = "UTC"
            database = "/tmp/t.db"
            export_dir = "/tmp/exports"
            order = "desc"
            color = "never"
            "#,
        )
        .unwrap();
        let cli = parse(&["--db", "/tmp/override.db", "stop"]).with_config(&config);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(cli.db_path(), PathBuf::from("/tmp/override.db"));
        assert_eq!(cli.export_dir(), PathBuf::from("/tmp/exports"));
        assert_eq!(cli.order, SortOrder::Desc);
        assert!(!cli.use_color());
    }

    #[test]
    fn explicit_cli_values_win() {
        let config: Config = toml::from_str(r#"timezone = "UTC""#).unwrap();
        let cli = parse(&["--timezone", "Asia/Tokyo", "current"]).with_config(&config);
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Tokyo"));
    }

    #[test]
    fn no_color_overrides_always() {
        let cli = parse(&["--color", "always", "--no-color", "stop"]);
        assert!(!cli.use_color());
        let cli = parse(&["--color", "always", "stop"]);
        assert!(cli.use_color());
    }
}
