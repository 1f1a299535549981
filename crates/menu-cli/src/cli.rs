//! CLI argument definitions for the weekly meal planner.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use menu_model::{DateKey, MealType};

#[derive(Parser)]
#[command(
    name = "weekmenu",
    version,
    about = "Weekly meal planner - breakfast, lunch and dinner for every day",
    long_about = "Plan a week of meals.\n\n\
                  Each day has breakfast, lunch and dinner slots holding any number of dishes.\n\
                  Dishes come from a personal catalog or free text. The plan can be exported\n\
                  to JSON, imported back, and saved as a static HTML page."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory holding the menu records (overrides the settings file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Settings file to read instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the menu grid of a week.
    Week(WeekArgs),

    /// Add a dish to the end of a slot.
    Add(AddArgs),

    /// Remove a dish from a slot by its position.
    Remove(RemoveArgs),

    /// Move a dish to the end of another slot.
    Move(MoveArgs),

    /// Manage the dish catalog.
    #[command(subcommand)]
    Dishes(DishesCommand),

    /// Export the whole menu as JSON.
    Export(ExportArgs),

    /// Replace the menu with a previously exported JSON file.
    Import(ImportArgs),

    /// Save a static HTML page of a week for offline viewing.
    Snapshot(SnapshotArgs),

    /// Show where settings and menu data are read from.
    Config,
}

/// Which week to show, relative to a date.
#[derive(Args, Clone, Copy)]
pub struct WeekSelection {
    /// Any day inside the week (default: today).
    #[arg(long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<DateKey>,

    /// Shift by whole weeks (-1 for the previous week, 1 for the next).
    #[arg(long = "offset", default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i64,
}

#[derive(Args)]
pub struct WeekArgs {
    #[command(flatten)]
    pub week: WeekSelection,
}

#[derive(Args)]
pub struct AddArgs {
    /// Day of the slot.
    #[arg(value_name = "YYYY-MM-DD")]
    pub date: DateKey,

    /// Meal of the slot (breakfast, lunch, dinner).
    #[arg(value_name = "MEAL")]
    pub meal: MealType,

    /// Dish name (free text unless --from-catalog is set).
    #[arg(value_name = "DISH")]
    pub dish: String,

    /// Require the dish to be in the catalog.
    #[arg(long = "from-catalog")]
    pub from_catalog: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    #[arg(value_name = "YYYY-MM-DD")]
    pub date: DateKey,

    #[arg(value_name = "MEAL")]
    pub meal: MealType,

    /// Position of the dish as shown by `week` (starting at 1).
    #[arg(value_name = "POSITION", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub position: usize,
}

#[derive(Args)]
pub struct MoveArgs {
    #[arg(value_name = "FROM_DATE")]
    pub from_date: DateKey,

    #[arg(value_name = "FROM_MEAL")]
    pub from_meal: MealType,

    /// Position of the dish in the source slot (starting at 1).
    #[arg(value_name = "POSITION", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub position: usize,

    #[arg(value_name = "TO_DATE")]
    pub to_date: DateKey,

    #[arg(value_name = "TO_MEAL")]
    pub to_meal: MealType,
}

#[derive(Subcommand)]
pub enum DishesCommand {
    /// List catalog dishes.
    List,

    /// Add a dish to the catalog.
    Add {
        #[arg(value_name = "DISH")]
        name: String,
    },

    /// Remove a dish from the catalog.
    Remove {
        #[arg(value_name = "DISH")]
        name: String,
    },
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: ./menu-plan.json).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file.
    #[arg(long = "stdout", conflicts_with = "output")]
    pub stdout: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file produced by `export`.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub week: WeekSelection,

    /// Output file (default: ./menu_view_<today>.html).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
