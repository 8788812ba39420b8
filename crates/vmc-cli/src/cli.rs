//! CLI argument definitions for college-finder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use vmc_model::EducationLevel;

#[derive(Parser)]
#[command(
    name = "college-finder",
    version,
    about = "Find colleges by stream, specialization and city",
    long_about = "Look up colleges in the student college directory.\n\n\
                  Filter by education level, stream, specialization and city,\n\
                  or search by college name. `browse` starts an interactive\n\
                  session with the full filter form."
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

    /// Allow student names to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Config file (default: platform config dir/college-finder/config.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory API base URL (overrides the config file).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Rows per results page (overrides the config file).
    #[arg(long = "page-size", value_name = "N", global = true)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the streams offered at each education level.
    Streams(StreamsArgs),

    /// List specializations offered under a stream.
    Specializations(StreamArgs),

    /// List cities with colleges for an undergraduate stream.
    Cities(StreamArgs),

    /// List colleges for a stream and specialization.
    Colleges(CollegesArgs),

    /// Search colleges by name.
    Search(SearchArgs),

    /// Fill in the filter form interactively.
    Browse,
}

#[derive(Args)]
pub struct StreamsArgs {
    /// Only show streams for this level.
    #[arg(long = "level", value_enum)]
    pub level: Option<LevelArg>,
}

#[derive(Args)]
pub struct StreamArgs {
    #[arg(long = "stream", value_name = "STREAM")]
    pub stream: String,
}

#[derive(Args)]
pub struct CollegesArgs {
    #[arg(long = "stream", value_name = "STREAM")]
    pub stream: String,

    #[arg(long = "specialization", value_name = "NAME")]
    pub specialization: String,

    /// City filter; "All" matches every city.
    #[arg(long = "city", value_name = "CITY")]
    pub city: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in college names.
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Page of results to show.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LevelArg {
    #[value(alias = "undergraduate")]
    Ug,
    #[value(alias = "postgraduate")]
    Pg,
}

impl From<LevelArg> for EducationLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Ug => EducationLevel::Undergraduate,
            LevelArg::Pg => EducationLevel::Postgraduate,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
