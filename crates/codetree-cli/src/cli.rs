//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "codetree",
    version,
    about = "Organize hyphen-delimited codes into a browsable tree",
    long_about = "Organize hyphen-delimited codes (A-12-03) into a prefix tree.\n\n\
                  Codes are read one per line. Nodes can be checked, annotated,\n\
                  opened to a display depth, and saved to a JSON document."
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

    /// Engine configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a tree from a code list, apply edits and print it.
    Tree(TreeArgs),

    /// Print a previously saved tree.
    Show(ShowArgs),

    /// Print per-depth node counts for a code list.
    Summary(SummaryArgs),
}

#[derive(Args)]
pub struct TreeArgs {
    /// Text file with one code per line (`-` for stdin).
    #[arg(value_name = "CODES")]
    pub input: PathBuf,

    /// Keep only this many segments of each code.
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Apply a saved document's selection, annotations and display settings
    /// to the freshly built tree.
    #[arg(long = "restore", value_name = "DOCUMENT")]
    pub restore: Option<PathBuf>,

    /// Check a node and its subtree (repeatable).
    #[arg(long = "check", value_name = "CODE")]
    pub check: Vec<String>,

    /// Uncheck a node and its subtree (repeatable).
    #[arg(long = "uncheck", value_name = "CODE")]
    pub uncheck: Vec<String>,

    /// Flip a node's checkbox (repeatable).
    #[arg(long = "toggle", value_name = "CODE")]
    pub toggle: Vec<String>,

    /// Check everything, or uncheck everything if all roots are checked.
    #[arg(long = "toggle-all")]
    pub toggle_all: bool,

    /// Flip the highlight of a node (repeatable).
    #[arg(long = "annotate", value_name = "CODE")]
    pub annotate: Vec<String>,

    #[command(flatten)]
    pub display: DisplayArgs,

    /// Print only the checked leaf codes.
    #[arg(long = "checked")]
    pub checked_only: bool,

    /// Save the resulting tree to a JSON document.
    #[arg(long = "save", value_name = "DOCUMENT")]
    pub save: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Saved JSON document.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    #[command(flatten)]
    pub display: DisplayArgs,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Text file with one code per line (`-` for stdin).
    #[arg(value_name = "CODES")]
    pub input: PathBuf,

    /// Keep only this many segments of each code.
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Count selection and annotations from a saved document.
    #[arg(long = "restore", value_name = "DOCUMENT")]
    pub restore: Option<PathBuf>,
}

/// Visibility controls shared by commands that print a tree.
#[derive(Args)]
pub struct DisplayArgs {
    /// Open every node shallower than this depth.
    #[arg(long = "depth", value_name = "D")]
    pub depth: Option<usize>,

    /// Depth from which --expand-all and --collapse-all apply.
    #[arg(long = "threshold", value_name = "C")]
    pub threshold: Option<usize>,

    /// Open every node at or below the threshold depth.
    #[arg(long = "expand-all", conflicts_with = "collapse_all")]
    pub expand_all: bool,

    /// Close every node at or below the threshold depth.
    #[arg(long = "collapse-all")]
    pub collapse_all: bool,
}

/// Output controls.
#[derive(Args)]
pub struct ViewArgs {
    /// Label nodes with their full code instead of the last segment.
    #[arg(long = "full-codes")]
    pub full_codes: bool,

    /// Print collapsed subtrees too.
    #[arg(long = "all")]
    pub show_all: bool,
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
