use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DebugVerbosityLevel {
    Quiet = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
}

/// Pick the best fixed-size sets of logistics tasks for a resource weighting.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Comma-separated task catalog: level, task no, manpower, ammo, food, parts
    pub catalog: PathBuf,

    /// Weight applied to total manpower
    #[arg(long, allow_hyphen_values = true)]
    pub manpower: String,

    /// Weight applied to total ammo
    #[arg(long, allow_hyphen_values = true)]
    pub ammo: String,

    /// Weight applied to total food
    #[arg(long, allow_hyphen_values = true)]
    pub food: String,

    /// Weight applied to total parts
    #[arg(long, allow_hyphen_values = true)]
    pub parts: String,

    /// Number of combinations to report
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Number of tasks in each combination
    #[arg(short = 'k', long)]
    pub subset_size: Option<usize>,

    /// Worker threads used to score combinations
    #[arg(short = 'p', long)]
    pub threads: Option<usize>,

    #[arg(long, value_enum, ignore_case = true, default_value = "table")]
    pub output_mode: OutputMode,

    #[arg(long, value_enum, default_value = "warning")]
    pub debug_verbosity: DebugVerbosityLevel,
}
