use crate::args::Args;

pub const DEFAULT_SUBSET_SIZE: usize = 4;
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub subset_size: usize,
    pub top_n: usize,
    pub threads: usize,
    /// How many combinations are scored between two cancellation checks.
    pub cancel_check_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subset_size: DEFAULT_SUBSET_SIZE,
            top_n: DEFAULT_TOP_N,
            threads: 1,
            cancel_check_interval: 4096,
        }
    }
}

impl Config {
    pub fn new(args: &Args) -> Self {
        let default = Self::default();
        Self {
            subset_size: args.subset_size.unwrap_or(default.subset_size),
            top_n: args.top_n.unwrap_or(default.top_n),
            threads: args.threads.unwrap_or(default.threads).max(1),
            ..default
        }
    }
}
