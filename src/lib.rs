pub mod app;
pub mod args;
pub mod catalog;
pub mod combinations;
pub mod config;
pub mod is_cancelled;
pub mod logging;
pub mod optimizer;
pub mod report;
pub mod signal_handler;
pub mod top_n;
pub mod weights;
