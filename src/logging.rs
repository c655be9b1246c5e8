use crate::args::DebugVerbosityLevel;
use std::sync::atomic::{AtomicU8, Ordering};

static CURRENT_VERBOSITY: AtomicU8 = AtomicU8::new(DebugVerbosityLevel::Warning as u8);

pub fn init(verbosity: DebugVerbosityLevel) {
    CURRENT_VERBOSITY.store(verbosity as u8, Ordering::Relaxed);
}

pub fn enabled(verbosity: DebugVerbosityLevel) -> bool {
    CURRENT_VERBOSITY.load(Ordering::Relaxed) >= verbosity as u8
}

pub(crate) fn log_msg_impl(
    verbosity: DebugVerbosityLevel,
    args: std::fmt::Arguments,
    file: &str,
    line: u32,
) {
    if !enabled(verbosity) {
        return;
    }

    let level = match verbosity {
        DebugVerbosityLevel::Quiet => return,
        DebugVerbosityLevel::Error => "ERROR",
        DebugVerbosityLevel::Warning => "WARNING",
        DebugVerbosityLevel::Info => "INFO",
    };
    eprintln!("{level}: [{file}:{line}] {args}");
}

macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logging::log_msg_impl(
            $crate::args::DebugVerbosityLevel::Info,
            format_args!($($arg)*),
            file!(),
            line!()
        )
    };
}

macro_rules! warning {
    ($($arg:tt)*) => {
        $crate::logging::log_msg_impl(
            $crate::args::DebugVerbosityLevel::Warning,
            format_args!($($arg)*),
            file!(),
            line!()
        )
    };
}

macro_rules! error_msg {
    ($($arg:tt)*) => {
        $crate::logging::log_msg_impl(
            $crate::args::DebugVerbosityLevel::Error,
            format_args!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Logs an error with its whole context chain, tagged with the caller's location.
#[track_caller]
pub fn log_error(e: &anyhow::Error) {
    let location = std::panic::Location::caller();
    log_msg_impl(
        DebugVerbosityLevel::Error,
        format_args!("{e:#}"),
        location.file(),
        location.line(),
    );
}

pub(crate) use error_msg;
pub(crate) use info;
pub(crate) use warning;
