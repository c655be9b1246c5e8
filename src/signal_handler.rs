use crate::logging::{error_msg, warning};
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;

/// Cancels `cancel_token` on the first SIGINT, SIGTERM, SIGHUP or SIGQUIT.
pub fn spawn_signal_handler(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        macro_rules! register_signal {
            ($kind:expr) => {
                match signal($kind) {
                    Ok(s) => s,
                    Err(e) => {
                        error_msg!("Failed to register signal handler: {e}");
                        return;
                    }
                }
            };
        }

        let mut sigint = register_signal!(SignalKind::interrupt());
        let mut sigterm = register_signal!(SignalKind::terminate());
        let mut sighup = register_signal!(SignalKind::hangup());
        let mut sigquit = register_signal!(SignalKind::quit());

        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
            _ = sighup.recv() => "SIGHUP",
            _ = sigquit.recv() => "SIGQUIT",
            _ = cancel_token.cancelled() => return,
        };

        warning!("received {name}, stopping");
        cancel_token.cancel();
    });
}
