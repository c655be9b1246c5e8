use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::args::{Args, DebugVerbosityLevel, OutputMode};
use crate::config::Config;
use crate::is_cancelled::IsErrorCancelled;
use crate::optimizer::Query;
use crate::weights::WeightVector;
use crate::{catalog, logging, optimizer, report, signal_handler};

const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

/// Loads the catalog, validates the weights and prints the best combinations.
pub async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = Config::new(&args);

    let catalog = catalog::load(&args.catalog)
        .await
        .with_context(|| format!("cannot start without a catalog ({})", args.catalog.display()))?;
    logging::info!(
        "loaded {} tasks from {}",
        catalog.len(),
        args.catalog.display()
    );

    let weights =
        match WeightVector::parse_fields(&args.manpower, &args.ammo, &args.food, &args.parts) {
            Ok(weights) => weights,
            Err(e) => {
                logging::error_msg!("{e}");
                return Ok(ExitCode::from(EXIT_INVALID_INPUT));
            }
        };

    if catalog.is_empty() {
        logging::warning!("{} contains no tasks", args.catalog.display());
    } else if config.subset_size > catalog.len() {
        logging::warning!(
            "the catalog has {} tasks, so no combination of {} exists",
            catalog.len(),
            config.subset_size
        );
    }

    let token = CancellationToken::new();
    signal_handler::spawn_signal_handler(token.clone());

    let query = Query::new(weights, &config);
    let catalog = Arc::new(catalog);
    let joined = tokio::task::spawn_blocking({
        let catalog = catalog.clone();
        let token = token.clone();
        let config = config.clone();
        move || {
            if config.threads > 1 {
                optimizer::rank_parallel(
                    &catalog,
                    &query,
                    config.threads,
                    &token,
                    config.cancel_check_interval,
                )
            } else {
                optimizer::rank_cancellable(&catalog, &query, &token, config.cancel_check_interval)
            }
        }
    })
    .await;

    if joined.is_error_cancelled() {
        logging::warning!("scoring worker was cancelled");
        return Ok(ExitCode::from(EXIT_CANCELLED));
    }
    let outcome = joined.context("scoring worker failed")?;
    if outcome.is_error_cancelled() {
        logging::warning!("ranking interrupted, no result");
        return Ok(ExitCode::from(EXIT_CANCELLED));
    }
    let ranked = outcome.context("ranking failed")?;

    if logging::enabled(DebugVerbosityLevel::Info) {
        ranked
            .iter()
            .enumerate()
            .for_each(|(place, scored)| logging::info!("#{} score {}", place + 1, scored.score));
    }

    let rows = report::rows(&catalog, &ranked);
    match args.output_mode {
        OutputMode::Table => print!("{}", report::render_table(&rows, config.subset_size)),
        OutputMode::Json => println!(
            "{}",
            report::render_json(&rows).context("failed to serialize results")?
        ),
    }

    Ok(ExitCode::SUCCESS)
}
