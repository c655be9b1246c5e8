use std::cmp::Ordering;

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::catalog::{Catalog, Resources, Task};
use crate::combinations::IndexCombinations;
use crate::config::Config;
use crate::is_cancelled::IsCancelled;
use crate::logging;
use crate::top_n::TopN;
use crate::weights::WeightVector;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("ranking was cancelled")]
    Cancelled,
    #[error("failed to start scoring threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IsCancelled for Error {
    fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub subset_size: usize,
    pub top_n: usize,
    pub weights: WeightVector,
}

impl Query {
    pub fn new(weights: WeightVector, config: &Config) -> Self {
        Self {
            subset_size: config.subset_size,
            top_n: config.top_n,
            weights,
        }
    }

    fn validate(&self) -> Result<()> {
        match self.weights.iter().find(|(_, w)| !w.is_finite()) {
            Some((name, w)) => Err(Error::InvalidArgument(format!(
                "{name} weight must be finite, got {w}"
            ))),
            None => Ok(()),
        }
    }
}

/// A combination of catalog positions with its summed costs and weighted score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCombination {
    /// Ascending catalog indices, in enumeration order.
    pub indices: Vec<usize>,
    pub totals: Resources,
    pub score: f64,
}

impl ScoredCombination {
    fn evaluate(catalog: &Catalog, indices: Vec<usize>, weights: &WeightVector) -> Result<Self> {
        let tasks = catalog.tasks();
        let totals: Resources = indices.iter().map(|&i| &tasks[i].cost).sum();
        let score = totals.dot(weights);
        // Any overflowing total also makes the score inf or NaN
        if !score.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "score of combination {indices:?} is not finite ({score}); resource totals overflow"
            )));
        }
        Ok(Self {
            indices,
            totals,
            score,
        })
    }

    pub fn tasks<'a>(&self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Task> {
        self.indices.iter().filter_map(|&i| catalog.get(i))
    }
}

/// `Less` when `a` ranks ahead of `b`: higher score first, then earlier in
/// enumeration order. Index tuples are compared lexicographically, which is
/// exactly the enumeration order.
/// Adding `0.0` folds `-0.0` into `0.0` so the two tie.
pub(crate) fn rank_order(a: &ScoredCombination, b: &ScoredCombination) -> Ordering {
    (b.score + 0.0)
        .total_cmp(&(a.score + 0.0))
        .then_with(|| a.indices.cmp(&b.indices))
}

/// Scores every `subset_size` combination of the catalog and returns the
/// `top_n` best, highest score first.
///
/// Enumeration is exhaustive (`C(n, subset_size)` combinations are scored),
/// but only `top_n` of them are held in memory at once. The output equals
/// scoring all of them, stable-sorting by descending score and truncating.
pub fn rank(catalog: &Catalog, query: &Query) -> Result<Vec<ScoredCombination>> {
    query.validate()?;
    let combinations = IndexCombinations::new(catalog.len(), query.subset_size);
    log_work(&combinations, query);

    let top = select(catalog, query, combinations.iter(), usize::MAX, || false)?;
    Ok(top.into_sorted_vec())
}

/// Same as [`rank`], but gives up with [`Error::Cancelled`] once `token` is
/// cancelled. The token is polled every `check_interval` combinations.
pub fn rank_cancellable(
    catalog: &Catalog,
    query: &Query,
    token: &CancellationToken,
    check_interval: usize,
) -> Result<Vec<ScoredCombination>> {
    query.validate()?;
    let combinations = IndexCombinations::new(catalog.len(), query.subset_size);
    log_work(&combinations, query);

    let top = select(
        catalog,
        query,
        combinations.iter(),
        check_interval,
        || token.is_cancelled(),
    )?;
    Ok(top.into_sorted_vec())
}

/// Splits the enumeration by smallest chosen index and scores the runs on
/// `threads` workers. Each run keeps a local top-N; the merge orders by score
/// and then index tuple, so the output does not depend on which worker
/// finishes first and matches [`rank`] exactly.
pub fn rank_parallel(
    catalog: &Catalog,
    query: &Query,
    threads: usize,
    token: &CancellationToken,
    check_interval: usize,
) -> Result<Vec<ScoredCombination>> {
    let combinations = IndexCombinations::new(catalog.len(), query.subset_size);
    // The empty combination has no first index to split on
    if query.subset_size == 0 || threads <= 1 {
        return rank_cancellable(catalog, query, token, check_interval);
    }

    query.validate()?;
    log_work(&combinations, query);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    let top = pool.install(|| {
        combinations
            .partitions()
            .into_par_iter()
            .map(|first| {
                select(
                    catalog,
                    query,
                    combinations.starting_with(first),
                    check_interval,
                    || token.is_cancelled(),
                )
            })
            .try_reduce(
                || TopN::new(query.top_n),
                |mut acc, part| {
                    acc.merge(part);
                    Ok(acc)
                },
            )
    })?;
    Ok(top.into_sorted_vec())
}

fn select(
    catalog: &Catalog,
    query: &Query,
    combinations: impl Iterator<Item = Vec<usize>>,
    check_interval: usize,
    is_cancelled: impl Fn() -> bool,
) -> Result<TopN> {
    let check_interval = check_interval.max(1);
    let mut top = TopN::new(query.top_n);

    for (seen, indices) in combinations.enumerate() {
        if seen % check_interval == 0 && is_cancelled() {
            return Err(Error::Cancelled);
        }
        top.push(ScoredCombination::evaluate(
            catalog,
            indices,
            &query.weights,
        )?);
    }

    Ok(top)
}

fn log_work(combinations: &IndexCombinations, query: &Query) {
    logging::info!(
        "scoring {} combinations of {} tasks, keeping the best {}",
        combinations.count(),
        query.subset_size,
        query.top_n
    );
}
