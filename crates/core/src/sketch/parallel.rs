use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::error::{DossierError, Result};

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Applies `f` to every item on a bounded pool of `threads` workers
/// (default: available parallelism). Results keep the order of `items`; on
/// failure the error of the lowest-indexed failing item is returned.
pub(crate) fn map_or_first_error<T, R, F>(items: &[T], threads: Option<usize>, f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync,
{
    match items {
        [] => return Ok(Vec::new()),
        [item] => return Ok(vec![f(item)?]),
        _ => {}
    }

    let thread_count = threads
        .unwrap_or_else(default_thread_count)
        .clamp(1, items.len());

    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| DossierError::ThreadPool(e.to_string()))?;

    // Indexed parallel iterators collect in input order.
    let results: Vec<Result<R>> = pool.install(|| items.par_iter().map(&f).collect());

    results.into_iter().collect()
}
