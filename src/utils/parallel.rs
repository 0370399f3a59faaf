#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Below this many items the rayon fan-out costs more than it saves.
#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
const PARALLEL_THRESHOLD: usize = 1000;

/// Maps every item of `collection`, preserving order.
///
/// Runs on rayon for large inputs when the `parallel` feature is enabled.
/// Only use with pure functions: results must not depend on scheduling.
#[inline]
pub fn map<T, U, F>(collection: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    {
        if collection.len() > PARALLEL_THRESHOLD {
            return collection.par_iter().map(f).collect();
        }
        collection.iter().map(f).collect()
    }
    #[cfg(any(not(feature = "parallel"), target_arch = "wasm32"))]
    {
        collection.iter().map(f).collect()
    }
}
