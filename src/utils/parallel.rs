#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
use rayon::prelude::*;

/// Below this many items the sequential path is used even with `parallel` on.
pub const PARALLEL_THRESHOLD: usize = 1000;

/// Maps every item through `f`, keeping input order.
///
/// Switches to rayon when the `parallel` feature is enabled, the target is not
/// wasm, and the slice is large enough to be worth the thread pool.
#[inline]
pub fn map<T, R, F>(collection: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    {
        if collection.len() > PARALLEL_THRESHOLD {
            collection.par_iter().map(f).collect()
        } else {
            collection.iter().map(f).collect()
        }
    }
    #[cfg(any(not(feature = "parallel"), target_arch = "wasm32"))]
    {
        collection.iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_order_on_both_paths() {
        let small: Vec<i64> = (0..10).collect();
        assert_eq!(map(&small, |x| x * 2), (0..10).map(|x| x * 2).collect::<Vec<_>>());

        let large: Vec<i64> = (0..(PARALLEL_THRESHOLD as i64 * 3)).collect();
        let doubled = map(&large, |x| x * 2);
        assert_eq!(doubled.len(), large.len());
        assert!(doubled.iter().enumerate().all(|(i, &v)| v == i as i64 * 2));
    }
}
