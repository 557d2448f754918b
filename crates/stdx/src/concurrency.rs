use std::num::NonZeroUsize;

/// The number of threads CPU-bound work should be spread across, one per
/// hardware thread reported by the OS.
pub fn available_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or_else(|err| {
        tracing::debug!(%err, "could not query available parallelism, using a single worker");
        NonZeroUsize::MIN
    })
}

#[cfg(test)]
mod tests {
    #[test]
    fn at_least_one_worker() {
        assert!(super::available_workers().get() >= 1);
    }
}
