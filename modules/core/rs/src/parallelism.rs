use std::num::NonZeroUsize;
use std::thread::available_parallelism;

use eyre::Result;

/// Resolve a signed worker request against `max` cores:
/// - positive values are used as-is, capped at `max`
/// - zero falls back to a single worker
/// - negative values count back from `max` (-1 = all cores, -2 = all but one, ...)
fn resolve(requested: isize, max: usize) -> NonZeroUsize {
    let max = max.max(1) as isize;
    let resolved = if requested < 0 {
        (max + requested + 1).max(1)
    } else {
        requested.clamp(1, max)
    };
    NonZeroUsize::new(resolved as usize).unwrap_or(NonZeroUsize::MIN)
}

/// Number of threads to use for the `requested` signed worker count on this machine.
pub fn available(requested: isize) -> Result<NonZeroUsize> {
    let max = available_parallelism()?.get();
    Ok(resolve(requested, max))
}
