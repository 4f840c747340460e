use std::hint::black_box;
use std::time::{Duration, Instant};

/// Iterations of [`burn_cpu`] used by the priority demonstration when none
/// is configured. Takes a perceptible fraction of a second on current hardware.
pub const DEFAULT_ITERATIONS: u64 = 300_000_000;

/// Identical CPU-bound unit of work: sums `0..iterations`.
///
/// Every step goes through [`black_box`] so the loop is not folded into a
/// closed form.
pub fn burn_cpu(iterations: u64) -> u64 {
    (0..iterations).fold(0u64, |acc, i| black_box(acc.wrapping_add(i)))
}

/// Runs [`burn_cpu`] and reports how long it took on the wall clock.
pub fn timed_burn(iterations: u64) -> (u64, Duration) {
    let start = Instant::now();
    let sum = burn_cpu(iterations);
    (sum, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_the_range() {
        assert_eq!(burn_cpu(0), 0);
        assert_eq!(burn_cpu(5), 10);
        assert_eq!(burn_cpu(1_000), 499_500);
    }

    #[test]
    fn timing_is_reported() {
        let (sum, elapsed) = timed_burn(10_000);
        assert_eq!(sum, 49_995_000);
        assert!(elapsed < Duration::from_secs(5));
    }
}
