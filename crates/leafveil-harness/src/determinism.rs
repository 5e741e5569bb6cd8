#![forbid(unsafe_code)]

//! Deterministic fixtures for tests and playback harnesses.
//!
//! Centralizes seed selection and deterministic clocks so test runs are
//! reproducible: with `LEAFVEIL_TEST_DETERMINISTIC=1` the clock advances in
//! fixed steps instead of reading wall time, and the seed comes from
//! `LEAFVEIL_TEST_SEED` (falling back to the suite's default).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Shared deterministic fixture for a test run.
#[derive(Debug)]
pub struct DeterminismFixture {
    seed: u64,
    deterministic: bool,
    time_step_ms: u64,
    ms_counter: AtomicU64,
    start: Instant,
}

impl DeterminismFixture {
    /// Create a fixture from the environment, with a default seed.
    pub fn new(default_seed: u64) -> Self {
        Self::new_with(
            fixture_seed(default_seed),
            deterministic_mode(),
            fixture_time_step_ms(),
        )
    }

    /// Create a fixture with explicit configuration (used by tests).
    pub fn new_with(seed: u64, deterministic: bool, time_step_ms: u64) -> Self {
        Self {
            seed,
            deterministic,
            time_step_ms,
            ms_counter: AtomicU64::new(0),
            start: Instant::now(),
        }
    }

    /// Seed to construct fields with (`FlickerField::seeded`).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// True when deterministic mode is enabled.
    pub fn deterministic(&self) -> bool {
        self.deterministic
    }

    /// Fixed step of the deterministic clock, in milliseconds.
    pub fn time_step_ms(&self) -> u64 {
        self.time_step_ms
    }

    /// Return a monotonically increasing elapsed time in ms.
    ///
    /// Deterministic mode steps by `time_step_ms` per call; otherwise this
    /// reads the wall clock since fixture creation.
    pub fn now_ms(&self) -> u64 {
        if self.deterministic {
            self.ms_counter
                .fetch_add(self.time_step_ms, Ordering::Relaxed)
                .saturating_add(self.time_step_ms)
        } else {
            self.start.elapsed().as_millis() as u64
        }
    }
}

/// True when deterministic mode is enabled via environment.
pub fn deterministic_mode() -> bool {
    env_flag("LEAFVEIL_TEST_DETERMINISTIC") || env_flag("LEAFVEIL_DETERMINISTIC")
}

/// Choose a seed from environment or use the provided default.
pub fn fixture_seed(default_seed: u64) -> u64 {
    env_u64("LEAFVEIL_TEST_SEED")
        .or_else(|| env_u64("LEAFVEIL_SEED"))
        .unwrap_or(default_seed)
}

/// Time step in milliseconds for deterministic clocks.
pub fn fixture_time_step_ms() -> u64 {
    env_u64("LEAFVEIL_TEST_TIME_STEP_MS").unwrap_or(16)
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_clock_advances_by_step() {
        let fixture = DeterminismFixture::new_with(123, true, 7);
        assert_eq!(fixture.now_ms(), 7);
        assert_eq!(fixture.now_ms(), 14);
    }

    #[test]
    fn fixture_retains_explicit_configuration() {
        let fixture = DeterminismFixture::new_with(4242, true, 5);
        assert_eq!(fixture.seed(), 4242);
        assert!(fixture.deterministic());
        assert_eq!(fixture.time_step_ms(), 5);
    }

    #[test]
    fn wall_clock_mode_is_monotone() {
        let fixture = DeterminismFixture::new_with(1, false, 16);
        let a = fixture.now_ms();
        let b = fixture.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn env_helpers_handle_unset_vars() {
        assert_eq!(env_u64("__LEAFVEIL_NEVER_SET_U64_9d3a1f"), None);
        assert!(!env_flag("__LEAFVEIL_NEVER_SET_FLAG_9d3a1f"));
        assert_eq!(fixture_seed(12345), fixture_seed(12345));
    }
}
