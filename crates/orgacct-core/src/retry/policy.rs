use super::classify::RetriableStatuses;
use std::time::Duration;

/// Exponential backoff with jitter, bounded by a total elapsed-time ceiling.
///
/// The policy itself is immutable configuration; each call creates its own
/// `Backoff` to track progress.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Wait before the first retry (before jitter).
    pub initial_interval: Duration,
    /// Growth factor applied to the interval after each wait.
    pub multiplier: f64,
    /// Jitter spread: a wait is drawn from `interval * [1 - f, 1 + f]`.
    pub randomization_factor: f64,
    /// Upper bound on a single (pre-jitter) interval.
    pub max_interval: Duration,
    /// Give up once elapsed time plus the next wait would exceed this.
    pub max_elapsed: Duration,
    /// Statuses worth another attempt.
    pub retriable: RetriableStatuses,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 1.5,
            randomization_factor: 0.5,
            max_interval: Duration::from_secs(60),
            max_elapsed: Duration::from_secs(10),
            retriable: RetriableStatuses::default(),
        }
    }
}

impl RetryPolicy {
    /// Start a fresh backoff sequence for one call.
    pub fn backoff(&self) -> Backoff {
        Backoff::new(self, fastrand::Rng::new())
    }

    /// Like `backoff` but with a fixed jitter seed, for reproducible sequences.
    pub fn backoff_with_seed(&self, seed: u64) -> Backoff {
        Backoff::new(self, fastrand::Rng::with_seed(seed))
    }

    pub fn is_retriable(&self, status: u16) -> bool {
        self.retriable.contains(status)
    }
}

/// Per-call backoff progress. Never sleeps; it only answers "wait this long" or "stop".
#[derive(Debug, Clone)]
pub struct Backoff {
    current_interval: Duration,
    multiplier: f64,
    randomization_factor: f64,
    max_interval: Duration,
    max_elapsed: Duration,
    rng: fastrand::Rng,
}

impl Backoff {
    fn new(policy: &RetryPolicy, rng: fastrand::Rng) -> Self {
        Self {
            current_interval: policy.initial_interval,
            multiplier: policy.multiplier.max(1.0),
            randomization_factor: policy.randomization_factor.clamp(0.0, 1.0),
            max_interval: policy.max_interval,
            max_elapsed: policy.max_elapsed,
            rng,
        }
    }

    /// Next wait given how long the call has been running, or `None` once the
    /// wait would carry the call past the ceiling.
    ///
    /// A ceiling smaller than the first interval yields `None` immediately, so
    /// the caller performs zero retries rather than overshooting.
    pub fn next_backoff(&mut self, elapsed: Duration) -> Option<Duration> {
        let next = self.randomized_interval();
        self.grow();
        match elapsed.checked_add(next) {
            Some(total) if total <= self.max_elapsed => Some(next),
            _ => None,
        }
    }

    /// Interval the next call to `next_backoff` is centred on.
    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    fn randomized_interval(&mut self) -> Duration {
        let f = self.randomization_factor;
        if f == 0.0 {
            return self.current_interval;
        }
        let factor = 1.0 - f + 2.0 * f * self.rng.f64();
        scale(self.current_interval, factor)
    }

    fn grow(&mut self) {
        let grown = scale(self.current_interval, self.multiplier);
        self.current_interval = grown.min(self.max_interval);
    }
}

/// Multiply in whole nanoseconds so integral multipliers stay exact.
fn scale(d: Duration, factor: f64) -> Duration {
    let nanos = (d.as_nanos() as f64 * factor).round();
    if nanos >= u64::MAX as f64 {
        Duration::MAX
    } else {
        Duration::from_nanos(nanos as u64)
    }
}
