//! Retry budgets and backoff schedules for transient failures.
//!
//! The retry decision itself is fixed by the error taxonomy
//! ([`ApiError::is_retryable`](crate::ApiError::is_retryable)); this module
//! only decides how many attempts a call gets and how long to wait between
//! them.

use rand::Rng;
use std::time::Duration;

/// How long to wait between retry attempts.
///
/// # Examples
///
/// ```
/// use pmo_client::Backoff;
/// use std::time::Duration;
///
/// // 1s, 2s, 4s, 8s... capped at 30s
/// let exponential = Backoff::exponential(Duration::from_secs(1));
///
/// // Fixed 100ms between attempts (useful in tests)
/// let fixed = Backoff::Fixed {
///     delay: Duration::from_millis(100),
/// };
/// ```
#[derive(Debug, Clone)]
pub enum Backoff {
    /// Wait `base * 2^attempt` (capped at `max`) before the next attempt.
    ///
    /// Optional jitter scales each delay by a random factor in [0.5, 1.0] to
    /// prevent thundering herd when many callers fail together.
    Exponential {
        /// Delay before the first retry.
        base: Duration,
        /// Upper bound on any single delay.
        max: Duration,
        /// Whether to randomize delays.
        jitter: bool,
    },

    /// Wait the same delay before every retry.
    Fixed {
        /// The delay between attempts.
        delay: Duration,
    },

    /// Retry immediately with no delay.
    None,
}

impl Backoff {
    /// Exponential backoff from the given base, capped at 30s, no jitter.
    pub fn exponential(base: Duration) -> Self {
        Backoff::Exponential {
            base,
            max: Duration::from_secs(30),
            jitter: false,
        }
    }

    /// Returns the delay to sleep after the given failed attempt.
    ///
    /// `attempt` is 0-indexed: attempt 0 is the first try, so the default
    /// exponential schedule sleeps 1s after it, then 2s, then 4s.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Exponential { base, max, jitter } => {
                let multiplier = 2u32.saturating_pow(attempt);
                let delay = base.saturating_mul(multiplier).min(*max);

                if *jitter {
                    let factor = rand::thread_rng().gen_range(0.5..=1.0);
                    delay.mul_f64(factor)
                } else {
                    delay
                }
            }
            Backoff::Fixed { delay } => *delay,
            Backoff::None => Duration::ZERO,
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::exponential(Duration::from_secs(1))
    }
}

/// Attempt budget plus backoff schedule for one logical call.
///
/// The default policy makes up to 3 attempts with 1s/2s gaps between them.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Never less than 1.
    pub max_attempts: u32,
    /// The backoff schedule between attempts.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// A policy with the given attempt budget and the default exponential
    /// backoff.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::default(),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Backoff::None,
        }
    }

    /// Replaces the backoff schedule.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns `true` if the given 0-indexed attempt is the last one allowed.
    pub fn is_last_attempt(&self, attempt: u32) -> bool {
        attempt + 1 >= self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_backoff_delays() {
        let backoff = Backoff::exponential(Duration::from_secs(1));

        assert_eq!(backoff.delay_for(0), Duration::from_secs(1));
        assert_eq!(backoff.delay_for(1), Duration::from_secs(2));
        assert_eq!(backoff.delay_for(2), Duration::from_secs(4));
        assert_eq!(backoff.delay_for(3), Duration::from_secs(8));
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            base: Duration::from_secs(1),
            max: Duration::from_secs(5),
            jitter: false,
        };

        assert_eq!(backoff.delay_for(10), Duration::from_secs(5));
    }

    #[test]
    fn jitter_stays_within_half_to_full_delay() {
        let backoff = Backoff::Exponential {
            base: Duration::from_secs(2),
            max: Duration::from_secs(30),
            jitter: true,
        };

        for _ in 0..50 {
            let delay = backoff.delay_for(0);
            assert!(delay >= Duration::from_secs(1));
            assert!(delay <= Duration::from_secs(2));
        }
    }

    #[test]
    fn fixed_and_none_delays() {
        let fixed = Backoff::Fixed {
            delay: Duration::from_millis(250),
        };
        assert_eq!(fixed.delay_for(0), Duration::from_millis(250));
        assert_eq!(fixed.delay_for(7), Duration::from_millis(250));

        assert_eq!(Backoff::None.delay_for(0), Duration::ZERO);
    }

    #[test]
    fn default_policy_allows_three_attempts() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_attempts, 3);
        assert!(!policy.is_last_attempt(0));
        assert!(!policy.is_last_attempt(1));
        assert!(policy.is_last_attempt(2));
    }

    #[test]
    fn attempt_budget_never_drops_below_one() {
        let policy = RetryPolicy::new(0);

        assert_eq!(policy.max_attempts, 1);
        assert!(policy.is_last_attempt(0));
    }
}
