use std::{thread, time::Duration};

/// Re-runs a fallible operation with a fixed delay between attempts.
///
/// `attempts` counts retries, so an operation that keeps failing is run
/// `attempts + 1` times in total.
#[derive(SmartDefault, Debug, Clone, Copy, PartialEq)]
pub struct Retry {
    #[default = 3]
    attempts: u64,
    #[default = 1000]
    interval: u64,
}

impl Retry {
    pub fn attempts(mut self, attempts: u64) -> Self {
        self.attempts = attempts;
        self
    }

    /// Milliseconds to sleep after each failed attempt.
    pub fn interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Runs `func` until it succeeds or the attempts are exhausted, returning the
    /// error of the final attempt.
    ///
    /// The closure receives the zero-based attempt number.
    pub fn retry_until_ok<F, T, E>(&self, func: F) -> Result<T, E>
    where
        F: FnMut(u64) -> Result<T, E>,
    {
        self.retry_while(func, |_| true)
    }

    /// Like `retry_until_ok`, but an error for which `retryable` returns false is
    /// returned immediately.
    pub fn retry_while<F, P, T, E>(&self, mut func: F, mut retryable: P) -> Result<T, E>
    where
        F: FnMut(u64) -> Result<T, E>,
        P: FnMut(&E) -> bool,
    {
        let duration = Duration::from_millis(self.interval);
        let mut attempt = 0;
        loop {
            match func(attempt) {
                Ok(value) => return Ok(value),
                Err(why) => {
                    if attempt == self.attempts || !retryable(&why) {
                        return Err(why);
                    } else {
                        attempt += 1;
                        thread::sleep(duration);
                    }
                }
            }
        }
    }
}
