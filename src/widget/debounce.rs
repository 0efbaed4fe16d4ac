use std::{future, pin::Pin, time::Duration};

use tokio::time::{sleep, Sleep};

/// Trailing-edge debounce over search input.
///
/// Holds at most one armed timer and the latest value typed while it was
/// armed. Every new value re-arms the timer, so only the last value of a
/// burst is ever handed back.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    armed: Option<(Pin<Box<Sleep>>, String)>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Debouncer { quiet, armed: None }
    }

    /// A debouncer that lets every value through immediately.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.quiet.is_zero()
    }

    /// Take in a newly typed value.
    ///
    /// Returns the value straight back when debouncing is off. Otherwise the
    /// value waits for [`Debouncer::fired`] and any earlier waiting value is
    /// dropped.
    pub fn submit(&mut self, value: String) -> Option<String> {
        if !self.is_enabled() {
            return Some(value);
        }
        self.armed = Some((Box::pin(sleep(self.quiet)), value));
        None
    }

    /// Wait for the armed timer and return the value it was holding.
    ///
    /// Never resolves while nothing is armed. Dropping the future before it
    /// resolves leaves the timer armed.
    pub async fn fired(&mut self) -> String {
        let Some((timer, _)) = self.armed.as_mut() else {
            return future::pending().await;
        };
        timer.as_mut().await;

        self.armed.take().map(|(_, value)| value).unwrap_or_default()
    }

    /// Disarm and return the waiting value, if any.
    pub fn flush(&mut self) -> Option<String> {
        self.armed.take().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{advance, timeout, Instant};

    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn fires_once_with_the_last_value() {
        let mut debouncer = Debouncer::new(QUIET);
        assert_eq!(debouncer.submit("a".to_owned()), None);
        assert_eq!(debouncer.submit("ap".to_owned()), None);
        assert_eq!(debouncer.submit("app".to_owned()), None);

        assert_eq!(debouncer.fired().await, "app");
        assert_eq!(debouncer.flush(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn new_value_resets_the_interval() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.submit("a".to_owned());
        advance(Duration::from_millis(200)).await;
        debouncer.submit("ap".to_owned());

        assert_eq!(debouncer.fired().await, "ap");
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wait_keeps_the_timer() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.submit("soup".to_owned());

        let early = timeout(Duration::from_millis(100), debouncer.fired()).await;
        assert!(early.is_err());
        assert_eq!(debouncer.fired().await, "soup");
    }

    #[tokio::test(start_paused = true)]
    async fn unarmed_never_fires() {
        let mut debouncer = Debouncer::new(QUIET);
        let result = timeout(Duration::from_secs(10), debouncer.fired()).await;
        assert!(result.is_err());
    }

    #[test]
    fn disabled_passes_values_through() {
        let mut debouncer = Debouncer::disabled();
        assert_eq!(debouncer.submit("a".to_owned()), Some("a".to_owned()));
        assert_eq!(debouncer.flush(), None);
    }

    #[tokio::test]
    async fn flush_takes_the_waiting_value() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.submit("stew".to_owned());
        assert_eq!(debouncer.flush(), Some("stew".to_owned()));
        assert_eq!(debouncer.flush(), None);
    }
}
