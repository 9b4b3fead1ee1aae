//! Trailing-edge debouncing.
//!
//! A [`Debouncer`] holds at most one pending value. Recording a value
//! replaces the pending one and hands out a fresh [`Ticket`]; only the holder
//! of the latest ticket can take the value once its wait is over. Earlier
//! waits therefore fall through, which is what cancels them.

use std::cell::RefCell;
use std::time::Duration;

use crate::platform::Timer;

/// Proof of a particular [`Debouncer::record`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

struct Pending<T> {
    generation: u64,
    value: Option<T>,
}

/// Single-threaded trailing-edge debouncer.
pub struct Debouncer<T> {
    window: Duration,
    pending: RefCell<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: RefCell::new(Pending {
                generation: 0,
                value: None,
            }),
        }
    }

    /// The quiet window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace the pending value, invalidating every earlier ticket.
    pub fn record(&self, value: T) -> Ticket {
        let mut pending = self.pending.borrow_mut();
        pending.generation += 1;
        pending.value = Some(value);
        Ticket(pending.generation)
    }

    /// Take the pending value if `ticket` is still the latest.
    pub fn take_if_current(&self, ticket: Ticket) -> Option<T> {
        let mut pending = self.pending.borrow_mut();
        if pending.generation == ticket.0 {
            pending.value.take()
        } else {
            None
        }
    }

    /// Drop the pending value and invalidate every outstanding ticket.
    pub fn cancel(&self) {
        let mut pending = self.pending.borrow_mut();
        pending.generation += 1;
        pending.value = None;
    }

    /// Whether a value is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().value.is_some()
    }

    /// Record `value`, wait out the window, and return it unless a later
    /// call or [`cancel`](Self::cancel) superseded it in the meantime.
    pub async fn settle(&self, value: T, timer: &dyn Timer) -> Option<T> {
        let ticket = self.record(value);
        timer.sleep(self.window).await;
        self.take_if_current(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::TokioTimer;

    #[test]
    fn test_latest_ticket_takes_value() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let ticket = debouncer.record("a");

        assert!(debouncer.is_pending());
        assert_eq!(debouncer.take_if_current(ticket), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.take_if_current(ticket), None);
    }

    #[test]
    fn test_stale_ticket_gets_nothing() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let first = debouncer.record("a");
        let second = debouncer.record("ab");

        assert_eq!(debouncer.take_if_current(first), None);
        assert_eq!(debouncer.take_if_current(second), Some("ab"));
    }

    #[test]
    fn test_cancel_invalidates_ticket() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let ticket = debouncer.record("a");
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.take_if_current(ticket), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_only_last_call_wins() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let timer = TokioTimer;

        let (first, second) = tokio::join!(debouncer.settle("g", &timer), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            debouncer.settle("gu", &timer).await
        });

        assert_eq!(first, None);
        assert_eq!(second, Some("gu"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_after_quiet_period_both_apply() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let timer = TokioTimer;

        let (first, second) = tokio::join!(debouncer.settle("g", &timer), async {
            tokio::time::sleep(Duration::from_millis(400)).await;
            debouncer.settle("gu", &timer).await
        });

        assert_eq!(first, Some("g"));
        assert_eq!(second, Some("gu"));
    }
}
