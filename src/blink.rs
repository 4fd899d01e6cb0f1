//! Caret blink scheduling.
//!
//! [`CursorBlink`] is a cancellable repeating timer owned by one widget. It does
//! not spawn anything: the host event loop calls [`CursorBlink::poll`] with the
//! current time (or sleeps until [`CursorBlink::next_deadline`]) and redraws when
//! a poll reports a visibility change.
//!
//! ```text
//!            start(now)                       poll(now >= deadline)
//! STOPPED ---------------> RUNNING (hidden) -----------------------> RUNNING (toggled)
//!    ^                         |    ^                                     |
//!    |        stop()           |    +-------------------------------------+
//!    +-------------------------+         deadline = now + interval
//! ```
//!
//! Starting always forces the hidden phase and schedules the first toggle for
//! `now`, so the caret shows up on the very next poll instead of waiting out a
//! stale interval. Stopping cancels the pending toggle and hides the caret; it
//! is safe to call any number of times.

use std::time::{Duration, Instant};

use tracing::trace;

/// Caret visibility plus the pending toggle, if any.
#[derive(Clone, Debug)]
pub struct CursorBlink {
    interval: Duration,
    /// Time of the next toggle. `None` means STOPPED.
    next_toggle: Option<Instant>,
    visible: bool,
}

impl CursorBlink {
    /// Create a stopped scheduler with a hidden caret.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_toggle: None,
            visible: false,
        }
    }

    /// Whether a toggle is scheduled.
    #[inline]
    pub const fn is_running(&self) -> bool { self.next_toggle.is_some() }

    /// Whether the caret is in its visible phase.
    #[inline]
    pub const fn is_visible(&self) -> bool { self.visible }

    /// When the next toggle is due, if running.
    #[inline]
    pub const fn next_deadline(&self) -> Option<Instant> { self.next_toggle }

    #[inline]
    pub const fn interval(&self) -> Duration { self.interval }

    /// (Re)arm the timer: hide the caret and schedule a toggle for `now`.
    ///
    /// Returns `true` if visibility changed and a redraw is needed.
    pub fn start(&mut self, now: Instant) -> bool {
        let changed = self.set_visible(false);
        self.next_toggle = Some(now);
        trace!(interval_ms = self.interval.as_millis() as u64, "cursor blink armed");
        changed
    }

    /// Cancel any pending toggle and hide the caret.
    ///
    /// Returns `true` if visibility changed and a redraw is needed.
    pub fn stop(&mut self) -> bool {
        if self.next_toggle.take().is_some() {
            trace!("cursor blink stopped");
        }
        self.set_visible(false)
    }

    /// Toggle the caret if the pending deadline has passed.
    ///
    /// A late poll toggles once and reschedules from `now`; missed ticks are not
    /// replayed. Returns `true` if visibility changed and a redraw is needed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_toggle {
            Some(deadline) if now >= deadline => {
                self.next_toggle = Some(now + self.interval);
                self.set_visible(!self.visible)
            }
            _ => false,
        }
    }

    /// Set visibility, reporting whether it actually changed.
    fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    fn ms(value: u64) -> Duration { Duration::from_millis(value) }

    #[test]
    fn test_initially_stopped_and_hidden() {
        let blink = CursorBlink::new(INTERVAL);
        assert!(!blink.is_running(), "Scheduler should start STOPPED");
        assert!(!blink.is_visible(), "Caret should start hidden");
        assert_eq!(blink.next_deadline(), None);
    }

    #[test]
    fn test_start_shows_caret_on_first_poll() {
        let t0 = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL);

        assert!(!blink.start(t0), "Already hidden, start should not request redraw");
        assert!(blink.is_running());
        assert!(!blink.is_visible(), "Start enters hidden phase first");

        assert!(blink.poll(t0), "First tick is due immediately");
        assert!(blink.is_visible());
        assert_eq!(blink.next_deadline(), Some(t0 + INTERVAL));
    }

    #[test]
    fn test_alternates_at_interval() {
        let t0 = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL);
        blink.start(t0);
        blink.poll(t0);

        assert!(!blink.poll(t0 + ms(499)), "No toggle before interval elapses");
        assert!(blink.is_visible());

        assert!(blink.poll(t0 + ms(500)), "Toggle at interval");
        assert!(!blink.is_visible());

        assert!(blink.poll(t0 + ms(1000)), "Toggle again one interval later");
        assert!(blink.is_visible());
    }

    #[test]
    fn test_late_poll_reschedules_from_now() {
        let t0 = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL);
        blink.start(t0);
        blink.poll(t0);

        // Host stalled for several intervals: a single toggle, no catch-up
        assert!(blink.poll(t0 + ms(2300)));
        assert!(!blink.is_visible());
        assert_eq!(blink.next_deadline(), Some(t0 + ms(2800)));
    }

    #[test]
    fn test_stop_hides_and_cancels() {
        let t0 = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL);
        blink.start(t0);
        blink.poll(t0);
        assert!(blink.is_visible());

        assert!(blink.stop(), "Hiding a visible caret should request redraw");
        assert!(!blink.is_running());
        assert!(!blink.is_visible());

        assert!(!blink.poll(t0 + ms(5000)), "No toggles after stop");
        assert!(!blink.is_visible());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut blink = CursorBlink::new(INTERVAL);
        assert!(!blink.stop());
        assert!(!blink.stop());
        assert!(!blink.is_running());
    }

    #[test]
    fn test_restart_rearms_and_hides_first() {
        let t0 = Instant::now();
        let mut blink = CursorBlink::new(INTERVAL);
        blink.start(t0);
        blink.poll(t0);
        assert!(blink.is_visible());

        let t1 = t0 + ms(200);
        assert!(blink.start(t1), "Restart hides a visible caret");
        assert!(!blink.is_visible());
        assert_eq!(blink.next_deadline(), Some(t1), "Restart discards the stale deadline");

        assert!(blink.poll(t1));
        assert!(blink.is_visible(), "Caret reappears immediately after restart");
    }
}
