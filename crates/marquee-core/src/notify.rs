//! Stacked, independently-timed status notifications.
//!
//! FIFO by creation: new notices append below everything currently
//! visible. Non-errors auto-dismiss after [`AUTO_DISMISS`]; errors stay
//! until the user closes them. Every removal — timed or manual — passes
//! through a fixed [`FADE_OUT`] transition before the notice is detached,
//! so nothing ever vanishes without a visible exit.
//!
//! Time is injected through `Instant` parameters; the shell drives
//! [`NotificationCenter::sweep`] from a periodic tick.

use std::time::{Duration, Instant};

/// How long a non-error notice stays before it starts fading.
pub const AUTO_DISMISS: Duration = Duration::from_millis(5000);

/// Length of the exit transition between dismissal and detach.
pub const FADE_OUT: Duration = Duration::from_millis(400);

/// Kind of notice, which also decides the dismissal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// A single visible notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    posted_at: Instant,
    fading_since: Option<Instant>,
}

impl Notice {
    /// Whether the exit transition is running.
    pub fn is_fading(&self) -> bool {
        self.fading_since.is_some()
    }
}

/// The ordered set of currently visible notices.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notice below everything currently visible. Never fails.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            severity,
            message: message.into(),
            posted_at: now,
            fading_since: None,
        });
        id
    }

    /// Begin the exit transition for one notice. Unknown or already-fading
    /// ids are ignored; siblings are never affected.
    pub fn dismiss(&mut self, id: u64, now: Instant) {
        if let Some(notice) = self.notices.iter_mut().find(|n| n.id == id) {
            if notice.fading_since.is_none() {
                notice.fading_since = Some(now);
            }
        }
    }

    /// Advance timers: start the fade on expired non-errors, detach
    /// finished fades. Returns true if anything changed (a redraw hint).
    pub fn sweep(&mut self, now: Instant) -> bool {
        let mut changed = false;

        for notice in &mut self.notices {
            if notice.fading_since.is_none()
                && notice.severity != Severity::Error
                && now >= notice.posted_at + AUTO_DISMISS
            {
                notice.fading_since = Some(now);
                changed = true;
            }
        }

        let before = self.notices.len();
        self.notices
            .retain(|n| !matches!(n.fading_since, Some(since) if now >= since + FADE_OUT));
        changed || self.notices.len() != before
    }

    /// Visible notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_immediately_after_push() {
        let t0 = Instant::now();
        let mut center = NotificationCenter::new();
        let id = center.push(Severity::Info, "loading", t0);
        assert_eq!(center.notices().len(), 1);
        assert_eq!(center.notices()[0].id, id);
        assert!(!center.notices()[0].is_fading());
    }

    #[test]
    fn test_non_error_auto_dismiss_lifecycle() {
        let t0 = Instant::now();
        let mut center = NotificationCenter::new();
        center.push(Severity::Success, "done", t0);

        // Just before the deadline: untouched.
        assert!(!center.sweep(t0 + AUTO_DISMISS - Duration::from_millis(1)));
        assert!(!center.notices()[0].is_fading());

        // At the deadline the fade starts, the notice is still present.
        assert!(center.sweep(t0 + AUTO_DISMISS));
        assert!(center.notices()[0].is_fading());

        // Detached once the transition has run its course.
        assert!(center.sweep(t0 + AUTO_DISMISS + FADE_OUT));
        assert!(center.is_empty());
    }

    #[test]
    fn test_error_never_auto_dismisses() {
        let t0 = Instant::now();
        let mut center = NotificationCenter::new();
        let id = center.push(Severity::Error, "boom", t0);

        assert!(!center.sweep(t0 + Duration::from_secs(3600)));
        assert_eq!(center.notices().len(), 1);

        // Only explicit dismissal removes it, after the fade.
        let t1 = t0 + Duration::from_secs(3600);
        center.dismiss(id, t1);
        assert!(center.notices()[0].is_fading());
        assert!(center.sweep(t1 + FADE_OUT));
        assert!(center.is_empty());
    }

    #[test]
    fn test_stacking_preserves_creation_order() {
        let t0 = Instant::now();
        let mut center = NotificationCenter::new();
        center.push(Severity::Info, "first", t0);
        center.push(Severity::Warning, "second", t0 + Duration::from_millis(10));
        center.push(Severity::Success, "third", t0 + Duration::from_millis(20));

        let messages: Vec<&str> = center.notices().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_dismissal_is_independent_per_notice() {
        let t0 = Instant::now();
        let mut center = NotificationCenter::new();
        let a = center.push(Severity::Info, "a", t0);
        let b = center.push(Severity::Info, "b", t0 + Duration::from_millis(100));

        center.dismiss(a, t0 + Duration::from_millis(200));
        center.sweep(t0 + Duration::from_millis(200) + FADE_OUT);

        // `b` keeps its own timer: still visible, not fading.
        assert_eq!(center.notices().len(), 1);
        assert_eq!(center.notices()[0].id, b);
        assert!(!center.notices()[0].is_fading());

        // And it still auto-dismisses on its own schedule.
        let b_deadline = t0 + Duration::from_millis(100) + AUTO_DISMISS;
        assert!(center.sweep(b_deadline));
        assert!(center.notices()[0].is_fading());
    }

    #[test]
    fn test_double_dismiss_keeps_original_fade_clock() {
        let t0 = Instant::now();
        let mut center = NotificationCenter::new();
        let id = center.push(Severity::Error, "oops", t0);

        center.dismiss(id, t0 + Duration::from_millis(100));
        center.dismiss(id, t0 + Duration::from_millis(300));

        // Detaches 400 ms after the *first* dismissal.
        assert!(center.sweep(t0 + Duration::from_millis(500)));
        assert!(center.is_empty());
    }
}
