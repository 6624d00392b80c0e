//! Best-effort voice announcements.
//!
//! Announcing is a side effect layered on top of replies; an implementation
//! that cannot speak must stay silent rather than fail, so the trait has no
//! error channel at all.

pub trait Announcer: Send + Sync {
    fn announce(&self, text: &str);

    fn name(&self) -> &'static str;
}

/// Silent announcer, the default.
pub struct NoopAnnouncer;

impl Announcer for NoopAnnouncer {
    #[inline(always)]
    fn announce(&self, _text: &str) {}

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Writes announcements to the log; stands in for a TTS engine on headless
/// installs.
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&self, text: &str) {
        tracing::info!(target: "routewise::voice", "{text}");
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_does_not_panic() {
        NoopAnnouncer.announce("main route is jammed");
        assert_eq!(NoopAnnouncer.name(), "noop");
    }

    #[test]
    fn log_announcer_is_silent_failure_free() {
        LogAnnouncer.announce("");
        LogAnnouncer.announce("taking alternate route");
    }
}
