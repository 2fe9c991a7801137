//! User-visible notification sink.
//!
//! The session client reports outcomes (login succeeded, session expired)
//! through this trait; a real UI renders them as toasts. The default sink
//! writes structured log lines instead.

pub trait Notify: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notify for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(text = %message, "user notification");
    }

    fn error(&self, message: &str) {
        tracing::warn!(text = %message, "user notification");
    }
}
