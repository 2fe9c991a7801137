//! In-process session client consumed by UI layers.
//!
//! SYSTEM CONTEXT
//! ==============
//! UI code never touches cookies or the upstream service. It observes and
//! drives the session exclusively through [`SessionManager`], which talks to
//! the auth frontend routes over HTTP with a browser-like cookie jar.

pub mod notify;
pub mod session;

pub use notify::{Notify, TracingNotifier};
pub use session::{SessionError, SessionManager, SessionSnapshot, spawn_refresh_task};
