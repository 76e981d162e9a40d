//! Session readiness and deferred initialization
//!
//! Record resolution must not start before the session transport has
//! finished connecting. The bootstrap defers a one-shot initialization
//! until the session reports connected, polled from the frame loop.

/// Session-level readiness, as reported by the transport
pub trait Session {
    /// Whether the session has finished connecting
    fn is_connected(&self) -> bool;
}

/// One-shot deferred initialization keyed on session readiness
#[derive(Debug, Clone, Default)]
pub struct SessionBootstrap {
    fired: bool,
}

impl SessionBootstrap {
    /// Create a bootstrap that has not fired yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether initialization has already run
    pub fn is_initialized(&self) -> bool {
        self.fired
    }

    /// Poll for the initialization edge
    ///
    /// Returns `true` exactly once: on the first poll where the session is
    /// connected. A session that is already connected fires on the first
    /// poll; otherwise firing waits for the connection.
    pub fn poll<S: Session>(&mut self, session: &S) -> bool {
        if self.fired || !session.is_connected() {
            return false;
        }
        self.fired = true;
        true
    }
}
