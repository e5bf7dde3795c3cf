use tokio_util::sync::CancellationToken;

use crate::error::SubmitError;

/// Lifecycle of the current or most recent analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No request has been made since creation or the last reset.
    Idle,
    /// A request is in flight and can be cancelled.
    Pending,
    /// The most recent request produced a saved result.
    Succeeded,
    /// The most recent request failed; `last_error` carries the message.
    Failed,
    /// The most recent request was aborted by the user.
    Cancelled,
}

/// Owner of the single outstanding analysis request.
///
/// At most one session is Pending at a time. Each accepted submission gets an
/// epoch; outcome delivery must present the matching epoch while the session
/// is still Pending, so a response that arrives after cancellation or
/// supersession is discarded instead of mutating shared state. Once a
/// terminal status is reached the controller accepts a new `begin`
/// immediately; the terminal status stays observable until then.
pub struct SessionController {
    status: SessionStatus,
    epoch: u64,
    cancel: Option<CancellationToken>,
    last_error: Option<String>,
}

impl SessionController {
    pub fn new() -> SessionController {
        SessionController {
            status: SessionStatus::Idle,
            epoch: 0,
            cancel: None,
            last_error: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SessionStatus::Pending
    }

    /// Message of the most recent Failed session, until the next success or
    /// reset clears it.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Open a new session. Fails with `SessionBusy` while one is Pending.
    pub fn begin(&mut self) -> Result<(u64, CancellationToken), SubmitError> {
        if self.is_pending() {
            return Err(SubmitError::SessionBusy);
        }
        self.epoch += 1;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.status = SessionStatus::Pending;
        Ok((self.epoch, token))
    }

    /// Abort the pending session, if any. Signals the transport token and
    /// marks the session Cancelled without waiting for an acknowledgement.
    /// Returns whether anything was cancelled; safe no-op otherwise.
    pub fn cancel(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.status = SessionStatus::Cancelled;
        true
    }

    fn accepts(&self, epoch: u64) -> bool {
        self.status == SessionStatus::Pending && self.epoch == epoch
    }

    /// Resolve the session successfully. Returns false when the outcome is
    /// stale (cancelled or superseded) and must be discarded by the caller.
    pub fn finish_success(&mut self, epoch: u64) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.status = SessionStatus::Succeeded;
        self.cancel = None;
        self.last_error = None;
        true
    }

    /// Resolve the session as failed, retaining `message` for display.
    pub fn finish_failure(&mut self, epoch: u64, message: String) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.status = SessionStatus::Failed;
        self.cancel = None;
        self.last_error = Some(message);
        true
    }

    /// Resolve the session as cancelled from the transport side. The usual
    /// path is `cancel`, which transitions immediately; this covers an abort
    /// surfacing from the network layer first.
    pub fn finish_cancelled(&mut self, epoch: u64) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.status = SessionStatus::Cancelled;
        self.cancel = None;
        true
    }

    /// Return to Idle and drop any retained error. No-op while Pending.
    pub fn reset(&mut self) {
        if self.is_pending() {
            return;
        }
        self.status = SessionStatus::Idle;
        self.last_error = None;
    }
}

impl Default for SessionController {
    fn default() -> Self {
        SessionController::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionController, SessionStatus};
    use crate::error::SubmitError;

    #[test]
    fn test_begin_while_pending_is_busy() {
        let mut session = SessionController::new();
        session.begin().unwrap();
        assert_eq!(session.begin().unwrap_err(), SubmitError::SessionBusy);
    }

    #[test]
    fn test_cancel_is_noop_unless_pending() {
        let mut session = SessionController::new();
        assert!(!session.cancel());
        let (epoch, _token) = session.begin().unwrap();
        assert!(session.finish_success(epoch));
        // Racing a cancel against an already-terminal session does nothing.
        assert!(!session.cancel());
        assert_eq!(session.status(), SessionStatus::Succeeded);
    }

    #[test]
    fn test_cancellation_is_sticky() {
        let mut session = SessionController::new();
        let (epoch, token) = session.begin().unwrap();
        assert!(session.cancel());
        assert!(token.is_cancelled());
        // A success delivered after the cancel must be rejected.
        assert!(!session.finish_success(epoch));
        assert_eq!(session.status(), SessionStatus::Cancelled);
    }

    #[test]
    fn test_stale_epoch_is_discarded() {
        let mut session = SessionController::new();
        let (first, _token) = session.begin().unwrap();
        session.cancel();
        let (second, _token) = session.begin().unwrap();
        // The superseded session's outcome no longer matches.
        assert!(!session.finish_success(first));
        assert!(session.is_pending());
        assert!(session.finish_success(second));
    }

    #[test]
    fn test_failure_message_lifecycle() {
        let mut session = SessionController::new();
        let (epoch, _token) = session.begin().unwrap();
        assert!(session.finish_failure(epoch, "no images in range".to_string()));
        assert_eq!(session.last_error(), Some("no images in range"));

        // The next success clears the retained message.
        let (epoch, _token) = session.begin().unwrap();
        assert!(session.finish_success(epoch));
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn test_reset_clears_error_but_not_pending() {
        let mut session = SessionController::new();
        let (epoch, _token) = session.begin().unwrap();
        session.finish_failure(epoch, "boom".to_string());
        session.reset();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.last_error(), None);

        session.begin().unwrap();
        session.reset();
        assert!(session.is_pending());
    }
}
