use attendance_api::{ExpiryReason, SessionListener};
use std::sync::Mutex;

/// Records that the session ended so the CLI can send the user back to `login`
#[derive(Debug, Default)]
pub struct LoginRedirect {
    reason: Mutex<Option<ExpiryReason>>,
}

impl LoginRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reason(&self) -> Option<ExpiryReason> {
        *self.reason.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True when the server rejected the token, as opposed to an explicit logout
    pub fn needs_login(&self) -> bool {
        matches!(
            self.reason(),
            Some(ExpiryReason::Unauthorized | ExpiryReason::StaleToken)
        )
    }
}

impl SessionListener for LoginRedirect {
    fn session_expired(&self, reason: ExpiryReason) {
        match reason {
            ExpiryReason::LoggedOut => tracing::info!("Session closed by user"),
            reason => tracing::warn!("Session expired ({:?}), redirecting to login", reason),
        }
        *self.reason.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason);
    }
}
