use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::models::AdminSession;

pub const SESSION_TTL_MS: i64 = 8 * 60 * 60 * 1000;

/// Fixed delay applied to every login attempt, success or failure, to blunt
/// timing-based brute force. Applied by the login handler, not here.
pub const LOGIN_DELAY_MS: u64 = 500;

/// Token-addressed admin sessions, held in process memory and handed
/// through application state. Sessions expire eight hours after issuance
/// or the last extension.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, AdminSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain equality check against the configured shared secret. On
    /// success, issues an opaque token mapped to a fresh session.
    pub fn login(&self, password: &str, expected: &str) -> Option<(String, AdminSession)> {
        if expected.is_empty() || password != expected {
            return None;
        }
        let now = Utc::now().timestamp_millis();
        let session = AdminSession {
            is_authenticated: true,
            login_time: now,
            expires_at: now + SESSION_TTL_MS,
        };
        let token = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), session.clone());
        Some((token, session))
    }

    /// Missing or expired sessions read as unauthenticated; expired ones
    /// are removed on sight.
    pub fn is_authenticated(&self, token: &str) -> bool {
        self.authenticated_at(token, Utc::now().timestamp_millis())
    }

    fn authenticated_at(&self, token: &str, now_ms: i64) -> bool {
        let mut sessions = self.sessions.lock().unwrap();
        let expired = matches!(sessions.get(token), Some(s) if now_ms > s.expires_at);
        if expired {
            sessions.remove(token);
            return false;
        }
        sessions
            .get(token)
            .map(|session| session.is_authenticated)
            .unwrap_or(false)
    }

    /// Slides the expiry another eight hours out, returning the new expiry.
    /// No-op for unknown or expired tokens.
    pub fn extend(&self, token: &str) -> Option<i64> {
        let now = Utc::now().timestamp_millis();
        if !self.authenticated_at(token, now) {
            return None;
        }
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(token)?;
        session.expires_at = now + SESSION_TTL_MS;
        Some(session.expires_at)
    }

    pub fn logout(&self, token: &str) {
        self.sessions.lock().unwrap().remove(token);
    }
}
