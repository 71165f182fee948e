//! In-memory session store
//!
//! Sessions are kept in a plain table keyed by sender identifier. There is
//! no capacity bound, eviction policy or expiry for abandoned flows; the
//! store exists behind an explicit interface so a multi-process deployment
//! can swap in an external, per-key-locked store without touching the
//! state machine.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use super::session::Session;

/// In-process mapping from sender identifier to session state
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing session for a sender, or allocate a fresh one.
    ///
    /// The boolean is `true` when a new session was created, which is the
    /// caller's cue to send the name prompt without consuming input.
    pub async fn get_or_create(&self, sender: &str) -> (Session, bool) {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(sender) {
            Some(session) => (session.clone(), false),
            None => {
                let session = Session::new(sender);
                sessions.insert(sender.to_string(), session.clone());
                debug!(sender = %sender, "Created new session");
                (session, true)
            }
        }
    }

    /// Persist an updated session
    pub async fn save(&self, session: Session) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.sender.clone(), session);
    }

    /// Delete a sender's session, returning it if present
    pub async fn remove(&self, sender: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(sender);
        if removed.is_some() {
            debug!(sender = %sender, "Removed session");
        }
        removed
    }

    /// Check whether a sender has an active session
    pub async fn contains(&self, sender: &str) -> bool {
        self.sessions.lock().await.contains_key(sender)
    }

    /// Number of active sessions
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether the store has no active sessions
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
