//! Session store collaborator and its in-memory implementation.

use async_trait::async_trait;
use authn_sdk::{AuthnError, Identity};
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// A stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub identity: Identity,
    pub expires_at: DateTime<Utc>,
}

/// Persists sessions between requests.
///
/// Expiry, renewal and eviction are the store's concern: `load` must never
/// return an identity for an expired session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Identity bound to a live session.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the backend cannot be reached.
    async fn load(&self, session_id: &str) -> Result<Option<Identity>, AuthnError>;

    /// Create or replace a session.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the backend cannot be reached.
    async fn save(&self, session_id: &str, record: SessionRecord) -> Result<(), AuthnError>;

    /// Drop a session; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the backend cannot be reached.
    async fn remove(&self, session_id: &str) -> Result<(), AuthnError>;
}

/// Process-local session store for development, tests and single-node setups.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionRecord>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included until the next sweep.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn load_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<Identity> {
        // The shard guard must be released before `remove_if` below.
        let live = self
            .sessions
            .get(session_id)
            .map(|record| (record.expires_at > now).then(|| record.identity.clone()));

        match live {
            None => None,
            Some(Some(identity)) => Some(identity),
            Some(None) => {
                self.sessions
                    .remove_if(session_id, |_, record| record.expires_at <= now);
                tracing::debug!("Evicted expired session");
                None
            }
        }
    }

    /// Drop every session that expired at or before `now`.
    fn sweep_expired(&self, now: DateTime<Utc>) {
        let before = self.sessions.len();
        self.sessions.retain(|_, record| record.expires_at > now);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::debug!(evicted, "Swept expired sessions");
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<Identity>, AuthnError> {
        Ok(self.load_at(session_id, Utc::now()))
    }

    async fn save(&self, session_id: &str, record: SessionRecord) -> Result<(), AuthnError> {
        self.sweep_expired(Utc::now());
        self.sessions.insert(session_id.to_owned(), record);
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<(), AuthnError> {
        self.sessions.remove(session_id);
        Ok(())
    }
}
