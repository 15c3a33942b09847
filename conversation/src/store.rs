//! Session store: conversation key → session, with an in-memory backend.

use async_trait::async_trait;
use dashmap::DashMap;
use repost_core::{ConversationKey, Result};
use std::time::{Duration, Instant};
use tracing::info;

use crate::state::Session;

/// Where sessions live between events. Absent keys are idle sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, key: ConversationKey) -> Result<Session>;
    async fn save(&self, key: ConversationKey, session: Session) -> Result<()>;
    async fn clear(&self, key: ConversationKey) -> Result<()>;
}

struct StoredSession {
    session: Session,
    touched: Instant,
}

/// Process-local session table. With an idle TTL, sessions untouched for longer than the TTL
/// load as idle.
pub struct InMemorySessionStore {
    sessions: DashMap<ConversationKey, StoredSession>,
    idle_ttl: Option<Duration>,
}

impl InMemorySessionStore {
    /// Sessions never expire.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl: None,
        }
    }

    /// Sessions idle longer than `ttl` are dropped on next load.
    pub fn with_idle_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_ttl: Some(ttl),
        }
    }

    /// True when no non-idle session is held (expired ones count until their next load).
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_expired(&self, touched: Instant) -> bool {
        self.idle_ttl
            .map(|ttl| touched.elapsed() > ttl)
            .unwrap_or(false)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: ConversationKey) -> Result<Session> {
        let expired = match self.sessions.get(&key) {
            None => return Ok(Session::idle()),
            Some(stored) if !self.is_expired(stored.touched) => return Ok(stored.session.clone()),
            Some(stored) => stored.session.state.name(),
        };
        self.sessions.remove(&key);
        info!(conversation = %key, state = expired, "Idle session expired, back to idle");
        Ok(Session::idle())
    }

    async fn save(&self, key: ConversationKey, session: Session) -> Result<()> {
        if session.is_idle() {
            self.sessions.remove(&key);
        } else {
            self.sessions.insert(
                key,
                StoredSession {
                    session,
                    touched: Instant::now(),
                },
            );
        }
        Ok(())
    }

    async fn clear(&self, key: ConversationKey) -> Result<()> {
        self.sessions.remove(&key);
        Ok(())
    }
}
