//! Registry of live sessions keyed by session id
//!
//! Sessions idle past the timeout are dropped on lookup and by
//! `evict_idle`, which the server runs periodically. The persisted menu
//! cache is left in place so a quick re-login can reuse it.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use portal_core::services::Session;

pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<Session>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        Self { sessions: DashMap::new(), idle_timeout }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub fn insert(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.sessions.insert(session.id(), session.clone());
        session
    }

    /// Live session for `id`, marking it active.
    pub fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        self.lookup(id, Utc::now())
    }

    pub fn lookup(&self, id: &Uuid, now: DateTime<Utc>) -> Option<Arc<Session>> {
        let session = self.sessions.get(id).map(|entry| entry.value().clone())?;
        if session.is_idle(now, self.idle_timeout) {
            self.sessions.remove_if(id, |_, s| s.is_idle(now, self.idle_timeout));
            info!("Session {} for user {} expired", id, session.user().id);
            return None;
        }
        session.touch(now);
        Some(session)
    }

    pub fn remove(&self, id: &Uuid) -> Option<Arc<Session>> {
        self.sessions.remove(id).map(|(_, session)| session)
    }

    /// Drops every session idle at `now`; returns how many were dropped.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_idle(now, self.idle_timeout));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            info!("Evicted {} idle sessions, {} remain", evicted, self.sessions.len());
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
