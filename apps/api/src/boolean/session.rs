//! Session — the JD and NOT filters captured by a successful first-pass generation.
//!
//! A `Session` is an immutable value. Refinement takes it as an explicit argument, so
//! the refined call can only ever see what the initiating call captured.
//! `SessionStore` keeps sessions for the HTTP surface, keyed by id, in memory only.
//! Sessions idle for longer than the store's TTL are dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub jd_text: String,
    pub not_filters: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Captures the inputs of a successful initial generation.
    pub(crate) fn capture(jd_text: &str, not_filters: &str) -> Self {
        Session {
            id: Uuid::new_v4(),
            jd_text: jd_text.to_string(),
            not_filters: not_filters.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// In-memory map of live sessions. Cloning shares the same map.
///
/// Expiry is lazy: every access prunes entries whose last use is older than `ttl`.
/// A successful `get` counts as use.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

struct Entry {
    session: Session,
    last_seen: Instant,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn insert(&self, session: Session) {
        let now = Instant::now();
        let mut map = self.inner.write().await;
        prune(&mut map, now, self.ttl);
        map.insert(
            session.id,
            Entry {
                session,
                last_seen: now,
            },
        );
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let now = Instant::now();
        let mut map = self.inner.write().await;
        prune(&mut map, now, self.ttl);
        map.get_mut(&id).map(|entry| {
            entry.last_seen = now;
            entry.session.clone()
        })
    }

    /// Ends a session. Returns false if it did not exist or had already expired.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut map = self.inner.write().await;
        prune(&mut map, Instant::now(), self.ttl);
        map.remove(&id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        let mut map = self.inner.write().await;
        prune(&mut map, Instant::now(), self.ttl);
        map.len()
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn prune_expired(&self) -> usize {
        prune(&mut *self.inner.write().await, Instant::now(), self.ttl)
    }
}

fn prune(map: &mut HashMap<Uuid, Entry>, now: Instant, ttl: Duration) -> usize {
    let before = map.len();
    map.retain(|_, entry| now.duration_since(entry.last_seen) < ttl);
    let removed = before - map.len();
    if removed > 0 {
        debug!("Expired {removed} idle session(s)");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn test_capture_assigns_fresh_ids() {
        let a = Session::capture("JD", "\"intern\"");
        let b = Session::capture("JD", "\"intern\"");
        assert_ne!(a.id, b.id);
        assert_eq!(a.jd_text, "JD");
        assert_eq!(a.not_filters, "\"intern\"");
    }

    #[tokio::test]
    async fn test_store_insert_get_remove() {
        let store = SessionStore::new(TTL);
        let session = Session::capture("Java backend engineer", "");
        let id = session.id;

        store.insert(session.clone()).await;
        assert_eq!(store.get(id).await, Some(session));
        assert_eq!(store.len().await, 1);

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert_eq!(store.get(id).await, None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SessionStore::new(TTL);
        let handle = store.clone();
        let session = Session::capture("JD", "");
        let id = session.id;

        handle.insert(session).await;
        assert!(store.get(id).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires_after_ttl() {
        let store = SessionStore::new(TTL);
        let session = Session::capture("JD", "");
        let id = session.id;
        store.insert(session).await;

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert!(store.get(id).await.is_some());

        // The lookup above refreshed it, so the clock restarts from there.
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert_eq!(store.len().await, 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(store.get(id).await, None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_prune_expired_counts_removed_sessions() {
        let store = SessionStore::new(TTL);
        store.insert(Session::capture("first", "")).await;
        store.insert(Session::capture("second", "")).await;

        tokio::time::advance(TTL / 2).await;
        let fresh = Session::capture("third", "");
        let fresh_id = fresh.id;
        store.insert(fresh).await;

        tokio::time::advance(TTL / 2).await;
        assert_eq!(store.prune_expired().await, 2);
        assert!(store.get(fresh_id).await.is_some());
        assert!(!store.remove(Uuid::new_v4()).await);
    }
}
