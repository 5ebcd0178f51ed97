//! Analysis sessions: per-caller context plus the in-memory store the HTTP
//! layer keeps them in.

pub mod context;

pub use context::{AnalysisContext, SideDecision, UNKNOWN_MARKET};

use crate::engine::SideResolver;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug)]
struct SessionEntry {
    context: AnalysisContext,
    last_access: Instant,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_access) > ttl
    }
}

/// In-memory map of session id to analysis context. Nothing is persisted.
///
/// Sessions idle for longer than `ttl` are dropped: eagerly whenever a new
/// session is created, and lazily when an expired id is looked up.
#[derive(Debug)]
pub struct SessionStore {
    resolver: SideResolver,
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(resolver: SideResolver, ttl: Duration) -> Self {
        Self {
            resolver,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now, self.ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "expired sessions evicted");
        }

        sessions.insert(
            id,
            SessionEntry {
                context: AnalysisContext::new(self.resolver),
                last_access: now,
            },
        );
        tracing::info!(session = %id, "session created");
        id
    }

    /// Run `f` against the session's context. `None` if the id is unknown
    /// or has expired.
    pub async fn with_context<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut AnalysisContext) -> R,
    ) -> Option<R> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        if sessions.get(&id)?.is_expired(now, self.ttl) {
            sessions.remove(&id);
            tracing::info!(session = %id, "session expired");
            return None;
        }

        let entry = sessions.get_mut(&id)?;
        entry.last_access = now;
        Some(f(&mut entry.context))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResolvedSide;
    use crate::domain::SideSelection;

    #[tokio::test]
    async fn test_create_and_use_session() {
        let store = SessionStore::new(SideResolver::default(), Duration::from_secs(3600));
        let id = store.create().await;
        assert_eq!(store.len().await, 1);

        let decision = store
            .with_context(id, |ctx| {
                ctx.select_side(SideSelection::Explicit(ResolvedSide::Yes))
            })
            .await
            .expect("session exists")
            .unwrap();
        assert_eq!(decision.resolved_side, ResolvedSide::Yes);

        let side = store.with_context(id, |ctx| ctx.resolved_side()).await;
        assert_eq!(side, Some(Some(ResolvedSide::Yes)));
    }

    #[tokio::test]
    async fn test_create_evicts_idle_sessions() {
        let store = SessionStore::new(SideResolver::default(), Duration::from_millis(20));
        let stale = store.create().await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        let fresh = store.create().await;
        assert_eq!(store.len().await, 1);
        assert!(store.with_context(stale, |_| ()).await.is_none());
        assert!(store.with_context(fresh, |_| ()).await.is_some());
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped_on_lookup() {
        let store = SessionStore::new(SideResolver::default(), Duration::from_millis(20));
        let id = store.create().await;
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(store.with_context(id, |_| ()).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_access_keeps_session_alive() {
        let store = SessionStore::new(SideResolver::default(), Duration::from_secs(1));
        let id = store.create().await;
        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(400)).await;
            assert!(store.with_context(id, |_| ()).await.is_some());
        }
        store.create().await;
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = SessionStore::new(SideResolver::default(), Duration::from_secs(3600));
        assert!(store.with_context(Uuid::new_v4(), |_| ()).await.is_none());
        assert!(!store.remove(Uuid::new_v4()).await);
    }
}
