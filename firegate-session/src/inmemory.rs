use crate::{CreateRequest, DeleteRequest, GetRequest, Session, SessionService};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use firegate_core::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Two weeks.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 14;

pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop expired sessions; returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create(&self, req: CreateRequest) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().simple().to_string(),
            user_id: req.user_id,
            backend: req.backend,
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions.write().await.insert(session.id.clone(), session.clone());
        tracing::debug!(user.id = %session.user_id, backend = %session.backend, "session created");
        Ok(session)
    }

    async fn get(&self, req: GetRequest) -> Result<Option<Session>> {
        let session = self.sessions.read().await.get(&req.session_id).cloned();
        match session {
            Some(s) if s.is_expired() => {
                self.sessions.write().await.remove(&req.session_id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn delete(&self, req: DeleteRequest) -> Result<()> {
        if let Some(s) = self.sessions.write().await.remove(&req.session_id) {
            tracing::debug!(user.id = %s.user_id, "session deleted");
        }
        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: &str) -> Result<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        Ok(before - sessions.len())
    }
}
