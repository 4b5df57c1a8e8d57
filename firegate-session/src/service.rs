use crate::Session;
use async_trait::async_trait;
use firegate_core::Result;

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub user_id: String,
    pub backend: String,
}

#[derive(Debug, Clone)]
pub struct GetRequest {
    pub session_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub session_id: String,
}

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Start a session for a user.
    async fn create(&self, req: CreateRequest) -> Result<Session>;
    /// A live session, or `None` if unknown or expired.
    async fn get(&self, req: GetRequest) -> Result<Option<Session>>;
    /// End a session. Unknown ids are not an error.
    async fn delete(&self, req: DeleteRequest) -> Result<()>;
    /// End every session of a user; returns how many were removed.
    async fn delete_user_sessions(&self, user_id: &str) -> Result<usize>;
}
