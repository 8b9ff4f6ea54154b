use async_trait::async_trait;

use crate::domain::session::{AuthStatus, Credentials, SessionInfo};
use crate::error::AppResult;

#[async_trait]
pub trait SessionService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> AppResult<SessionInfo>;
    async fn logout(&self) -> AppResult<()>;
    /// Never fails; any problem reads as an unauthenticated session.
    async fn status(&self) -> AuthStatus;
}
