use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::role::{DashboardKind, Role};
use crate::domain::session::Credentials;
use crate::error::{AppError, AppResult};

/// Where the client goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard(DashboardKind),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard(kind) => kind.route(),
        }
    }
}

/// An authenticated session as the dashboards see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub username: String,
    pub role: Role,
    pub department: Option<String>,
}

impl SignedIn {
    pub fn route(&self) -> Route {
        Route::Dashboard(self.role.dashboard())
    }
}

pub async fn sign_in(ctx: &AppContext, username: &str, password: &str) -> AppResult<SignedIn> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Please enter both username and password".to_string(),
        ));
    }

    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let session = ctx.session.login(&credentials).await?;

    // The login response names the department on newer backends only.
    let department = session
        .department
        .filter(|name| !name.trim().is_empty())
        .or_else(|| ctx.config.department.clone());

    info!(
        %username,
        role = %session.role,
        specialty = ?session.specialty,
        "session started"
    );
    Ok(SignedIn {
        username: username.to_string(),
        role: session.role,
        department,
    })
}

/// Best-effort logout: the server call may fail, the user still lands on the
/// login screen.
pub async fn sign_out(ctx: &AppContext) -> Route {
    if let Err(err) = ctx.session.logout().await {
        warn!(error = %err, "logout failed; returning to login anyway");
    }
    Route::Login
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::workflow::testing::{FakePortal, Operation};

    #[tokio::test]
    async fn empty_credentials_never_reach_the_backend() {
        let portal = FakePortal::new(Role::Patient);
        let ctx = portal.context();

        let error = sign_in(&ctx, "  ", "secret").await.unwrap_err();

        assert!(matches!(error, AppError::Validation(_)));
        assert!(portal.calls().is_empty());
    }

    #[tokio::test]
    async fn department_login_routes_to_department_dashboard() {
        let portal = FakePortal::new(Role::Department);
        let ctx = portal.context();

        let session = sign_in(&ctx, "nurse@hospital.com", "staff123").await.unwrap();

        assert_eq!(session.role, Role::Department);
        assert_eq!(session.route().path(), "/department");
    }

    #[tokio::test]
    async fn configured_department_fills_missing_login_field() {
        let portal = FakePortal::new(Role::Department);
        let mut ctx = portal.context();
        ctx.config.department = Some("Nursing".to_string());

        let session = sign_in(&ctx, "nurse@hospital.com", "staff123").await.unwrap();

        assert_eq!(session.department.as_deref(), Some("Nursing"));
    }

    #[tokio::test]
    async fn rejected_login_surfaces_auth_error() {
        let portal = FakePortal::new(Role::Patient);
        portal.fail(Operation::Login);
        let ctx = portal.context();

        let error = sign_in(&ctx, "patient1@hospital.com", "wrong").await.unwrap_err();
        assert!(error.is_auth());
    }

    #[tokio::test]
    async fn logout_always_returns_to_login() {
        let portal = FakePortal::new(Role::Admin);
        let ctx = portal.context();
        assert_eq!(sign_out(&ctx).await, Route::Login);

        portal.fail(Operation::Logout);
        assert_eq!(sign_out(&ctx).await.path(), "/");
        assert_eq!(portal.calls(), vec![Operation::Logout, Operation::Logout]);
    }
}
