use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::profile::PatientProfile;
use crate::domain::role::Role;
use crate::domain::session::{AuthStatus, Credentials, SessionInfo};
use crate::domain::stats::AdminStats;
use crate::domain::ticket::{NewTicket, Ticket, TicketId, TicketReceipt, TicketStatus};
use crate::domain::worker::{NewWorker, Worker};
use crate::error::{AppError, AppResult};
use crate::infra::http::{ApiClient, server_message};
use crate::services::{
    MaintenanceService, ProfileService, SessionService, TicketScope, TicketService,
};

/// Client for the hospital portal REST backend.
pub struct PortalClient {
    api: ApiClient,
}

impl PortalClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            api: ApiClient::new(base_url, timeout)?,
        })
    }

    fn tickets_path(scope: &TicketScope) -> &'static str {
        match scope {
            TicketScope::Own => "/patient/tickets",
            TicketScope::Department { .. } => "/department/tickets",
            TicketScope::All => "/admin/tickets",
        }
    }

    fn create_path(scope: &TicketScope) -> AppResult<&'static str> {
        match scope {
            TicketScope::Own => Ok("/patient/ticket"),
            TicketScope::Department { .. } => Ok("/department/ticket/create"),
            TicketScope::All => Err(AppError::Validation(
                "tickets cannot be raised from the administration view".to_string(),
            )),
        }
    }

    fn status_path(scope: &TicketScope, id: &TicketId) -> AppResult<String> {
        match scope {
            TicketScope::Department { .. } => Ok(format!("/department/ticket/{id}/status")),
            TicketScope::All => Ok(format!("/admin/ticket/{id}/status")),
            TicketScope::Own => Err(AppError::Validation(
                "patients cannot change ticket status".to_string(),
            )),
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    role: String,
    #[serde(default)]
    specialty: Option<String>,
    #[serde(default)]
    department: Option<String>,
}

#[derive(Deserialize)]
struct Acknowledgement {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: TicketStatus,
}

#[async_trait]
impl SessionService for PortalClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<SessionInfo> {
        let response = self.api.post_raw("/auth/login", Some(credentials)).await?;
        let status = response.status();
        if !status.is_success() {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(AppError::Auth(message));
        }

        let payload: LoginResponse = response
            .json()
            .await
            .map_err(|err| AppError::Decode(format!("invalid login response: {err}")))?;
        let role = Role::from_tag(&payload.role)
            .ok_or_else(|| AppError::Auth(format!("unsupported role '{}'", payload.role)))?;

        info!(username = %credentials.username, role = %role, "logged in");
        Ok(SessionInfo {
            role,
            specialty: payload.specialty,
            department: payload.department,
        })
    }

    async fn logout(&self) -> AppResult<()> {
        let response = self.api.post_raw::<()>("/auth/logout", None).await?;
        let status = response.status();
        if !status.is_success() {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Logout failed".to_string());
            return Err(AppError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn status(&self) -> AuthStatus {
        match self.api.get::<AuthStatus>("/auth/status").await {
            Ok(status) => status,
            Err(err) => {
                warn!(error = %err, "session status check failed");
                AuthStatus::default()
            }
        }
    }
}

#[async_trait]
impl TicketService for PortalClient {
    async fn list_tickets(&self, scope: &TicketScope) -> AppResult<Vec<Ticket>> {
        let tickets: Option<Vec<Ticket>> = self.api.get(Self::tickets_path(scope)).await?;
        Ok(tickets.unwrap_or_default())
    }

    async fn create_ticket(
        &self,
        scope: &TicketScope,
        ticket: &NewTicket,
    ) -> AppResult<TicketReceipt> {
        let path = Self::create_path(scope)?;
        let receipt: Option<TicketReceipt> = self.api.post(path, ticket).await?;
        let receipt = receipt.unwrap_or_default();
        info!(
            scope = scope.label(),
            ticket_id = receipt.ticket_id.as_deref().unwrap_or("?"),
            message = receipt.message.as_deref().unwrap_or_default(),
            "ticket created"
        );
        Ok(receipt)
    }

    async fn update_status(
        &self,
        scope: &TicketScope,
        id: &TicketId,
        status: TicketStatus,
    ) -> AppResult<()> {
        let path = Self::status_path(scope, id)?;
        let ack: Option<Acknowledgement> = self.api.put(&path, &StatusUpdate { status }).await?;
        if let Some(message) = ack.and_then(|ack| ack.message) {
            debug!(ticket = %id, %message, "status update acknowledged");
        }
        info!(ticket = %id, status = %status, "ticket status updated");
        Ok(())
    }
}

#[async_trait]
impl ProfileService for PortalClient {
    async fn patient_profile(&self) -> AppResult<PatientProfile> {
        self.api.get("/patient/profile").await
    }
}

#[async_trait]
impl MaintenanceService for PortalClient {
    async fn workers(&self) -> AppResult<Vec<Worker>> {
        let workers: Option<Vec<Worker>> = self.api.get("/maintenance/workers").await?;
        Ok(workers.unwrap_or_default())
    }

    async fn add_worker(&self, worker: &NewWorker) -> AppResult<()> {
        let _: Option<Acknowledgement> = self.api.post("/maintenance/worker", worker).await?;
        info!(name = %worker.name, "worker added");
        Ok(())
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        let stats: Option<AdminStats> = self.api.get("/admin/stats").await?;
        Ok(stats.unwrap_or_default())
    }
}
