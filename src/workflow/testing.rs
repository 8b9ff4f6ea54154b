//! In-memory backend for workflow tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{AppConfig, StoredConfig};
use crate::context::AppContext;
use crate::domain::profile::PatientProfile;
use crate::domain::role::Role;
use crate::domain::session::{AuthStatus, Credentials, SessionInfo};
use crate::domain::stats::AdminStats;
use crate::domain::ticket::{
    NewTicket, Priority, Ticket, TicketId, TicketReceipt, TicketStatus,
};
use crate::domain::worker::{NewWorker, Worker};
use crate::error::{AppError, AppResult};
use crate::services::{
    MaintenanceService, ProfileService, SessionService, TicketScope, TicketService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Logout,
    ListTickets,
    CreateTicket,
    UpdateStatus,
    Profile,
    Workers,
    AddWorker,
    Stats,
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Outage,
    Expired,
}

pub struct FakePortal {
    role: Role,
    tickets: Mutex<Vec<Ticket>>,
    workers: Mutex<Vec<Worker>>,
    failures: Mutex<HashMap<Operation, Failure>>,
    calls: Mutex<Vec<Operation>>,
}

impl FakePortal {
    pub fn new(role: Role) -> Arc<Self> {
        Arc::new(Self {
            role,
            tickets: Mutex::new(Vec::new()),
            workers: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_tickets(role: Role, tickets: Vec<Ticket>) -> Arc<Self> {
        let portal = Self::new(role);
        *portal.tickets.lock().unwrap() = tickets;
        portal
    }

    pub fn context(self: &Arc<Self>) -> AppContext {
        let config =
            AppConfig::resolve(StoredConfig::default(), PathBuf::new(), |_| None).unwrap();
        AppContext::new(
            config,
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        )
    }

    /// Makes every later call of `operation` fail like a dropped connection
    /// (or rejected credentials, for login).
    pub fn fail(&self, operation: Operation) {
        let failure = match operation {
            Operation::Login => Failure::Expired,
            _ => Failure::Outage,
        };
        self.failures.lock().unwrap().insert(operation, failure);
    }

    /// Makes `operation` answer as if the session cookie had expired.
    pub fn expire(&self, operation: Operation) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation, Failure::Expired);
    }

    pub fn recover(&self, operation: Operation) {
        self.failures.lock().unwrap().remove(&operation);
    }

    /// Swaps the backend's tickets, as if someone else had changed them.
    pub fn set_tickets(&self, tickets: Vec<Ticket>) {
        *self.tickets.lock().unwrap() = tickets;
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored_tickets(&self) -> Vec<Ticket> {
        self.tickets.lock().unwrap().clone()
    }

    fn record(&self, operation: Operation) -> AppResult<()> {
        self.calls.lock().unwrap().push(operation);
        match self.failures.lock().unwrap().get(&operation) {
            None => Ok(()),
            Some(Failure::Outage) => Err(AppError::Network("simulated outage".to_string())),
            Some(Failure::Expired) => Err(AppError::Auth("Invalid credentials".to_string())),
        }
    }
}

pub fn ticket(id: &str, status: TicketStatus, department: Option<&str>) -> Ticket {
    Ticket {
        id: TicketId::new(id),
        title: format!("Ticket {id}"),
        description: "Reported from the ward".to_string(),
        status,
        priority: Priority::Medium,
        category: Some("electrical".to_string()),
        department: department.map(str::to_string),
        department_id: None,
        assigned_to: None,
        location_details: None,
        created_at: Some("2025-10-21T20:40:09".to_string()),
    }
}

#[async_trait]
impl SessionService for FakePortal {
    async fn login(&self, _credentials: &Credentials) -> AppResult<SessionInfo> {
        self.record(Operation::Login)?;
        Ok(SessionInfo {
            role: self.role,
            specialty: None,
            department: None,
        })
    }

    async fn logout(&self) -> AppResult<()> {
        self.record(Operation::Logout)
    }

    async fn status(&self) -> AuthStatus {
        AuthStatus {
            authenticated: true,
            role: Some(self.role.as_str().to_string()),
            username: None,
        }
    }
}

#[async_trait]
impl TicketService for FakePortal {
    async fn list_tickets(&self, _scope: &TicketScope) -> AppResult<Vec<Ticket>> {
        self.record(Operation::ListTickets)?;
        Ok(self.stored_tickets())
    }

    async fn create_ticket(
        &self,
        _scope: &TicketScope,
        ticket: &NewTicket,
    ) -> AppResult<TicketReceipt> {
        self.record(Operation::CreateTicket)?;
        let mut tickets = self.tickets.lock().unwrap();
        let id = format!("T-{}", tickets.len() + 1);
        tickets.push(Ticket {
            id: TicketId::new(id.clone()),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: TicketStatus::Open,
            priority: ticket.priority,
            category: Some(ticket.category.clone()),
            department: None,
            department_id: ticket.department_id.clone(),
            assigned_to: None,
            location_details: ticket.location_details.clone(),
            created_at: None,
        });
        Ok(TicketReceipt {
            message: Some("Ticket created successfully".to_string()),
            ticket_id: Some(id),
        })
    }

    async fn update_status(
        &self,
        _scope: &TicketScope,
        id: &TicketId,
        status: TicketStatus,
    ) -> AppResult<()> {
        self.record(Operation::UpdateStatus)?;
        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .iter_mut()
            .find(|ticket| &ticket.id == id)
            .ok_or_else(|| AppError::Server {
                status: 404,
                message: "Ticket not found".to_string(),
            })?;
        ticket.status = status;
        Ok(())
    }
}

#[async_trait]
impl ProfileService for FakePortal {
    async fn patient_profile(&self) -> AppResult<PatientProfile> {
        self.record(Operation::Profile)?;
        Ok(PatientProfile {
            name: Some("Amina Wanjiru".to_string()),
            ..PatientProfile::default()
        })
    }
}

#[async_trait]
impl MaintenanceService for FakePortal {
    async fn workers(&self) -> AppResult<Vec<Worker>> {
        self.record(Operation::Workers)?;
        Ok(self.workers.lock().unwrap().clone())
    }

    async fn add_worker(&self, worker: &NewWorker) -> AppResult<()> {
        self.record(Operation::AddWorker)?;
        let mut workers = self.workers.lock().unwrap();
        let id = workers.len() + 1;
        workers.push(Worker {
            id: Some(id.to_string()),
            name: worker.name.clone(),
            task: worker.task.clone(),
        });
        Ok(())
    }

    async fn admin_stats(&self) -> AppResult<AdminStats> {
        self.record(Operation::Stats)?;
        let tickets = self.tickets.lock().unwrap();
        let count = |status: TicketStatus| {
            tickets
                .iter()
                .filter(|ticket| ticket.status == status)
                .count() as u64
        };
        Ok(AdminStats {
            tickets: tickets.len() as u64,
            pending: count(TicketStatus::Open),
            assigned: count(TicketStatus::InProgress),
            resolved: count(TicketStatus::Closed),
            ..AdminStats::default()
        })
    }
}
