use tracing::warn;

use crate::context::AppContext;
use crate::domain::menu::MenuState;
use crate::domain::profile::PatientProfile;
use crate::domain::role::{DashboardKind, Role};
use crate::domain::stats::AdminStats;
use crate::domain::ticket::TicketId;
use crate::domain::worker::{NewWorker, Worker};
use crate::error::{AppError, AppResult};
use crate::services::TicketScope;
use crate::workflow::session::{Route, SignedIn, sign_out};
use crate::workflow::tickets::TicketViewModel;

/// What the host should do after a shell action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOutcome {
    Stay,
    Navigate(Route),
}

fn scope_for(session: &SignedIn) -> Option<TicketScope> {
    match session.role {
        Role::Patient => Some(TicketScope::Own),
        Role::Department | Role::Requester => Some(TicketScope::Department {
            name: session.department.clone(),
        }),
        Role::Admin => Some(TicketScope::All),
        _ => None,
    }
}

/// State owned by one mounted dashboard. Every failure is caught here and
/// kept as an inline message; an expired session sends the user back to the
/// login screen.
pub struct DashboardShell {
    session: SignedIn,
    kind: DashboardKind,
    pub menu: MenuState,
    tickets: Option<TicketViewModel>,
    profile: Option<PatientProfile>,
    stats: Option<AdminStats>,
    workers: Vec<Worker>,
    error: Option<String>,
}

impl DashboardShell {
    pub fn new(session: SignedIn) -> Self {
        let kind = session.role.dashboard();
        Self {
            menu: MenuState::new(session.role),
            tickets: scope_for(&session).map(TicketViewModel::new),
            session,
            kind,
            profile: None,
            stats: None,
            workers: Vec::new(),
            error: None,
        }
    }

    pub fn session(&self) -> &SignedIn {
        &self.session
    }

    pub fn kind(&self) -> DashboardKind {
        self.kind
    }

    pub fn tickets(&self) -> Option<&TicketViewModel> {
        self.tickets.as_ref()
    }

    pub fn tickets_mut(&mut self) -> Option<&mut TicketViewModel> {
        self.tickets.as_mut()
    }

    pub fn profile(&self) -> Option<&PatientProfile> {
        self.profile.as_ref()
    }

    pub fn stats(&self) -> Option<&AdminStats> {
        self.stats.as_ref()
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Initial fetch for this dashboard kind.
    pub async fn mount(&mut self, ctx: &AppContext) -> ShellOutcome {
        let result = self.load(ctx).await;
        self.settle(result)
    }

    pub async fn refresh(&mut self, ctx: &AppContext) -> ShellOutcome {
        self.mount(ctx).await
    }

    /// Fetches everything first and applies it only when every call succeeded.
    async fn load(&mut self, ctx: &AppContext) -> AppResult<()> {
        let profile = if self.kind == DashboardKind::Patient {
            Some(ctx.profiles.patient_profile().await?)
        } else {
            None
        };
        let tickets = match self.tickets.as_ref() {
            Some(model) => Some(model.fetch(ctx.tickets.as_ref()).await?),
            None => None,
        };
        let stats = if self.kind == DashboardKind::Admin {
            Some(ctx.maintenance.admin_stats().await?)
        } else {
            None
        };
        let workers = if self.kind.loads_workers() {
            Some(ctx.maintenance.workers().await?)
        } else {
            None
        };

        if profile.is_some() {
            self.profile = profile;
        }
        if let (Some(model), Some(tickets)) = (self.tickets.as_mut(), tickets) {
            model.replace(tickets);
        }
        if stats.is_some() {
            self.stats = stats;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
        Ok(())
    }

    pub async fn create_ticket(&mut self, ctx: &AppContext) -> ShellOutcome {
        let result = match self.tickets.as_mut() {
            Some(tickets) => tickets.create(ctx.tickets.as_ref()).await,
            None => Err(self.no_tickets()),
        };
        self.settle(result)
    }

    pub async fn advance_ticket(&mut self, ctx: &AppContext, id: &TicketId) -> ShellOutcome {
        let result = match self.tickets.as_mut() {
            Some(tickets) => tickets.advance(ctx.tickets.as_ref(), id).await,
            None => Err(self.no_tickets()),
        };
        self.settle(result)
    }

    pub async fn add_worker(
        &mut self,
        ctx: &AppContext,
        worker: AppResult<NewWorker>,
    ) -> ShellOutcome {
        let result = self.submit_worker(ctx, worker).await;
        self.settle(result)
    }

    async fn submit_worker(
        &mut self,
        ctx: &AppContext,
        worker: AppResult<NewWorker>,
    ) -> AppResult<()> {
        let worker = worker?;
        ctx.maintenance.add_worker(&worker).await?;
        self.workers = ctx.maintenance.workers().await?;
        Ok(())
    }

    pub async fn logout(&mut self, ctx: &AppContext) -> ShellOutcome {
        ShellOutcome::Navigate(sign_out(ctx).await)
    }

    /// Records a client-side problem (bad command input and the like).
    pub fn report(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    fn no_tickets(&self) -> AppError {
        AppError::Validation(format!(
            "the {} dashboard has no ticket list",
            self.session.role
        ))
    }

    fn settle(&mut self, result: AppResult<()>) -> ShellOutcome {
        match result {
            Ok(()) => {
                self.error = None;
                ShellOutcome::Stay
            }
            Err(err) if err.is_auth() => {
                warn!(error = %err, "session expired; returning to login");
                ShellOutcome::Navigate(Route::Login)
            }
            Err(err) => {
                warn!(error = %err, dashboard = self.kind.route(), "dashboard action failed");
                self.error = Some(err.to_string());
                ShellOutcome::Stay
            }
        }
    }
}
