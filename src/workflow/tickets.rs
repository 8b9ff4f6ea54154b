use tracing::info;

use crate::domain::ticket::{StatusFilter, Ticket, TicketForm, TicketId, TicketStatus};
use crate::error::{AppError, AppResult};
use crate::services::{TicketScope, TicketService};

/// The transition a dashboard may offer for one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionAction {
    pub to: TicketStatus,
}

impl TransitionAction {
    pub fn label(&self) -> &'static str {
        self.to.action_label()
    }
}

/// Ticket list owned by one dashboard. The list only ever holds what the
/// backend last returned: mutations are followed by a full refetch and a
/// failed call leaves it untouched.
#[derive(Debug, Clone)]
pub struct TicketViewModel {
    scope: TicketScope,
    tickets: Vec<Ticket>,
    pub form: TicketForm,
    filter: StatusFilter,
    search: String,
}

impl TicketViewModel {
    pub fn new(scope: TicketScope) -> Self {
        Self {
            scope,
            tickets: Vec::new(),
            form: TicketForm::default(),
            filter: StatusFilter::All,
            search: String::new(),
        }
    }

    pub fn scope(&self) -> &TicketScope {
        &self.scope
    }

    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn find(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| &ticket.id == id)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
    }

    /// Tickets after the status filter and search term.
    pub fn visible(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|ticket| self.filter.admits(ticket))
            .filter(|ticket| ticket.matches_search(&self.search))
            .collect()
    }

    /// The single forward move this caller may make on `ticket`, if any.
    pub fn action_for(&self, ticket: &Ticket) -> Option<TransitionAction> {
        if !self.scope.can_transition() {
            return None;
        }
        ticket
            .status
            .successor()
            .map(|to| TransitionAction { to })
    }

    pub async fn refresh(&mut self, service: &dyn TicketService) -> AppResult<()> {
        let tickets = self.fetch(service).await?;
        self.replace(tickets);
        Ok(())
    }

    /// Reads the list for this scope without touching the model.
    pub async fn fetch(&self, service: &dyn TicketService) -> AppResult<Vec<Ticket>> {
        let mut tickets = service.list_tickets(&self.scope).await?;
        if let TicketScope::Department { name: Some(name) } = &self.scope {
            tickets.retain(|ticket| ticket.belongs_to_department(name));
        }
        Ok(tickets)
    }

    pub fn replace(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
    }

    /// Submits the form, clears it and refetches.
    pub async fn create(&mut self, service: &dyn TicketService) -> AppResult<()> {
        if !self.scope.can_create() {
            return Err(AppError::Validation(
                "this dashboard cannot raise tickets".to_string(),
            ));
        }
        let ticket = self.form.validate()?;
        // Patients pick the department; department users post under their own.
        if self.scope == TicketScope::Own && ticket.department_id.is_none() {
            return Err(AppError::Validation(
                "choose the department the ticket is for".to_string(),
            ));
        }
        service.create_ticket(&self.scope, &ticket).await?;
        self.form = TicketForm::default();
        self.refresh(service).await
    }

    /// Moves a ticket to `next`, which must be its sole successor.
    pub async fn transition(
        &mut self,
        service: &dyn TicketService,
        id: &TicketId,
        next: TicketStatus,
    ) -> AppResult<()> {
        let ticket = self
            .find(id)
            .ok_or_else(|| AppError::Validation(format!("no ticket {id} on this dashboard")))?;
        let action = self.action_for(ticket).ok_or_else(|| {
            AppError::Validation(format!(
                "ticket {id} is {} and offers no further action here",
                ticket.status.label()
            ))
        })?;
        if action.to != next {
            return Err(AppError::Validation(format!(
                "ticket {id} can only move from {} to {}",
                ticket.status.label(),
                action.to.label()
            )));
        }

        service.update_status(&self.scope, id, next).await?;
        info!(ticket = %id, status = %next, "transition confirmed");
        self.refresh(service).await
    }

    /// Applies whatever action the ticket currently offers.
    pub async fn advance(&mut self, service: &dyn TicketService, id: &TicketId) -> AppResult<()> {
        let next = self
            .find(id)
            .and_then(|ticket| self.action_for(ticket))
            .map(|action| action.to)
            .ok_or_else(|| AppError::Validation(format!("ticket {id} has no action to apply")))?;
        self.transition(service, id, next).await
    }
}
