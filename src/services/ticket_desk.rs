use async_trait::async_trait;

use crate::domain::ticket::{NewTicket, Ticket, TicketId, TicketReceipt, TicketStatus};
use crate::error::AppResult;

/// Which slice of the ticket book a dashboard works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketScope {
    /// A patient's own tickets.
    Own,
    /// A department's tickets, optionally narrowed to one department name.
    Department { name: Option<String> },
    /// Every ticket (administration).
    All,
}

impl TicketScope {
    pub fn can_create(&self) -> bool {
        matches!(self, TicketScope::Own | TicketScope::Department { .. })
    }

    pub fn can_transition(&self) -> bool {
        matches!(self, TicketScope::Department { .. } | TicketScope::All)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketScope::Own => "own",
            TicketScope::Department { .. } => "department",
            TicketScope::All => "all",
        }
    }
}

#[async_trait]
pub trait TicketService: Send + Sync {
    async fn list_tickets(&self, scope: &TicketScope) -> AppResult<Vec<Ticket>>;
    async fn create_ticket(
        &self,
        scope: &TicketScope,
        ticket: &NewTicket,
    ) -> AppResult<TicketReceipt>;
    async fn update_status(
        &self,
        scope: &TicketScope,
        id: &TicketId,
        status: TicketStatus,
    ) -> AppResult<()>;
}
