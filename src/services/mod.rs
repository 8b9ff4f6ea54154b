pub mod directory;
pub mod session;
pub mod ticket_desk;

pub use directory::{MaintenanceService, ProfileService};
pub use session::SessionService;
pub use ticket_desk::{TicketScope, TicketService};
