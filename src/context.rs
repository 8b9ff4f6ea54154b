use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::infra::portal::PortalClient;
use crate::services::{MaintenanceService, ProfileService, SessionService, TicketService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<dyn SessionService>,
    pub tickets: Arc<dyn TicketService>,
    pub profiles: Arc<dyn ProfileService>,
    pub maintenance: Arc<dyn MaintenanceService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        session: Arc<dyn SessionService>,
        tickets: Arc<dyn TicketService>,
        profiles: Arc<dyn ProfileService>,
        maintenance: Arc<dyn MaintenanceService>,
    ) -> Self {
        Self {
            config,
            session,
            tickets,
            profiles,
            maintenance,
        }
    }

    /// Wires every service to one portal client so they share a session cookie.
    pub fn connect(config: AppConfig) -> AppResult<Self> {
        let portal = Arc::new(PortalClient::new(
            &config.api_base_url,
            config.request_timeout,
        )?);
        Ok(Self::new(
            config,
            portal.clone(),
            portal.clone(),
            portal.clone(),
            portal,
        ))
    }
}
