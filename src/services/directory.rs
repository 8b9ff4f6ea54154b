use async_trait::async_trait;

use crate::domain::profile::PatientProfile;
use crate::domain::stats::AdminStats;
use crate::domain::worker::{NewWorker, Worker};
use crate::error::AppResult;

#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn patient_profile(&self) -> AppResult<PatientProfile>;
}

#[async_trait]
pub trait MaintenanceService: Send + Sync {
    async fn workers(&self) -> AppResult<Vec<Worker>>;
    async fn add_worker(&self, worker: &NewWorker) -> AppResult<()>;
    async fn admin_stats(&self) -> AppResult<AdminStats>;
}
