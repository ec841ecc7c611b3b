//! HTTP API module for the warehouse labor cost engine.
//!
//! This module provides the REST API endpoints for analyzing timesheets,
//! provisioning and editing wage rates, managing workers, and correlating
//! cargo with labor.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CargoRelationshipRequest, EffectiveRateQuery, ProvisionQuery, ProvisionRequest,
    RenameWorkerRequest, ResolveRateRequest, TimesheetRequest, WageRateListQuery,
    WorkerListQuery,
};
pub use response::{
    AnalyzeResponse, ApiError, ApiErrorResponse, ProvisionResponse, WageRateHistoryResponse,
};
pub use state::AppState;
