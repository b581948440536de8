//! Business logic services

pub mod auth;
pub mod departments;
pub mod equipment;
pub mod reports;
pub mod requests;
pub mod teams;
pub mod users;
pub mod work_centers;

use std::sync::Arc;

use crate::{clock::Clock, config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
    pub teams: teams::TeamsService,
    pub users: users::UsersService,
    pub departments: departments::DepartmentsService,
    pub work_centers: work_centers::WorkCentersService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services over one shared store and clock
    pub fn new(repository: Repository, auth_config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, clock.clone()),
            equipment: equipment::EquipmentService::new(repository.clone(), clock.clone()),
            requests: requests::RequestsService::new(repository.clone(), clock.clone()),
            teams: teams::TeamsService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            departments: departments::DepartmentsService::new(repository.clone()),
            work_centers: work_centers::WorkCentersService::new(repository.clone()),
            reports: reports::ReportsService::new(repository, clock),
        }
    }
}
