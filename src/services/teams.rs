//! Maintenance team service

use crate::{
    error::AppResult,
    models::team::{CreateTeam, MaintenanceTeam, UpdateTeam},
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<MaintenanceTeam> {
        self.repository.teams_list().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<MaintenanceTeam> {
        self.repository.teams_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTeam) -> MaintenanceTeam {
        let team = self.repository.teams_create(data).await;
        tracing::info!(team_id = %team.id, name = %team.name, "Team created");
        team
    }

    pub async fn update(&self, id: &str, data: &UpdateTeam) -> AppResult<MaintenanceTeam> {
        self.repository.teams_update(id, data).await
    }

    pub async fn delete(&self, id: &str) {
        if self.repository.teams_delete(id).await {
            tracing::info!(team_id = %id, "Team deleted");
        }
    }
}
