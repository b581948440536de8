//! Maintenance team methods on Repository

use super::{new_id, Repository};
use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, MaintenanceTeam, UpdateTeam},
};

impl Repository {
    pub async fn teams_list(&self) -> Vec<MaintenanceTeam> {
        let state = self.state.read().await;
        state.teams.values().cloned().collect()
    }

    pub async fn teams_get_by_id(&self, id: &str) -> AppResult<MaintenanceTeam> {
        let state = self.state.read().await;
        state
            .teams
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    pub async fn teams_create(&self, data: &CreateTeam) -> MaintenanceTeam {
        let team = MaintenanceTeam {
            id: new_id(),
            name: data.name.clone(),
            description: data.description.clone(),
            member_ids: data.member_ids.clone(),
        };

        let mut state = self.state.write().await;
        state.teams.insert(team.id.clone(), team.clone());
        team
    }

    /// Update a team. Names already copied onto requests are not re-synced.
    pub async fn teams_update(&self, id: &str, data: &UpdateTeam) -> AppResult<MaintenanceTeam> {
        let mut state = self.state.write().await;
        let team = state
            .teams
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;
        team.apply(data);
        Ok(team.clone())
    }

    pub async fn teams_delete(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        state.teams.shift_remove(id).is_some()
    }
}
