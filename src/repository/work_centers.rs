//! Work center methods on Repository

use super::{new_id, Repository};
use crate::{
    error::{AppError, AppResult},
    models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
};

impl Repository {
    pub async fn work_centers_list(&self) -> Vec<WorkCenter> {
        let state = self.state.read().await;
        state.work_centers.values().cloned().collect()
    }

    pub async fn work_centers_get_by_id(&self, id: &str) -> AppResult<WorkCenter> {
        let state = self.state.read().await;
        state
            .work_centers
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Work center {} not found", id)))
    }

    pub async fn work_centers_create(&self, data: &CreateWorkCenter) -> WorkCenter {
        let work_center = WorkCenter {
            id: new_id(),
            code: data.code.clone(),
            tag: data.tag.clone(),
            alternative_work_center_ids: data.alternative_work_center_ids.clone(),
            cost_per_hour: data.cost_per_hour,
            capacity_time_efficiency: data.capacity_time_efficiency,
            oee_target: data.oee_target,
        };

        let mut state = self.state.write().await;
        state
            .work_centers
            .insert(work_center.id.clone(), work_center.clone());
        work_center
    }

    pub async fn work_centers_update(&self, id: &str, data: &UpdateWorkCenter) -> AppResult<WorkCenter> {
        let mut state = self.state.write().await;
        let work_center = state
            .work_centers
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Work center {} not found", id)))?;
        work_center.apply(data);
        Ok(work_center.clone())
    }

    pub async fn work_centers_delete(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        state.work_centers.shift_remove(id).is_some()
    }
}
