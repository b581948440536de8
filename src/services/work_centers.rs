//! Work center service

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
    repository::Repository,
};

#[derive(Clone)]
pub struct WorkCentersService {
    repository: Repository,
}

impl WorkCentersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<WorkCenter> {
        self.repository.work_centers_list().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<WorkCenter> {
        self.repository.work_centers_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateWorkCenter) -> AppResult<WorkCenter> {
        check_cost(data.cost_per_hour)?;
        let work_center = self.repository.work_centers_create(data).await;
        tracing::info!(work_center_id = %work_center.id, code = %work_center.code, "Work center created");
        Ok(work_center)
    }

    pub async fn update(&self, id: &str, data: &UpdateWorkCenter) -> AppResult<WorkCenter> {
        if let Some(cost) = data.cost_per_hour {
            check_cost(cost)?;
        }
        self.repository.work_centers_update(id, data).await
    }

    pub async fn delete(&self, id: &str) {
        if self.repository.work_centers_delete(id).await {
            tracing::info!(work_center_id = %id, "Work center deleted");
        }
    }
}

fn check_cost(cost: Decimal) -> AppResult<()> {
    if cost < Decimal::ZERO {
        return Err(AppError::Validation(
            "Cost per hour cannot be negative".to_string(),
        ));
    }
    Ok(())
}
