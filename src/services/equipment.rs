//! Equipment service

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentDetails, EquipmentQuery, UpdateEquipment},
    repository::Repository,
};

const MISSING_NAME: &str = "N/A";

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl EquipmentService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> Vec<Equipment> {
        self.repository.equipment_list(query).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.repository.equipment_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> Equipment {
        let equipment = self.repository.equipment_create(data).await;
        tracing::info!(equipment_id = %equipment.id, name = %equipment.name, "Equipment created");
        equipment
    }

    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment_update(id, data).await
    }

    pub async fn delete(&self, id: &str) {
        if self.repository.equipment_delete(id).await {
            tracing::info!(equipment_id = %id, "Equipment deleted");
        }
    }

    /// Equipment with its references resolved to names and its request history
    pub async fn details(&self, id: &str) -> AppResult<EquipmentDetails> {
        let now = self.clock.now();
        self.repository
            .read(|state| {
                let equipment = state
                    .equipment
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

                let name_or_missing = |name: Option<&String>| {
                    name.cloned().unwrap_or_else(|| MISSING_NAME.to_string())
                };

                let requests: Vec<_> = state
                    .requests
                    .values()
                    .filter(|r| r.equipment_id == equipment.id)
                    .cloned()
                    .map(|r| r.evaluated_at(now))
                    .collect();
                let open_requests = requests.iter().filter(|r| !r.status.is_closed()).count();

                Ok(EquipmentDetails {
                    department_name: name_or_missing(
                        state.departments.get(&equipment.department).map(|d| &d.name),
                    ),
                    employee_name: name_or_missing(
                        state.users.get(&equipment.assigned_employee).map(|u| &u.name),
                    ),
                    team_name: name_or_missing(
                        state.teams.get(&equipment.maintenance_team_id).map(|t| &t.name),
                    ),
                    technician_name: name_or_missing(
                        state.users.get(&equipment.assigned_technician_id).map(|u| &u.name),
                    ),
                    total_requests: requests.len(),
                    open_requests,
                    requests,
                    equipment,
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        models::equipment::UpdateEquipment,
        repository::SeedData,
    };
    use chrono::{TimeZone, Utc};

    fn service() -> EquipmentService {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        EquipmentService::new(Repository::with_seed(SeedData::demo().unwrap()), Arc::new(clock))
    }

    #[tokio::test]
    async fn test_details_resolve_names() {
        let svc = service();
        let details = svc.details("1").await.unwrap();
        assert_eq!(details.department_name, "Production");
        assert_eq!(details.employee_name, "John Doe");
        assert_eq!(details.team_name, "Mechanics");
        assert_eq!(details.total_requests, 1);
        assert_eq!(details.open_requests, 1);
    }

    #[tokio::test]
    async fn test_details_fall_back_to_placeholder() {
        let svc = service();
        svc.update(
            "1",
            &UpdateEquipment {
                maintenance_team_id: Some("missing".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let details = svc.details("1").await.unwrap();
        assert_eq!(details.team_name, "N/A");
        assert!(matches!(svc.details("missing").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let svc = service();
        svc.delete("2").await;
        svc.delete("2").await;
        assert!(svc.get_by_id("2").await.is_err());
    }
}
