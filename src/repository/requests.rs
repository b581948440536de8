//! Maintenance request methods on Repository: create/update/delete with the
//! overdue recomputation and the scrap cascade.

use chrono::{DateTime, Utc};

use super::{new_id, Repository, StoreState};
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::Equipment,
        request::{
            compute_is_overdue, CreateRequest, MaintenanceRequest, NameProjection, RequestStatus,
            UpdateRequest, SCRAP_NOTE,
        },
    },
};

/// Result of a request write
#[derive(Debug, Clone)]
pub struct RequestWrite {
    pub request: MaintenanceRequest,
    /// Equipment deactivated by this write, if the request ended up scrapped
    pub scrapped_equipment: Option<Equipment>,
}

fn non_empty(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|id| !id.is_empty())
}

impl StoreState {
    fn equipment_name(&self, equipment_id: &str) -> Option<String> {
        self.equipment.get(equipment_id).map(|e| e.name.clone())
    }

    fn equipment_category(&self, equipment_id: &str) -> Option<String> {
        self.equipment.get(equipment_id).map(|e| e.category.clone())
    }

    fn team_name(&self, team_id: &str) -> Option<String> {
        self.teams.get(team_id).map(|t| t.name.clone())
    }

    fn user_name(&self, user_id: &str) -> Option<String> {
        self.users.get(user_id).map(|u| u.name.clone())
    }

    /// Names for the references a patch touches
    fn project_patch(&self, patch: &UpdateRequest) -> NameProjection {
        NameProjection {
            equipment_name: patch
                .equipment_id
                .as_deref()
                .and_then(|id| self.equipment_name(id)),
            category: patch
                .equipment_id
                .as_deref()
                .and_then(|id| self.equipment_category(id)),
            team_name: patch
                .maintenance_team_id
                .as_deref()
                .and_then(|id| self.team_name(id)),
            technician_name: patch
                .assigned_technician_id
                .as_ref()
                .and_then(|id| id.as_deref())
                .and_then(|id| self.user_name(id)),
        }
    }

    /// Deactivate the equipment behind a scrapped request
    fn scrap_equipment(&mut self, equipment_id: &str) -> Option<Equipment> {
        let equipment = self.equipment.get_mut(equipment_id)?;
        equipment.scrap(SCRAP_NOTE);
        Some(equipment.clone())
    }
}

impl Repository {
    /// All requests in insertion order
    pub async fn requests_list(&self) -> Vec<MaintenanceRequest> {
        let state = self.state.read().await;
        state.requests.values().cloned().collect()
    }

    /// Get request by ID
    pub async fn requests_get_by_id(&self, id: &str) -> AppResult<MaintenanceRequest> {
        let state = self.state.read().await;
        state
            .requests
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Requests raised against one piece of equipment
    pub async fn requests_by_equipment(&self, equipment_id: &str) -> Vec<MaintenanceRequest> {
        let state = self.state.read().await;
        state
            .requests
            .values()
            .filter(|r| r.equipment_id == equipment_id)
            .cloned()
            .collect()
    }

    /// Create a request.
    ///
    /// Team and technician default to the equipment's; names are projected
    /// from whatever the references resolve to. Unknown references are
    /// stored as given.
    pub async fn requests_create(&self, data: &CreateRequest, now: DateTime<Utc>) -> RequestWrite {
        let mut state = self.state.write().await;

        let equipment = state.equipment.get(&data.equipment_id);
        let team_id = non_empty(&data.maintenance_team_id)
            .map(str::to_string)
            .or_else(|| equipment.map(|e| e.maintenance_team_id.clone()))
            .unwrap_or_default();
        let technician_id = non_empty(&data.assigned_technician_id)
            .map(str::to_string)
            .or_else(|| {
                equipment
                    .map(|e| e.assigned_technician_id.clone())
                    .filter(|id| !id.is_empty())
            });

        let status = data.status.unwrap_or(RequestStatus::New);

        let request = MaintenanceRequest {
            id: new_id(),
            subject: data.subject.clone(),
            equipment_id: data.equipment_id.clone(),
            equipment_name: state.equipment_name(&data.equipment_id),
            request_type: data.request_type,
            scheduled_date: data.scheduled_date,
            duration: data.duration,
            status,
            assigned_technician_name: technician_id.as_deref().and_then(|id| state.user_name(id)),
            assigned_technician_id: technician_id,
            maintenance_team_name: state.team_name(&team_id),
            maintenance_team_id: team_id,
            category: state.equipment_category(&data.equipment_id),
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
            completed_at: status.is_closed().then_some(now),
            is_overdue: compute_is_overdue(data.scheduled_date, status, now),
        };

        state.requests.insert(request.id.clone(), request.clone());

        let scrapped_equipment = if request.status == RequestStatus::Scrap {
            state.scrap_equipment(&request.equipment_id)
        } else {
            None
        };

        RequestWrite {
            request,
            scrapped_equipment,
        }
    }

    /// Merge a patch into a request, recompute `is_overdue` and apply the
    /// scrap cascade, all under one write lock.
    pub async fn requests_update(
        &self,
        id: &str,
        patch: &UpdateRequest,
        now: DateTime<Utc>,
    ) -> AppResult<RequestWrite> {
        let mut state = self.state.write().await;

        let names = state.project_patch(patch);
        let request = state
            .requests
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))?;
        request.apply_patch(patch, names, now);
        let request = request.clone();

        let scrapped_equipment = if request.status == RequestStatus::Scrap {
            state.scrap_equipment(&request.equipment_id)
        } else {
            None
        };

        Ok(RequestWrite {
            request,
            scrapped_equipment,
        })
    }

    /// Remove a request. No cascade; returns whether it existed.
    pub async fn requests_delete(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        state.requests.shift_remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::request::RequestType, repository::SeedData};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn repository() -> Repository {
        Repository::with_seed(SeedData::demo().unwrap())
    }

    fn create_data(equipment_id: &str) -> CreateRequest {
        CreateRequest {
            subject: "Grinding noise".to_string(),
            equipment_id: equipment_id.to_string(),
            request_type: RequestType::Corrective,
            scheduled_date: None,
            duration: None,
            status: None,
            assigned_technician_id: None,
            maintenance_team_id: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_projects_names_from_equipment() {
        let repo = repository();
        let write = repo.requests_create(&create_data("5"), now()).await;
        let request = write.request;

        assert_eq!(request.equipment_name.as_deref(), Some("Forklift 2000"));
        assert_eq!(request.category.as_deref(), Some("Vehicle"));
        assert_eq!(request.maintenance_team_id, "4");
        assert_eq!(request.maintenance_team_name.as_deref(), Some("Vehicle Maintenance"));
        assert_eq!(request.assigned_technician_id.as_deref(), Some("10"));
        assert_eq!(request.assigned_technician_name.as_deref(), Some("Frank Wilson"));
        assert_eq!(request.status, RequestStatus::New);
        assert!(!request.is_overdue);
        assert_eq!(request.created_at, now());
    }

    #[tokio::test]
    async fn test_create_accepts_unknown_references() {
        let repo = repository();
        let mut data = create_data("does-not-exist");
        data.maintenance_team_id = Some("99".to_string());
        let request = repo.requests_create(&data, now()).await.request;

        assert_eq!(request.equipment_id, "does-not-exist");
        assert_eq!(request.equipment_name, None);
        assert_eq!(request.maintenance_team_id, "99");
        assert_eq!(request.maintenance_team_name, None);
        assert_eq!(request.assigned_technician_id, None);
    }

    #[tokio::test]
    async fn test_create_with_past_date_is_overdue() {
        let repo = repository();
        let mut data = create_data("1");
        data.request_type = RequestType::Preventive;
        data.scheduled_date = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let write = repo.requests_create(&data, now()).await;
        assert!(write.request.is_overdue);

        let write = repo
            .requests_update(&write.request.id, &UpdateRequest::status(RequestStatus::Repaired), now())
            .await
            .unwrap();
        assert!(!write.request.is_overdue);
        assert_eq!(write.request.completed_at, Some(now()));
    }

    #[tokio::test]
    async fn test_scrap_cascades_onto_equipment() {
        let repo = repository();
        let write = repo
            .requests_update("4", &UpdateRequest::status(RequestStatus::Scrap), now())
            .await
            .unwrap();

        assert_eq!(write.request.status, RequestStatus::Scrap);
        assert!(!write.request.is_overdue);
        let scrapped = write.scrapped_equipment.unwrap();
        assert_eq!(scrapped.id, "5");

        let equipment = repo.equipment_get_by_id("5").await.unwrap();
        assert!(!equipment.is_active);
        assert_eq!(equipment.notes.as_deref(), Some(SCRAP_NOTE));
    }

    #[tokio::test]
    async fn test_non_scrap_update_leaves_equipment_alone() {
        let repo = repository();
        let write = repo
            .requests_update("4", &UpdateRequest::status(RequestStatus::Repaired), now())
            .await
            .unwrap();
        assert!(write.scrapped_equipment.is_none());
        assert!(repo.equipment_get_by_id("5").await.unwrap().is_active);
    }

    #[tokio::test]
    async fn test_scrap_with_missing_equipment_still_updates_request() {
        let repo = repository();
        let request = repo.requests_create(&create_data("ghost"), now()).await.request;
        let write = repo
            .requests_update(&request.id, &UpdateRequest::status(RequestStatus::Scrap), now())
            .await
            .unwrap();
        assert_eq!(write.request.status, RequestStatus::Scrap);
        assert!(write.scrapped_equipment.is_none());
    }

    #[tokio::test]
    async fn test_delete_does_not_touch_equipment() {
        let repo = repository();
        let before = repo.equipment_get_by_id("1").await.unwrap();
        assert!(repo.requests_delete("1").await);
        assert!(!repo.requests_delete("1").await);
        assert!(repo.requests_get_by_id("1").await.is_err());
        assert_eq!(repo.equipment_get_by_id("1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_unknown_request() {
        let repo = repository();
        let result = repo
            .requests_update("nope", &UpdateRequest::status(RequestStatus::Scrap), now())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_requests_by_equipment() {
        let repo = repository();
        let requests = repo.requests_by_equipment("1").await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].subject, "Leaking Oil");
    }
}
