//! Maintenance request lifecycle service

use std::sync::Arc;

use chrono::Duration;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::{
        report::{CalendarEvent, CalendarQuery, EventState, KanbanBoard, KanbanColumn},
        request::{
            is_valid_duration, CreateRequest, MaintenanceRequest, RequestQuery, RequestStatus,
            RequestType, UpdateRequest, MAX_DURATION_HOURS,
        },
    },
    repository::{requests::RequestWrite, Repository},
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl RequestsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// List requests with `is_overdue` evaluated against the current time
    pub async fn list(&self, query: &RequestQuery) -> Vec<MaintenanceRequest> {
        let now = self.clock.now();
        self.repository
            .requests_list()
            .await
            .into_iter()
            .map(|r| r.evaluated_at(now))
            .filter(|r| query.matches(r))
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<MaintenanceRequest> {
        let request = self.repository.requests_get_by_id(id).await?;
        Ok(request.evaluated_at(self.clock.now()))
    }

    pub async fn list_by_equipment(&self, equipment_id: &str) -> Vec<MaintenanceRequest> {
        let now = self.clock.now();
        self.repository
            .requests_by_equipment(equipment_id)
            .await
            .into_iter()
            .map(|r| r.evaluated_at(now))
            .collect()
    }

    pub async fn create(&self, data: &CreateRequest) -> AppResult<MaintenanceRequest> {
        check_duration(data.duration)?;
        let write = self.repository.requests_create(data, self.clock.now()).await;
        tracing::info!(
            request_id = %write.request.id,
            equipment_id = %write.request.equipment_id,
            status = %write.request.status,
            "Maintenance request created"
        );
        log_scrap(&write);
        Ok(write.request)
    }

    pub async fn update(&self, id: &str, patch: &UpdateRequest) -> AppResult<MaintenanceRequest> {
        check_duration(patch.new_duration())?;
        let write = self.repository.requests_update(id, patch, self.clock.now()).await?;
        tracing::info!(
            request_id = %write.request.id,
            status = %write.request.status,
            overdue = write.request.is_overdue,
            "Maintenance request updated"
        );
        log_scrap(&write);
        Ok(write.request)
    }

    /// Move a request to another Kanban column
    pub async fn set_status(&self, id: &str, status: RequestStatus) -> AppResult<MaintenanceRequest> {
        self.update(id, &UpdateRequest::status(status)).await
    }

    /// Unconditional removal
    pub async fn delete(&self, id: &str) {
        if self.repository.requests_delete(id).await {
            tracing::info!(request_id = %id, "Maintenance request deleted");
        }
    }

    /// Requests grouped into the four status columns, newest first
    pub async fn kanban(&self) -> KanbanBoard {
        let requests = self.list(&RequestQuery::default()).await;

        let columns = RequestStatus::ALL
            .iter()
            .map(|&status| {
                let mut column: Vec<MaintenanceRequest> = requests
                    .iter()
                    .filter(|r| r.status == status)
                    .cloned()
                    .collect();
                column.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                KanbanColumn {
                    status,
                    title: column_title(status).to_string(),
                    requests: column,
                }
            })
            .collect();

        KanbanBoard { columns }
    }

    /// Scheduled preventive requests as calendar events
    pub async fn calendar(&self, query: &CalendarQuery) -> Vec<CalendarEvent> {
        let query_filter = RequestQuery {
            request_type: Some(RequestType::Preventive),
            ..Default::default()
        };

        self.list(&query_filter)
            .await
            .into_iter()
            .filter_map(calendar_event)
            .filter(|event| query.from.map_or(true, |from| event.end > from))
            .filter(|event| query.to.map_or(true, |to| event.start < to))
            .collect()
    }
}

fn check_duration(hours: Option<f64>) -> AppResult<()> {
    match hours {
        Some(hours) if !is_valid_duration(hours) => Err(AppError::Validation(format!(
            "Duration must be between 0 and {} hours",
            MAX_DURATION_HOURS
        ))),
        _ => Ok(()),
    }
}

fn log_scrap(write: &RequestWrite) {
    if let Some(ref equipment) = write.scrapped_equipment {
        tracing::warn!(
            request_id = %write.request.id,
            equipment_id = %equipment.id,
            "Equipment scrapped and deactivated"
        );
    }
}

fn column_title(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::New => "New",
        RequestStatus::InProgress => "In Progress",
        RequestStatus::Repaired => "Repaired",
        RequestStatus::Scrap => "Scrap",
    }
}

/// One hour when no duration is planned. Requests whose end cannot be
/// represented are left off the calendar.
fn calendar_event(request: MaintenanceRequest) -> Option<CalendarEvent> {
    let start = request.scheduled_date?;
    let minutes = request.duration.map_or(60, |hours| (hours * 60.0).round() as i64);
    let end = match Duration::try_minutes(minutes).and_then(|d| start.checked_add_signed(d)) {
        Some(end) => end,
        None => {
            tracing::warn!(request_id = %request.id, duration = ?request.duration, "Skipping calendar event with unrepresentable end");
            return None;
        }
    };

    let state = match request.status {
        RequestStatus::Repaired => EventState::Repaired,
        RequestStatus::Scrap => EventState::Scrap,
        _ if request.is_overdue => EventState::Overdue,
        _ => EventState::Scheduled,
    };

    let title = format!(
        "{} - {}",
        request.subject,
        request.equipment_name.as_deref().unwrap_or("N/A")
    );

    Some(CalendarEvent {
        id: request.id.clone(),
        title,
        start,
        end,
        state,
        request,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::MockClock, repository::SeedData};
    use chrono::{DateTime, TimeZone, Utc};

    fn clock_at(now: DateTime<Utc>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(now);
        Arc::new(clock)
    }

    fn service(now: DateTime<Utc>) -> RequestsService {
        RequestsService::new(Repository::with_seed(SeedData::demo().unwrap()), clock_at(now))
    }

    fn preventive(date: DateTime<Utc>) -> CreateRequest {
        CreateRequest {
            subject: "Quarterly check".to_string(),
            equipment_id: "9".to_string(),
            request_type: RequestType::Preventive,
            scheduled_date: Some(date),
            duration: Some(1.5),
            status: None,
            assigned_technician_id: None,
            maintenance_team_id: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_reads_reevaluate_overdue() {
        // seeded request 2 is scheduled 2024-12-15 and stored as not overdue
        let before = service(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert!(!before.get_by_id("2").await.unwrap().is_overdue);

        let after = service(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert!(after.get_by_id("2").await.unwrap().is_overdue);
        // repaired request 3 has no date and stays clear
        assert!(!after.get_by_id("3").await.unwrap().is_overdue);
    }

    #[tokio::test]
    async fn test_overdue_filter() {
        let svc = service(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let overdue = svc
            .list(&RequestQuery {
                overdue: Some(true),
                ..Default::default()
            })
            .await;
        let mut ids: Vec<_> = overdue.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["2", "4", "5"]);
    }

    #[tokio::test]
    async fn test_repairing_clears_overdue() {
        let svc = service(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let created = svc
            .create(&preventive(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()))
            .await
            .unwrap();
        assert!(created.is_overdue);

        let repaired = svc.set_status(&created.id, RequestStatus::Repaired).await.unwrap();
        assert!(!repaired.is_overdue);
    }

    #[tokio::test]
    async fn test_kanban_columns_sorted_newest_first() {
        let svc = service(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let board = svc.kanban().await;

        let statuses: Vec<_> = board.columns.iter().map(|c| c.status).collect();
        assert_eq!(statuses, RequestStatus::ALL.to_vec());

        let new_column = &board.columns[0];
        let ids: Vec<_> = new_column.requests.iter().map(|r| r.id.as_str()).collect();
        // request 2 created 2024-11-20, request 5 created 2024-11-18
        assert_eq!(ids, vec!["2", "5"]);
        assert!(board.columns[3].requests.is_empty());
    }

    #[tokio::test]
    async fn test_calendar_events() {
        let svc = service(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let date = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let created = svc.create(&preventive(date)).await.unwrap();

        let events = svc.calendar(&CalendarQuery::default()).await;
        // three seeded preventive requests plus the new one
        assert_eq!(events.len(), 4);

        let event = events.iter().find(|e| e.id == created.id).unwrap();
        assert_eq!(event.start, date);
        assert_eq!(event.end, date + Duration::minutes(90));
        assert_eq!(event.title, "Quarterly check - Air Compressor Unit");
        assert_eq!(event.state, EventState::Scheduled);

        let seeded = events.iter().find(|e| e.id == "2").unwrap();
        assert_eq!(seeded.state, EventState::Overdue);

        let window = svc
            .calendar(&CalendarQuery {
                from: Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()),
                to: None,
            })
            .await;
        assert_eq!(window.len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_duration_is_rejected() {
        let svc = service(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let date = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

        let mut huge = preventive(date);
        huge.duration = Some(1e10);
        assert!(matches!(svc.create(&huge).await, Err(AppError::Validation(_))));

        let negative = UpdateRequest {
            duration: Some(Some(-5.0)),
            ..Default::default()
        };
        assert!(matches!(svc.update("2", &negative).await, Err(AppError::Validation(_))));
        assert_eq!(svc.get_by_id("2").await.unwrap().duration, Some(4.0));

        // clearing stays allowed
        let cleared = UpdateRequest {
            duration: Some(None),
            ..Default::default()
        };
        assert_eq!(svc.update("2", &cleared).await.unwrap().duration, None);
    }

    #[tokio::test]
    async fn test_unrepresentable_end_is_skipped() {
        let repo = Repository::with_seed(SeedData::demo().unwrap());
        let mut request = repo.requests_get_by_id("2").await.unwrap();
        assert!(calendar_event(request.clone()).is_some());

        request.duration = Some(1e10);
        assert!(calendar_event(request.clone()).is_none());

        request.duration = Some(1e300);
        assert!(calendar_event(request).is_none());
    }
}
