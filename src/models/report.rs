//! Read models: dashboard, Kanban board, calendar and reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::request::{MaintenanceRequest, RequestStatus, RequestType};

/// Headline numbers
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_equipment: usize,
    /// Requests neither repaired nor scrapped
    pub active_requests: usize,
    pub maintenance_teams: usize,
    pub overdue_requests: usize,
    /// Five most recent requests by creation date
    pub recent_requests: Vec<MaintenanceRequest>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    pub status: RequestStatus,
    pub title: String,
    pub requests: Vec<MaintenanceRequest>,
}

/// Requests grouped by status, newest first in each column
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

/// How a calendar entry is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventState {
    Scheduled,
    Overdue,
    Repaired,
    Scrap,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub state: EventState,
    pub request: MaintenanceRequest,
}

/// Calendar window; both bounds optional
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    /// Events ending after this instant
    pub from: Option<DateTime<Utc>>,
    /// Events starting before this instant
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamCount {
    pub team_id: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: RequestStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub in_progress: usize,
    pub repaired: usize,
    pub overdue: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reports {
    pub requests_per_team: Vec<TeamCount>,
    pub requests_per_category: Vec<CategoryCount>,
    pub status_distribution: Vec<StatusCount>,
    pub type_distribution: Vec<TypeCount>,
    pub summary: ReportSummary,
}
