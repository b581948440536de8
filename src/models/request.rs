//! Maintenance request model and lifecycle rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Note written on equipment when one of its requests is scrapped
pub const SCRAP_NOTE: &str = "Equipment scrapped due to maintenance request";

/// Request status (Kanban column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InProgress,
    Repaired,
    Scrap,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Repaired,
        RequestStatus::Scrap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Repaired => "repaired",
            RequestStatus::Scrap => "scrap",
        }
    }

    /// Repaired and scrapped requests are closed; they can never be overdue
    pub fn is_closed(&self) -> bool {
        matches!(self, RequestStatus::Repaired | RequestStatus::Scrap)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Corrective (breakdown) or preventive (planned) maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl RequestType {
    pub const ALL: [RequestType; 2] = [RequestType::Corrective, RequestType::Preventive];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Corrective => "corrective",
            RequestType::Preventive => "preventive",
        }
    }
}

/// A maintenance request as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: String,
    pub subject: String,
    pub equipment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_name: Option<String>,
    pub request_type: RequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Planned duration in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_technician_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_technician_name: Option<String>,
    pub maintenance_team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_overdue: bool,
}

/// Overdue iff a scheduled date exists, lies strictly before `now`, and the
/// request is still open.
pub fn compute_is_overdue(
    scheduled_date: Option<DateTime<Utc>>,
    status: RequestStatus,
    now: DateTime<Utc>,
) -> bool {
    match scheduled_date {
        Some(date) => date < now && !status.is_closed(),
        None => false,
    }
}

/// Longest plannable intervention, one year in hours
pub const MAX_DURATION_HOURS: f64 = 8760.0;

/// A planned duration must lie within `0..=MAX_DURATION_HOURS`
pub fn is_valid_duration(hours: f64) -> bool {
    (0.0..=MAX_DURATION_HOURS).contains(&hours)
}

/// Names copied onto a request from the entities it references
#[derive(Debug, Clone, Default)]
pub struct NameProjection {
    pub equipment_name: Option<String>,
    pub category: Option<String>,
    pub team_name: Option<String>,
    pub technician_name: Option<String>,
}

impl MaintenanceRequest {
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        compute_is_overdue(self.scheduled_date, self.status, now)
    }

    /// Copy of the request with `is_overdue` evaluated at `now`
    pub fn evaluated_at(mut self, now: DateTime<Utc>) -> Self {
        self.is_overdue = self.is_overdue_at(now);
        self
    }

    /// Merge a patch into the request.
    ///
    /// `names` carries the projections for whichever references the patch
    /// touches; references not in the patch keep their stored names.
    pub fn apply_patch(&mut self, patch: &UpdateRequest, names: NameProjection, now: DateTime<Utc>) {
        let previous_status = self.status;

        if let Some(ref subject) = patch.subject {
            self.subject = subject.clone();
        }
        if let Some(ref equipment_id) = patch.equipment_id {
            self.equipment_id = equipment_id.clone();
            self.equipment_name = names.equipment_name;
            if patch.category.is_none() {
                self.category = names.category;
            }
        }
        if let Some(request_type) = patch.request_type {
            self.request_type = request_type;
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            self.scheduled_date = scheduled_date;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(ref technician_id) = patch.assigned_technician_id {
            self.assigned_technician_id = technician_id.clone();
            self.assigned_technician_name = names.technician_name;
        }
        if let Some(ref team_id) = patch.maintenance_team_id {
            self.maintenance_team_id = team_id.clone();
            self.maintenance_team_name = names.team_name;
        }
        if let Some(ref category) = patch.category {
            self.category = category.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }

        match (previous_status.is_closed(), self.status.is_closed()) {
            (false, true) => self.completed_at = Some(now),
            (true, false) => self.completed_at = None,
            _ => {}
        }

        self.updated_at = now;
        self.is_overdue = self.is_overdue_at(now);
    }
}

/// Create request payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Equipment is required"))]
    pub equipment_id: String,
    pub request_type: RequestType,
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Planned duration in hours
    #[validate(range(min = 0.0, max = 8760.0, message = "Duration must be between 0 and 8760 hours"))]
    pub duration: Option<f64>,
    /// Defaults to `new`
    pub status: Option<RequestStatus>,
    /// Defaults to the equipment's technician
    pub assigned_technician_id: Option<String>,
    /// Defaults to the equipment's maintenance team
    pub maintenance_team_id: Option<String>,
    pub description: Option<String>,
}

/// Update request payload.
///
/// Nullable fields distinguish an absent key (keep) from an explicit `null`
/// (clear).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[validate(length(min = 1, message = "Subject cannot be empty"))]
    pub subject: Option<String>,
    pub equipment_id: Option<String>,
    pub request_type: Option<RequestType>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub duration: Option<Option<f64>>,
    pub status: Option<RequestStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub assigned_technician_id: Option<Option<String>>,
    pub maintenance_team_id: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl UpdateRequest {
    /// Planned duration set by the patch, if it sets one
    pub fn new_duration(&self) -> Option<f64> {
        self.duration.flatten()
    }

    /// Only status set, the Kanban drag-and-drop case
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Filters for listing requests
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
    pub request_type: Option<RequestType>,
    pub equipment_id: Option<String>,
    pub maintenance_team_id: Option<String>,
    pub assigned_technician_id: Option<String>,
    /// Only requests currently overdue
    pub overdue: Option<bool>,
}

impl RequestQuery {
    /// Match against a request whose `is_overdue` is already evaluated
    pub fn matches(&self, request: &MaintenanceRequest) -> bool {
        self.status.map_or(true, |s| request.status == s)
            && self.request_type.map_or(true, |t| request.request_type == t)
            && self
                .equipment_id
                .as_ref()
                .map_or(true, |id| &request.equipment_id == id)
            && self
                .maintenance_team_id
                .as_ref()
                .map_or(true, |id| &request.maintenance_team_id == id)
            && self
                .assigned_technician_id
                .as_ref()
                .map_or(true, |id| request.assigned_technician_id.as_ref() == Some(id))
            && self.overdue.map_or(true, |o| request.is_overdue == o)
    }
}
