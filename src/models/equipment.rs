//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::request::MaintenanceRequest;

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry_date: NaiveDate,
    pub location: String,
    /// Department ID
    pub department: String,
    /// User ID of the employee using the equipment
    pub assigned_employee: String,
    pub maintenance_team_id: String,
    pub assigned_technician_id: String,
    pub category: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry_date: NaiveDate,
    pub location: String,
    pub department: String,
    pub assigned_employee: String,
    pub maintenance_team_id: String,
    #[serde(default)]
    pub assigned_technician_id: String,
    pub category: String,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub assigned_employee: Option<String>,
    pub maintenance_team_id: Option<String>,
    pub assigned_technician_id: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl Equipment {
    pub fn apply(&mut self, data: &UpdateEquipment) {
        macro_rules! set_field {
            ($field:ident) => {
                if let Some(ref val) = data.$field {
                    self.$field = val.clone();
                }
            };
        }

        set_field!(name);
        set_field!(serial_number);
        set_field!(purchase_date);
        set_field!(warranty_expiry_date);
        set_field!(location);
        set_field!(department);
        set_field!(assigned_employee);
        set_field!(maintenance_team_id);
        set_field!(assigned_technician_id);
        set_field!(category);
        set_field!(is_active);
        set_field!(notes);
    }

    /// Mark the equipment as scrapped
    pub fn scrap(&mut self, note: &str) {
        self.is_active = false;
        self.notes = Some(note.to_string());
    }
}

/// Equipment list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentQuery {
    pub department: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl EquipmentQuery {
    pub fn matches(&self, equipment: &Equipment) -> bool {
        self.department
            .as_ref()
            .map_or(true, |d| &equipment.department == d)
            && self
                .category
                .as_ref()
                .map_or(true, |c| &equipment.category == c)
            && self.is_active.map_or(true, |a| equipment.is_active == a)
    }
}

/// Equipment with its references resolved for display
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDetails {
    pub equipment: Equipment,
    pub department_name: String,
    pub employee_name: String,
    pub team_name: String,
    pub technician_name: String,
    pub total_requests: usize,
    pub open_requests: usize,
    pub requests: Vec<MaintenanceRequest>,
}
