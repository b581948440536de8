//! Work center model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkCenter {
    pub id: String,
    pub code: String,
    pub tag: String,
    #[serde(default)]
    pub alternative_work_center_ids: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub cost_per_hour: Decimal,
    /// Percentage, may exceed 100
    pub capacity_time_efficiency: f64,
    /// Overall equipment effectiveness target, 0-100
    pub oee_target: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkCenter {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Tag is required"))]
    pub tag: String,
    #[serde(default)]
    pub alternative_work_center_ids: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub cost_per_hour: Decimal,
    #[validate(range(min = 0.0, message = "Capacity time efficiency cannot be negative"))]
    pub capacity_time_efficiency: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "OEE target must be between 0 and 100"))]
    pub oee_target: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkCenter {
    #[validate(length(min = 1, message = "Code cannot be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "Tag cannot be empty"))]
    pub tag: Option<String>,
    pub alternative_work_center_ids: Option<Vec<String>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub cost_per_hour: Option<Decimal>,
    #[validate(range(min = 0.0, message = "Capacity time efficiency cannot be negative"))]
    pub capacity_time_efficiency: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "OEE target must be between 0 and 100"))]
    pub oee_target: Option<f64>,
}

impl WorkCenter {
    pub fn apply(&mut self, data: &UpdateWorkCenter) {
        if let Some(ref code) = data.code {
            self.code = code.clone();
        }
        if let Some(ref tag) = data.tag {
            self.tag = tag.clone();
        }
        if let Some(ref ids) = data.alternative_work_center_ids {
            self.alternative_work_center_ids = ids.clone();
        }
        if let Some(cost) = data.cost_per_hour {
            self.cost_per_hour = cost;
        }
        if let Some(efficiency) = data.capacity_time_efficiency {
            self.capacity_time_efficiency = efficiency;
        }
        if let Some(target) = data.oee_target {
            self.oee_target = target;
        }
    }
}
