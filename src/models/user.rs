//! Directory users (employees, technicians, managers)

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Manager,
    Technician,
    Employee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub team_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub avatar: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub team_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub avatar: Option<Option<String>>,
    pub role: Option<UserRole>,
    pub team_ids: Option<Vec<String>>,
}

impl User {
    pub fn apply(&mut self, data: &UpdateUser) {
        if let Some(ref name) = data.name {
            self.name = name.clone();
        }
        if let Some(ref email) = data.email {
            self.email = email.clone();
        }
        if let Some(ref avatar) = data.avatar {
            self.avatar = avatar.clone();
        }
        if let Some(role) = data.role {
            self.role = role;
        }
        if let Some(ref team_ids) = data.team_ids {
            self.team_ids = team_ids.clone();
        }
    }
}

/// User list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub role: Option<UserRole>,
    /// Only members of this team
    pub team_id: Option<String>,
}

impl UserQuery {
    pub fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |r| user.role == r)
            && self
                .team_id
                .as_ref()
                .map_or(true, |t| user.team_ids.contains(t))
    }
}
