//! Directory user methods on Repository

use super::{new_id, Repository};
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User, UserQuery},
};

impl Repository {
    pub async fn users_list(&self, query: &UserQuery) -> Vec<User> {
        let state = self.state.read().await;
        state
            .users
            .values()
            .filter(|u| query.matches(u))
            .cloned()
            .collect()
    }

    pub async fn users_get_by_id(&self, id: &str) -> AppResult<User> {
        let state = self.state.read().await;
        state
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn users_create(&self, data: &CreateUser) -> User {
        let user = User {
            id: new_id(),
            name: data.name.clone(),
            email: data.email.clone(),
            avatar: data.avatar.clone(),
            role: data.role,
            team_ids: data.team_ids.clone(),
        };

        let mut state = self.state.write().await;
        state.users.insert(user.id.clone(), user.clone());
        user
    }

    pub async fn users_update(&self, id: &str, data: &UpdateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
        user.apply(data);
        Ok(user.clone())
    }
}
