//! Directory of employees, technicians and managers

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User, UserQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &UserQuery) -> Vec<User> {
        self.repository.users_list(query).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.repository.users_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateUser) -> User {
        let user = self.repository.users_create(data).await;
        tracing::info!(user_id = %user.id, role = ?user.role, "User created");
        user
    }

    pub async fn update(&self, id: &str, data: &UpdateUser) -> AppResult<User> {
        self.repository.users_update(id, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::UserRole, repository::SeedData};

    #[tokio::test]
    async fn test_filter_technicians_of_a_team() {
        let svc = UsersService::new(Repository::with_seed(SeedData::demo().unwrap()));
        let technicians = svc
            .list(&UserQuery {
                role: Some(UserRole::Technician),
                team_id: Some("1".to_string()),
            })
            .await;

        assert!(!technicians.is_empty());
        assert!(technicians
            .iter()
            .all(|u| u.role == UserRole::Technician && u.team_ids.contains(&"1".to_string())));
    }
}
