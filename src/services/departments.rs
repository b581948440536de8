//! Department service

use crate::{
    models::department::{CreateDepartment, Department},
    repository::Repository,
};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<Department> {
        self.repository.departments_list().await
    }

    pub async fn create(&self, data: &CreateDepartment) -> Department {
        let department = self.repository.departments_create(data).await;
        tracing::info!(department_id = %department.id, name = %department.name, "Department created");
        department
    }
}
