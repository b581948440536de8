//! Department methods on Repository

use super::{new_id, Repository};
use crate::models::department::{CreateDepartment, Department};

impl Repository {
    pub async fn departments_list(&self) -> Vec<Department> {
        let state = self.state.read().await;
        state.departments.values().cloned().collect()
    }

    pub async fn departments_create(&self, data: &CreateDepartment) -> Department {
        let department = Department {
            id: new_id(),
            name: data.name.clone(),
        };

        let mut state = self.state.write().await;
        state
            .departments
            .insert(department.id.clone(), department.clone());
        department
    }
}
