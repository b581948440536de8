//! Equipment domain methods on Repository

use super::{new_id, Repository};
use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
};

impl Repository {
    /// List equipment matching the filters, in insertion order
    pub async fn equipment_list(&self, query: &EquipmentQuery) -> Vec<Equipment> {
        let state = self.state.read().await;
        state
            .equipment
            .values()
            .filter(|e| query.matches(e))
            .cloned()
            .collect()
    }

    /// Get equipment by ID
    pub async fn equipment_get_by_id(&self, id: &str) -> AppResult<Equipment> {
        let state = self.state.read().await;
        state
            .equipment
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn equipment_create(&self, data: &CreateEquipment) -> Equipment {
        let equipment = Equipment {
            id: new_id(),
            name: data.name.clone(),
            serial_number: data.serial_number.clone(),
            purchase_date: data.purchase_date,
            warranty_expiry_date: data.warranty_expiry_date,
            location: data.location.clone(),
            department: data.department.clone(),
            assigned_employee: data.assigned_employee.clone(),
            maintenance_team_id: data.maintenance_team_id.clone(),
            assigned_technician_id: data.assigned_technician_id.clone(),
            category: data.category.clone(),
            is_active: data.is_active.unwrap_or(true),
            notes: data.notes.clone(),
        };

        let mut state = self.state.write().await;
        state.equipment.insert(equipment.id.clone(), equipment.clone());
        equipment
    }

    /// Update equipment
    pub async fn equipment_update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut state = self.state.write().await;
        let equipment = state
            .equipment
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
        equipment.apply(data);
        Ok(equipment.clone())
    }

    /// Delete equipment. Requests referencing it are left in place.
    pub async fn equipment_delete(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        state.equipment.shift_remove(id).is_some()
    }
}
