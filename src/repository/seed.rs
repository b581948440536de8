//! Demo dataset loaded at startup

use serde::Deserialize;

use crate::models::{
    Department, Equipment, MaintenanceRequest, MaintenanceTeam, User, WorkCenter,
};

const DEMO_SEED: &str = include_str!("../../data/seed.json");

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub equipment: Vec<Equipment>,
    pub teams: Vec<MaintenanceTeam>,
    pub users: Vec<User>,
    pub requests: Vec<MaintenanceRequest>,
    pub departments: Vec<Department>,
    pub work_centers: Vec<WorkCenter>,
}

impl SeedData {
    /// The bundled demo plant
    pub fn demo() -> Result<Self, serde_json::Error> {
        serde_json::from_str(DEMO_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seed_parses() {
        let seed = SeedData::demo().unwrap();
        assert_eq!(seed.equipment.len(), 10);
        assert_eq!(seed.teams.len(), 15);
        assert_eq!(seed.users.len(), 30);
        assert_eq!(seed.requests.len(), 5);
        assert_eq!(seed.departments.len(), 20);
        assert_eq!(seed.work_centers.len(), 10);
        assert!(seed.equipment.iter().all(|e| e.is_active));
    }
}
