//! Repository layer: the in-memory maintenance store

pub mod accounts;
pub mod departments;
pub mod equipment;
pub mod requests;
pub mod seed;
pub mod teams;
pub mod users;
pub mod work_centers;

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    account::{Account, PasswordReset},
    Department, Equipment, MaintenanceRequest, MaintenanceTeam, User, WorkCenter,
};

pub use seed::SeedData;

/// All collections, keyed by id in insertion order
#[derive(Debug, Default, Clone)]
pub struct StoreState {
    pub equipment: IndexMap<String, Equipment>,
    pub teams: IndexMap<String, MaintenanceTeam>,
    pub users: IndexMap<String, User>,
    pub requests: IndexMap<String, MaintenanceRequest>,
    pub departments: IndexMap<String, Department>,
    pub work_centers: IndexMap<String, WorkCenter>,
    pub accounts: IndexMap<Uuid, Account>,
    pub password_resets: Vec<PasswordReset>,
}

impl From<SeedData> for StoreState {
    fn from(seed: SeedData) -> Self {
        fn keyed<T>(rows: Vec<T>, id: impl Fn(&T) -> String) -> IndexMap<String, T> {
            rows.into_iter().map(|row| (id(&row), row)).collect()
        }

        Self {
            equipment: keyed(seed.equipment, |e| e.id.clone()),
            teams: keyed(seed.teams, |t| t.id.clone()),
            users: keyed(seed.users, |u| u.id.clone()),
            requests: keyed(seed.requests, |r| r.id.clone()),
            departments: keyed(seed.departments, |d| d.id.clone()),
            work_centers: keyed(seed.work_centers, |w| w.id.clone()),
            ..Default::default()
        }
    }
}

/// Handle on the store shared by all services.
///
/// Every operation takes the lock once, so a write and its cascades are
/// never observed half-applied.
#[derive(Clone, Default)]
pub struct Repository {
    state: Arc<RwLock<StoreState>>,
}

impl Repository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with the given data
    pub fn with_seed(seed: SeedData) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::from(seed))),
        }
    }

    /// Run a read-only projection over a consistent view of every collection
    pub async fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }
}

/// Fresh identifier for records created through the API
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
