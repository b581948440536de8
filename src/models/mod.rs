//! Data models for the maintenance server

pub mod account;
pub mod department;
pub mod equipment;
pub mod report;
pub mod request;
pub mod team;
pub mod user;
pub mod work_center;

// Re-export commonly used types
pub use account::{Account, AccountRole};
pub use department::Department;
pub use equipment::Equipment;
pub use request::{MaintenanceRequest, RequestStatus, RequestType};
pub use team::MaintenanceTeam;
pub use user::{User, UserRole};
pub use work_center::WorkCenter;
