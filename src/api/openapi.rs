//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, departments, equipment, health, reports, requests, teams, users, work_centers,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Maintenance API",
        version = "1.0.0",
        description = "Equipment maintenance tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::forgot_password,
        auth::reset_password,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::get_equipment_details,
        equipment::list_equipment_requests,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Requests
        requests::list_requests,
        requests::kanban,
        requests::get_request,
        requests::create_request,
        requests::update_request,
        requests::update_request_status,
        requests::delete_request,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::delete_team,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        // Departments
        departments::list_departments,
        departments::create_department,
        // Work centers
        work_centers::list_work_centers,
        work_centers::get_work_center,
        work_centers::create_work_center,
        work_centers::update_work_center,
        work_centers::delete_work_center,
        // Read models
        reports::dashboard,
        reports::reports,
        reports::calendar,
    ),
    components(
        schemas(
            // Auth
            crate::models::account::AccountRole,
            crate::models::account::SignupRequest,
            crate::models::account::LoginRequest,
            crate::models::account::LoginResponse,
            crate::models::account::ForgotPasswordRequest,
            crate::models::account::ResetPasswordRequest,
            crate::models::account::MessageResponse,
            crate::models::account::AccountInfo,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentDetails,
            // Requests
            crate::models::request::MaintenanceRequest,
            crate::models::request::RequestStatus,
            crate::models::request::RequestType,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequest,
            requests::StatusUpdate,
            // Teams
            crate::models::team::MaintenanceTeam,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            // Users
            crate::models::user::User,
            crate::models::user::UserRole,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Departments
            crate::models::department::Department,
            crate::models::department::CreateDepartment,
            // Work centers
            crate::models::work_center::WorkCenter,
            crate::models::work_center::CreateWorkCenter,
            crate::models::work_center::UpdateWorkCenter,
            // Read models
            crate::models::report::Dashboard,
            crate::models::report::KanbanBoard,
            crate::models::report::KanbanColumn,
            crate::models::report::CalendarEvent,
            crate::models::report::EventState,
            crate::models::report::Reports,
            crate::models::report::ReportSummary,
            crate::models::report::TeamCount,
            crate::models::report::CategoryCount,
            crate::models::report::StatusCount,
            crate::models::report::TypeCount,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Signup, login and password recovery"),
        (name = "equipment", description = "Equipment registry"),
        (name = "requests", description = "Maintenance request lifecycle"),
        (name = "teams", description = "Maintenance teams"),
        (name = "users", description = "Employees, technicians and managers"),
        (name = "departments", description = "Departments"),
        (name = "work-centers", description = "Work centers"),
        (name = "reports", description = "Dashboard, calendar and reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
