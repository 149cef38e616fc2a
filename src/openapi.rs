use utoipa::OpenApi;

use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rotacore API",
        version = "1.0.0",
        description = "Shift staffing and assignment engine"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Shifts
        crate::handlers::shifts_handler::get_shifts_for_date,
        crate::handlers::shifts_handler::create_shift,
        crate::handlers::shifts_handler::get_shift,
        crate::handlers::shifts_handler::update_shift,
        crate::handlers::shifts_handler::get_staffing,
        crate::handlers::shifts_handler::cancel_shift,
        crate::handlers::shifts_handler::get_shift_assignments,
        crate::handlers::shifts_handler::get_candidates,
        crate::handlers::events_handler::shift_events,

        // Assignments
        crate::handlers::assignments_handler::request_assignment,
        crate::handlers::assignments_handler::direct_confirm,
        crate::handlers::assignments_handler::get_assignment,
        crate::handlers::assignments_handler::confirm_assignment,
        crate::handlers::assignments_handler::decline_assignment,
        crate::handlers::assignments_handler::complete_assignment,
        crate::handlers::assignments_handler::mark_no_show,

        // Workers
        crate::handlers::workers_handler::get_workers,
        crate::handlers::workers_handler::get_worker,
        crate::handlers::workers_handler::get_worker_assignments,
    ),
    components(schemas(
        models::Shift,
        models::ShiftStatus,
        models::Assignment,
        models::AssignmentStatus,
        models::StaffingSnapshot,
        models::AssignedWorkerSummary,
        models::StaffingEvent,
        models::StaffingEventKind,
        models::Worker,
        models::CreateShiftInput,
        models::UpdateShiftInput,
        models::CancelShiftInput,
        models::CancelShiftResponse,
        models::RequestAssignmentInput,
        models::DirectConfirmInput,
        models::ConfirmAssignmentInput,
        models::DeclineAssignmentInput,
        models::MarkNoShowInput,
        models::AssignmentOutcome,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "shifts", description = "Shift registry and staffing snapshots"),
        (name = "assignments", description = "Assignment ledger operations"),
        (name = "workers", description = "Worker directory reads")
    )
)]
pub struct ApiDoc;
