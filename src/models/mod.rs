pub mod assignment;
pub mod assignment_input;
pub mod shift;
pub mod shift_input;
pub mod staffing;
pub mod worker;

pub use assignment::{Assignment, AssignmentStatus};
pub use assignment_input::{
    AssignmentOutcome, ConfirmAssignmentInput, DeclineAssignmentInput, DirectConfirmInput,
    MarkNoShowInput, RequestAssignmentInput,
};
pub use shift::{Shift, ShiftStatus};
pub use shift_input::{CancelShiftInput, CancelShiftResponse, CreateShiftInput, UpdateShiftInput};
pub use staffing::{AssignedWorkerSummary, StaffingEvent, StaffingEventKind, StaffingSnapshot};
pub use worker::Worker;
