#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

use rotacore_axum::directory::StaticDirectory;
use rotacore_axum::models::{CreateShiftInput, DirectConfirmInput, RequestAssignmentInput, Worker};
use rotacore_axum::store::MemoryStore;
use rotacore_axum::StaffingEngine;

pub const MONDAY: &str = "2026-03-02";

/// Engine on a fresh in-memory store, with the given workers seeded into
/// the directory as ICU nurses.
pub async fn engine_with_workers(worker_ids: &[i32]) -> Arc<StaffingEngine> {
    let store = Arc::new(MemoryStore::new());
    let directory = Arc::new(StaticDirectory::new());
    directory
        .seed(
            worker_ids
                .iter()
                .map(|&id| Worker {
                    id,
                    full_name: format!("Worker {}", id),
                    specialty: "ICU".to_string(),
                    rating: Some(4.5),
                })
                .collect(),
        )
        .await;
    Arc::new(StaffingEngine::new(store, directory))
}

pub fn shift_input(date: &str, start: (u32, u32), end: (u32, u32), required: i32) -> CreateShiftInput {
    CreateShiftInput {
        facility_id: 1,
        specialty: "ICU".to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        required_workers: required,
        draft: false,
    }
}

pub fn request(worker_id: i32, shift_id: uuid::Uuid) -> RequestAssignmentInput {
    RequestAssignmentInput {
        worker_id,
        shift_id,
        notes: None,
    }
}

pub fn direct_confirm(worker_id: i32, shift_id: uuid::Uuid) -> DirectConfirmInput {
    DirectConfirmInput {
        worker_id,
        shift_id,
        actor: "admin".to_string(),
        notes: None,
    }
}
