//! WASM bindings for slot-engine.
//!
//! Exposes the working-window conflict check and slot computation to
//! JavaScript via `wasm-bindgen`. Records cross the boundary as JSON strings
//! in the same snake_case shape the `slots` CLI reads.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDateTime;
use slot_engine::{Catalog, WorkingWindow};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Boundary-independent helpers (plain `String` errors, testable natively)
// ---------------------------------------------------------------------------

/// Parse a local date-time such as "2026-03-16T10:30:00" or "2026-03-16T10:30".
fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn check_window_conflict_json(existing_json: &str, proposed_json: &str) -> Result<bool, String> {
    let existing: Vec<WorkingWindow> = serde_json::from_str(existing_json)
        .map_err(|e| format!("Invalid windows JSON: {}", e))?;
    let proposed: WorkingWindow = serde_json::from_str(proposed_json)
        .map_err(|e| format!("Invalid window JSON: {}", e))?;

    slot_engine::has_conflict(&existing, &proposed).map_err(|e| e.to_string())
}

fn compute_available_slots_json(
    catalog_json: &str,
    professional_id: u64,
    service_id: u64,
    now: &str,
) -> Result<String, String> {
    let catalog = Catalog::from_json(catalog_json).map_err(|e| e.to_string())?;
    let now = parse_now(now)?;

    let slots = catalog
        .find_available_slots(professional_id, service_id, now)
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&slots).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Report whether a proposed working window overlaps an existing one.
///
/// `existing_json` is a JSON array of windows, `proposed_json` a single window,
/// each `{professional_id, day_of_week, start, end}` with `day_of_week` 0-6
/// (0 = Sunday) and times as "HH:MM[:SS]". Throws if the proposed window's
/// start is not before its end.
#[wasm_bindgen(js_name = "checkWindowConflict")]
pub fn check_window_conflict(existing_json: &str, proposed_json: &str) -> Result<bool, JsValue> {
    check_window_conflict_json(existing_json, proposed_json).map_err(|e| JsValue::from_str(&e))
}

/// Compute bookable slots for a professional and service over 31 days.
///
/// `catalog_json` holds `{professionals, services, windows, bookings}`. `now`
/// is a local date-time string ("2026-03-16T10:30:00"). Returns a JSON array
/// of `{professional_id, service_id, date, start, end}` objects. Throws
/// "Not found: service" / "Not found: professional" for unknown ids.
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(
    catalog_json: &str,
    professional_id: u32,
    service_id: u32,
    now: &str,
) -> Result<String, JsValue> {
    compute_available_slots_json(catalog_json, professional_id.into(), service_id.into(), now)
        .map_err(|e| JsValue::from_str(&e))
}
