//! WASM bindings for slo-engine.
//!
//! Exposes free-slot computation, task priority, start suggestions, ranking and
//! auto-planning to JavaScript via `wasm-bindgen`. All complex types are passed
//! as JSON strings. Every export takes the current instant explicitly plus an
//! optional IANA timezone for class times (UTC when omitted).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slo-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/slo_engine_wasm.wasm
//! ```

pub mod json;

use wasm_bindgen::prelude::*;

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Free slots in the seven days from `now`.
///
/// `classes_json` is an array of `{id, name, day, start, end}` objects. Returns a
/// JSON array of `{start, end, duration_minutes}` with RFC 3339 datetimes.
#[wasm_bindgen(js_name = "computeFreeSlots")]
pub fn compute_free_slots(
    classes_json: &str,
    now: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    json::free_slots(classes_json, now, timezone.as_deref()).map_err(js_err)
}

/// Urgency score for one task. Higher is more urgent.
///
/// `task_json` is `{id, title, est, deadline, createdAt}`; timestamps may be
/// ISO strings or epoch milliseconds.
#[wasm_bindgen(js_name = "priority")]
pub fn priority(task_json: &str, now: &str, timezone: Option<String>) -> Result<f64, JsValue> {
    json::priority(task_json, now, timezone.as_deref()).map_err(js_err)
}

/// When to start one task: a JSON object tagged by `kind`
/// (`contiguous`, `split` or `infeasible`).
#[wasm_bindgen(js_name = "computeStartSuggestion")]
pub fn compute_start_suggestion(
    task_json: &str,
    classes_json: &str,
    now: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    json::start_suggestion(task_json, classes_json, now, timezone.as_deref()).map_err(js_err)
}

/// Tasks sorted by priority, highest first, each with its `priority` field.
#[wasm_bindgen(js_name = "rankTasks")]
pub fn rank_tasks(tasks_json: &str, now: &str, timezone: Option<String>) -> Result<String, JsValue> {
    json::rank_tasks(tasks_json, now, timezone.as_deref()).map_err(js_err)
}

/// `{task, priority, suggestion}` for every task in a `{classes, tasks}` state
/// document, most urgent first.
#[wasm_bindgen(js_name = "computeAutoPlan")]
pub fn compute_auto_plan(
    state_json: &str,
    now: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    json::auto_plan(state_json, now, timezone.as_deref()).map_err(js_err)
}
