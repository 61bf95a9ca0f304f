//! Bundled sample records shown when the backend cannot be reached.
//!
//! The dataset is compiled into the binary and parsed once on first use.
//! It is never fetched and never written back.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::models::Employee;

/// Embedded fixture, parsed lazily
const FALLBACK_JSON: &str = include_str!("../data/fallback_employees.json");

static FALLBACK: OnceLock<Vec<Employee>> = OnceLock::new();

fn parse_fallback() -> Vec<Employee> {
    match serde_json::from_str::<Vec<Employee>>(FALLBACK_JSON) {
        Ok(employees) => {
            debug!(count = employees.len(), "Loaded fallback dataset");
            employees
        }
        Err(e) => {
            warn!(error = %e, "Fallback dataset is malformed, using an empty one");
            Vec::new()
        }
    }
}

/// The fallback records, in fixture order.
pub fn fallback_employees() -> &'static [Employee] {
    FALLBACK.get_or_init(parse_fallback)
}
