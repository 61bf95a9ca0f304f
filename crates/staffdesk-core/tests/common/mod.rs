//! In-process employee backend for integration tests.
//!
//! Serves the same routes as the real backend under `/employeebe`, bound to
//! a random local port. Faults can be switched on at runtime: `failing`
//! makes every route answer 500, `garbage` makes every route answer 200
//! with a body that is not JSON.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};

use staffdesk_core::analytics::local_stats;
use staffdesk_core::{Employee, EmployeePatch, EmployeeStatus, NewEmployee};

pub const API_PATH: &str = "/employeebe";

#[derive(Default)]
pub struct MockState {
    pub records: RwLock<Vec<Employee>>,
    pub failing: AtomicBool,
    pub garbage: AtomicBool,
    next_id: AtomicUsize,
}

impl MockState {
    fn fault(&self) -> Option<Response> {
        if self.failing.load(Ordering::SeqCst) {
            Some((StatusCode::INTERNAL_SERVER_ERROR, "backend down").into_response())
        } else if self.garbage.load(Ordering::SeqCst) {
            Some((StatusCode::OK, "<html>not json</html>").into_response())
        } else {
            None
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_garbage(&self, garbage: bool) {
        self.garbage.store(garbage, Ordering::SeqCst);
    }

    pub async fn records(&self) -> Vec<Employee> {
        self.records.read().await.clone()
    }
}

type Shared = Arc<MockState>;

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

#[derive(Deserialize)]
struct ListQuery {
    department: Option<String>,
}

async fn list_employees(State(state): State<Shared>, Query(query): Query<ListQuery>) -> Response {
    if let Some(fault) = state.fault() {
        return fault;
    }
    let records = state.records.read().await;
    let found: Vec<Employee> = records
        .iter()
        .filter(|e| query.department.as_ref().map_or(true, |d| e.department == *d))
        .cloned()
        .collect();
    Json(found).into_response()
}

async fn create_employee(State(state): State<Shared>, Json(input): Json<NewEmployee>) -> Response {
    if let Some(fault) = state.fault() {
        return fault;
    }
    let id = format!("srv-{}", state.next_id.fetch_add(1, Ordering::SeqCst) + 1);
    let created = input.into_employee(id);
    state.records.write().await.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_employee(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if let Some(fault) = state.fault() {
        return fault;
    }
    let records = state.records.read().await;
    match records.iter().find(|e| e.id == id) {
        Some(e) => Json(e.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "employee not found").into_response(),
    }
}

async fn update_employee(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<EmployeePatch>,
) -> Response {
    if let Some(fault) = state.fault() {
        return fault;
    }
    let mut records = state.records.write().await;
    match records.iter_mut().find(|e| e.id == id) {
        Some(existing) => {
            *existing = patch.apply_to(existing);
            Json(existing.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_employee(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if let Some(fault) = state.fault() {
        return fault;
    }
    let mut records = state.records.write().await;
    let before = records.len();
    records.retain(|e| e.id != id);
    if records.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn employee_stats(State(state): State<Shared>) -> Response {
    if let Some(fault) = state.fault() {
        return fault;
    }
    let records = state.records.read().await;
    Json(local_stats(&records, stats_date())).into_response()
}

/// The "today" the mock uses when counting new hires.
pub fn stats_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn app(state: Shared) -> Router {
    let employees = Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/stats", get(employee_stats))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        );
    Router::new().nest(API_PATH, employees).with_state(state)
}

pub async fn spawn(records: Vec<Employee>) -> MockBackend {
    let state: Shared = Arc::new(MockState {
        records: RwLock::new(records),
        ..Default::default()
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    MockBackend {
        base_url: format!("http://{addr}{API_PATH}"),
        state,
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{API_PATH}")
}

pub fn employee(id: &str, first: &str, department: &str, status: EmployeeStatus) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@company.com", first.to_lowercase()),
        phone: "+1 (555) 000-0000".to_string(),
        position: "Engineer".to_string(),
        department: department.to_string(),
        salary: 95000.0,
        hire_date: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
        status,
        avatar: None,
        location: "Remote".to_string(),
        employee_id: format!("EMP-{}", id),
    }
}

pub fn seed() -> Vec<Employee> {
    vec![
        employee("e1", "Alice", "Engineering", EmployeeStatus::Active),
        employee("e2", "Bruno", "Sales", EmployeeStatus::OnLeave),
        employee("e3", "Chen", "R&D Lab", EmployeeStatus::Inactive),
    ]
}
