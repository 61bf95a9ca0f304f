//! Owned employee collection with optimistic-fallback mutations.
//!
//! `EmployeeStore` is the single owner of the in-memory collection. Views
//! read snapshots (or subscribe to them) and go through the store's
//! operations for every change. No operation returns an error: a failed
//! remote call is logged, reported through `StoreState::error`, and the
//! local equivalent of the intent is applied anyway.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::api::EmployeeClient;
use crate::fallback::fallback_employees;
use crate::filter::{departments, EmployeeFilter};
use crate::models::{Employee, EmployeePatch, NewEmployee};

use super::reconcile::{self, Add, Delete, Intent, Outcome, Update};
use super::EmployeeBackend;

pub const FETCH_FAILED: &str = "Failed to fetch employees";
pub const ADD_FAILED: &str = "Failed to add employee";
pub const UPDATE_FAILED: &str = "Failed to update employee";
pub const DELETE_FAILED: &str = "Failed to delete employee";

/// Where the store is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// A load is in flight. Also the state of a freshly created store.
    Loading,
    Ready,
    /// The last load failed and the fallback dataset is shown.
    Failed,
}

/// Which dataset the collection was last loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Fallback,
}

/// Everything a view renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    /// Published collections are never mutated; each change swaps the Arc.
    pub employees: Arc<Vec<Employee>>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: LoadPhase,
    pub source: DataSource,
}

impl StoreState {
    fn initial() -> Self {
        Self {
            employees: Arc::new(Vec::new()),
            loading: true,
            error: None,
            phase: LoadPhase::Loading,
            source: DataSource::Remote,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

pub struct EmployeeStore<B = EmployeeClient> {
    backend: B,
    /// The published state; the only copy the store keeps.
    state: watch::Sender<StoreState>,
    /// Serializes read-modify-publish cycles between concurrent operations.
    writer: Mutex<()>,
}

impl<B: EmployeeBackend> EmployeeStore<B> {
    /// Create a store in the `Loading` phase with an empty collection.
    /// Call `load` to populate it.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: watch::Sender::new(StoreState::initial()),
            writer: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receive every published state; the receiver starts at the current one.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn employees(&self) -> Arc<Vec<Employee>> {
        Arc::clone(&self.state.borrow().employees)
    }

    pub fn get(&self, id: &str) -> Option<Employee> {
        self.employees().iter().find(|e| e.id == id).cloned()
    }

    /// Distinct departments in the current collection, first-seen order.
    pub fn departments(&self) -> Vec<String> {
        departments(&self.employees())
    }

    pub fn filtered(&self, filter: &EmployeeFilter) -> Vec<Employee> {
        filter
            .apply(&self.employees())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Apply `f` to a copy of the current state and publish the result.
    async fn modify<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let _writer = self.writer.lock().await;
        let mut next = self.state.borrow().clone();
        let result = f(&mut next);
        self.state.send_replace(next);
        result
    }

    /// Reconcile `intent` against the current collection and publish it,
    /// recording `failure` as the store's error.
    async fn commit<I: Intent>(&self, failure: Option<&str>, intent: I, outcome: Outcome) -> I::Record {
        self.modify(|state| {
            let next = reconcile::reconcile(state.employees.as_slice(), intent, outcome);
            state.employees = Arc::new(next.employees);
            if let Some(message) = failure {
                state.error = Some(message.to_string());
            }
            next.record
        })
        .await
    }

    async fn clear_error(&self) {
        self.modify(|state| state.error = None).await;
    }

    /// Fetch the full collection, replacing the current one. On failure the
    /// bundled fallback dataset is shown and `error` is set.
    pub async fn load(&self) {
        self.modify(|state| {
            state.loading = true;
            state.phase = LoadPhase::Loading;
            state.error = None;
        })
        .await;

        match self.backend.list_all().await {
            Ok(employees) => {
                info!(count = employees.len(), "Loaded employees");
                self.modify(|state| {
                    state.employees = Arc::new(employees);
                    state.loading = false;
                    state.phase = LoadPhase::Ready;
                    state.source = DataSource::Remote;
                })
                .await;
            }
            Err(e) => {
                error!(error = %e, "Error fetching employees");
                let fallback = fallback_employees().to_vec();
                warn!(count = fallback.len(), "Showing fallback dataset");
                self.modify(|state| {
                    state.error = Some(FETCH_FAILED.to_string());
                    state.employees = Arc::new(fallback);
                    state.loading = false;
                    state.phase = LoadPhase::Failed;
                    state.source = DataSource::Fallback;
                })
                .await;
            }
        }
    }

    pub async fn refetch(&self) {
        self.load().await
    }

    /// Create a record. Always returns the record that was appended: the
    /// server's on success, a locally identified copy on failure.
    pub async fn add(&self, employee: NewEmployee) -> Employee {
        self.clear_error().await;
        let outcome = Outcome::from(
            self.backend
                .create(&employee)
                .await
                .inspect(|created| debug!(id = %created.id, "Employee created"))
                .inspect_err(|e| error!(error = %e, "Error adding employee")),
        );
        let failure = outcome.is_failed().then_some(ADD_FAILED);
        let added = self.commit(failure, Add(employee), outcome).await;
        if failure.is_some() {
            warn!(id = %added.id, "Added employee locally only");
        }
        added
    }

    /// Update a record. Returns the record now in the collection, or `None`
    /// if no record has this id (the collection is left unchanged).
    pub async fn update(&self, id: &str, patch: EmployeePatch) -> Option<Employee> {
        self.clear_error().await;
        let outcome = Outcome::from(
            self.backend
                .update(id, &patch)
                .await
                .inspect_err(|e| error!(error = %e, id = %id, "Error updating employee")),
        );
        let failure = outcome.is_failed().then_some(UPDATE_FAILED);
        let intent = Update {
            id: id.to_string(),
            patch,
        };
        let updated = self.commit(failure, intent, outcome).await;
        if updated.is_none() {
            debug!(id = %id, "Update for unknown employee left collection unchanged");
        }
        updated
    }

    /// Delete a record. It is removed locally whether or not the server
    /// accepted the delete. Returns the removed record, if any.
    pub async fn delete(&self, id: &str) -> Option<Employee> {
        self.clear_error().await;
        let outcome = Outcome::from(
            self.backend
                .remove(id)
                .await
                .inspect_err(|e| error!(error = %e, id = %id, "Error deleting employee")),
        );
        let failure = outcome.is_failed().then_some(DELETE_FAILED);
        self.commit(failure, Delete(id.to_string()), outcome).await
    }
}
