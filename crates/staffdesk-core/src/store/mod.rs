//! Employee store: the owned in-memory collection and its mutations.
//!
//! - `EmployeeStore`: load, add, update, delete with optimistic fallback
//! - `EmployeeBackend`: the remote seam, implemented by `EmployeeClient`
//! - `reconcile`: one pure function computing the next collection from an
//!   intent (`Add`, `Update`, `Delete`) and a remote outcome

pub mod backend;
pub mod employee_store;
pub mod reconcile;

pub use backend::EmployeeBackend;
pub use employee_store::{
    DataSource, EmployeeStore, LoadPhase, StoreState, ADD_FAILED, DELETE_FAILED, FETCH_FAILED,
    UPDATE_FAILED,
};
pub use reconcile::{reconcile, Add, Delete, Intent, Outcome, Reconciled, Update};
