//! Staffdesk core library.
//!
//! Client-side employee management: a typed client for the employee REST
//! backend, an owned store that applies every mutation locally even when the
//! backend is unreachable, and the filtering and analytics behind the
//! dashboard views.
//!
//! - `api`: `EmployeeClient` and `ApiError`
//! - `models`: employee records, create/patch payloads, stats
//! - `store`: `EmployeeStore` and reconciliation
//! - `fallback`: bundled sample records
//! - `filter`, `analytics`: derived views of the collection
//! - `config`: configuration file and environment overrides

pub mod analytics;
pub mod api;
pub mod config;
pub mod fallback;
pub mod filter;
pub mod models;
pub mod store;
pub mod utils;

pub use api::{ApiError, EmployeeClient};
pub use config::Config;
pub use filter::EmployeeFilter;
pub use models::{Employee, EmployeePatch, EmployeeStats, EmployeeStatus, NewEmployee, ValidationError};
pub use store::{DataSource, EmployeeBackend, EmployeeStore, LoadPhase, StoreState};
