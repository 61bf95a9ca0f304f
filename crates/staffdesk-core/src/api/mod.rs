//! REST API client module for the employee backend.
//!
//! This module provides the `EmployeeClient` for the five CRUD operations
//! (list, get, create, update, delete) and the two read-only aggregate
//! queries (by department, stats).
//!
//! No authentication headers are sent; the backend is treated as an open
//! JSON CRUD service.

pub mod client;
pub mod error;

pub use client::EmployeeClient;
pub use error::ApiError;
