//! Data models for employee records.
//!
//! This module contains the structures exchanged with the employee backend:
//!
//! - `Employee`: a full record as stored by the server
//! - `NewEmployee`: the create payload (no identifier)
//! - `EmployeePatch`: a partial update and its shallow-merge semantics
//! - `EmployeeStatus`: the closed set of employment states
//! - `EmployeeStats`: aggregate figures served by the stats endpoint

pub mod employee;

pub use employee::{Employee, EmployeePatch, EmployeeStats, EmployeeStatus, NewEmployee, ValidationError};
