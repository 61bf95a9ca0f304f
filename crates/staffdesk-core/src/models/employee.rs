use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Employment status. The backend only ever stores these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [
        EmployeeStatus::Active,
        EmployeeStatus::Inactive,
        EmployeeStatus::OnLeave,
    ];

    /// Wire representation, as used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on-leave",
        }
    }

    /// Human-readable label ("On Leave" rather than "on-leave").
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
            EmployeeStatus::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            "on-leave" => Ok(EmployeeStatus::OnLeave),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("Salary must be a non-negative number, got {0}")]
    InvalidSalary(f64),

    #[error("Unknown status '{0}' (expected active, inactive or on-leave)")]
    UnknownStatus(String),
}

fn check_salary(salary: f64) -> Result<(), ValidationError> {
    if salary.is_finite() && salary >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidSalary(salary))
    }
}

fn check_present(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// One employee record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub location: String,
    /// Internal HR code, distinct from `id`.
    pub employee_id: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Request payload for creating an employee: every field except `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub location: String,
    pub employee_id: String,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_present(&self.first_name, "First name")?;
        check_present(&self.last_name, "Last name")?;
        check_present(&self.email, "Email")?;
        check_salary(self.salary)
    }

    /// Attach an identifier, producing a full record.
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            department: self.department,
            salary: self.salary,
            hire_date: self.hire_date,
            status: self.status,
            avatar: self.avatar,
            location: self.location,
            employee_id: self.employee_id,
        }
    }
}

impl From<Employee> for NewEmployee {
    fn from(e: Employee) -> Self {
        Self {
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            phone: e.phone,
            position: e.position,
            department: e.department,
            salary: e.salary,
            hire_date: e.hire_date,
            status: e.status,
            avatar: e.avatar,
            location: e.location,
            employee_id: e.employee_id,
        }
    }
}

/// Partial update. Only the fields that are `Some` are sent, and only those
/// override the stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref name) = self.first_name {
            check_present(name, "First name")?;
        }
        if let Some(ref name) = self.last_name {
            check_present(name, "Last name")?;
        }
        if let Some(ref email) = self.email {
            check_present(email, "Email")?;
        }
        if let Some(salary) = self.salary {
            check_salary(salary)?;
        }
        Ok(())
    }

    /// Shallow merge: the record with every present patch field applied.
    /// The identifier is never touched.
    pub fn apply_to(&self, employee: &Employee) -> Employee {
        let mut merged = employee.clone();
        if let Some(ref v) = self.first_name {
            merged.first_name = v.clone();
        }
        if let Some(ref v) = self.last_name {
            merged.last_name = v.clone();
        }
        if let Some(ref v) = self.email {
            merged.email = v.clone();
        }
        if let Some(ref v) = self.phone {
            merged.phone = v.clone();
        }
        if let Some(ref v) = self.position {
            merged.position = v.clone();
        }
        if let Some(ref v) = self.department {
            merged.department = v.clone();
        }
        if let Some(v) = self.salary {
            merged.salary = v;
        }
        if let Some(v) = self.hire_date {
            merged.hire_date = v;
        }
        if let Some(v) = self.status {
            merged.status = v;
        }
        if let Some(ref v) = self.avatar {
            merged.avatar = Some(v.clone());
        }
        if let Some(ref v) = self.location {
            merged.location = v.clone();
        }
        if let Some(ref v) = self.employee_id {
            merged.employee_id = v.clone();
        }
        merged
    }
}

/// Aggregate figures served by `GET /employees/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeStats {
    pub total_employees: u64,
    pub active_employees: u64,
    pub new_hires: u64,
    pub on_leave: u64,
}
