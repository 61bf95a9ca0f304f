//! Search and facet filtering over the employee collection.

use crate::models::{Employee, EmployeeStatus};
use crate::utils::contains_ignore_case;

/// Search text × department × status. Empty search and `None` facets match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub search: String,
    pub department: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    /// Check if an employee matches the search term.
    /// Term should already be lowercased.
    fn matches_search(employee: &Employee, term: &str) -> bool {
        contains_ignore_case(&employee.first_name, term)
            || contains_ignore_case(&employee.last_name, term)
            || contains_ignore_case(&employee.email, term)
            || contains_ignore_case(&employee.position, term)
            || contains_ignore_case(&employee.employee_id, term)
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        let term = self.search.trim().to_lowercase();
        self.matches_lowered(employee, &term)
    }

    fn matches_lowered(&self, employee: &Employee, term: &str) -> bool {
        let search_ok = term.is_empty() || Self::matches_search(employee, term);
        let department_ok = self
            .department
            .as_ref()
            .map_or(true, |d| employee.department == *d);
        let status_ok = self.status.map_or(true, |s| employee.status == s);
        search_ok && department_ok && status_ok
    }

    /// Matching employees, in collection order.
    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        let term = self.search.trim().to_lowercase();
        employees
            .iter()
            .filter(|e| self.matches_lowered(e, &term))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.department.is_none() && self.status.is_none()
    }
}

/// Distinct departments in first-appearance order.
pub fn departments(employees: &[Employee]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for employee in employees {
        if !seen.iter().any(|d| *d == employee.department) {
            seen.push(employee.department.clone());
        }
    }
    seen
}
