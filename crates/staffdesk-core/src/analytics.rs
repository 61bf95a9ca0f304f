//! Aggregate figures derived from the employee collection.
//!
//! These are the numbers behind the dashboard views: payroll summary,
//! salary per department, status distribution, hiring trend and
//! department head counts. Everything is computed client side from
//! whatever collection the store currently holds.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Employee, EmployeeStats, EmployeeStatus};

/// A hire within this many days before "today" counts as a new hire.
pub const NEW_HIRE_WINDOW_DAYS: i64 = 90;

/// Default number of months shown by the hiring trend.
pub const DEFAULT_TREND_MONTHS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayrollSummary {
    pub total_payroll: f64,
    pub average_salary: f64,
    pub active_employees: usize,
    /// Active employees as a percentage of all employees.
    pub retention_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSalary {
    pub department: String,
    pub count: usize,
    pub total: f64,
    /// Rounded to whole currency units.
    pub average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: EmployeeStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyHires {
    pub year: i32,
    pub month: u32,
    /// e.g. "Mar 2024"
    pub label: String,
    pub hires: usize,
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn summary(employees: &[Employee]) -> PayrollSummary {
    let total_payroll: f64 = employees.iter().map(|e| e.salary).sum();
    let active_employees = employees.iter().filter(|e| e.is_active()).count();
    let average_salary = if employees.is_empty() {
        0.0
    } else {
        total_payroll / employees.len() as f64
    };

    PayrollSummary {
        total_payroll,
        average_salary,
        active_employees,
        retention_rate: percentage(active_employees, employees.len()),
    }
}

/// Same shape as the backend's stats endpoint, computed from `employees`.
pub fn local_stats(employees: &[Employee], today: NaiveDate) -> EmployeeStats {
    let with_status = |status: EmployeeStatus| {
        employees.iter().filter(|e| e.status == status).count() as u64
    };
    let new_hires = employees
        .iter()
        .filter(|e| (0..=NEW_HIRE_WINDOW_DAYS).contains(&(today - e.hire_date).num_days()))
        .count() as u64;

    EmployeeStats {
        total_employees: employees.len() as u64,
        active_employees: with_status(EmployeeStatus::Active),
        new_hires,
        on_leave: with_status(EmployeeStatus::OnLeave),
    }
}

/// Per-department salary totals and rounded averages, sorted by department.
pub fn salary_by_department(employees: &[Employee]) -> Vec<DepartmentSalary> {
    let mut totals: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for employee in employees {
        let entry = totals.entry(employee.department.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += employee.salary;
    }

    totals
        .into_iter()
        .map(|(department, (count, total))| DepartmentSalary {
            department: department.to_string(),
            count,
            total,
            average: (total / count as f64).round(),
        })
        .collect()
}

/// Count and share of each status, always in Active, On Leave, Inactive order.
pub fn status_distribution(employees: &[Employee]) -> Vec<StatusShare> {
    [EmployeeStatus::Active, EmployeeStatus::OnLeave, EmployeeStatus::Inactive]
        .into_iter()
        .map(|status| {
            let count = employees.iter().filter(|e| e.status == status).count();
            StatusShare {
                status,
                count,
                percentage: percentage(count, employees.len()),
            }
        })
        .collect()
}

/// Hires per calendar month for the `months` months ending with `today`'s
/// month, oldest first. Hires outside the window are ignored.
pub fn hiring_trend(employees: &[Employee], today: NaiveDate, months: usize) -> Vec<MonthlyHires> {
    let month_index = |date: NaiveDate| date.year() * 12 + date.month0() as i32;
    let current = month_index(today);

    let mut hires: HashMap<i32, usize> = HashMap::new();
    for employee in employees {
        *hires.entry(month_index(employee.hire_date)).or_default() += 1;
    }

    (0..months as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            let year = index.div_euclid(12);
            let month = index.rem_euclid(12) as u32 + 1;
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default();
            MonthlyHires {
                year,
                month,
                label,
                hires: hires.get(&index).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Head count per department, largest first, ties broken by name.
pub fn department_counts(employees: &[Employee]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for employee in employees {
        *counts.entry(employee.department.as_str()).or_default() += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(department, count)| (department.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
