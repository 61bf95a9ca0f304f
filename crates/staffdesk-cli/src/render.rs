//! Plain-text rendering of employees and analytics for the terminal.

use std::fmt::Write;

use staffdesk_core::analytics::{DepartmentSalary, MonthlyHires, PayrollSummary, StatusShare};
use staffdesk_core::utils::{format_date, format_phone, format_salary, truncate_string};
use staffdesk_core::{Employee, EmployeeStats, StoreState};

const NAME_WIDTH: usize = 24;
const POSITION_WIDTH: usize = 26;
const DEPARTMENT_WIDTH: usize = 16;
const ID_WIDTH: usize = 10;

/// Width of the longest bar in the hiring trend chart.
const BAR_WIDTH: usize = 30;

/// One line per warning the state warrants, empty when all is well.
pub fn state_notice(state: &StoreState) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = &state.error {
        lines.push(format!("warning: {error}"));
    }
    if state.is_fallback() {
        lines.push("note: backend unreachable, showing sample data".to_string());
    }
    lines
}

pub fn employee_table(employees: &[&Employee]) -> String {
    if employees.is_empty() {
        return "No employees found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:<POSITION_WIDTH$} {:<DEPARTMENT_WIDTH$} {:<9} {:>10}",
        "ID", "NAME", "POSITION", "DEPARTMENT", "STATUS", "SALARY"
    );
    for e in employees {
        let _ = writeln!(
            out,
            "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:<POSITION_WIDTH$} {:<DEPARTMENT_WIDTH$} {:<9} {:>10}",
            truncate_string(&e.id, ID_WIDTH),
            truncate_string(&e.full_name(), NAME_WIDTH),
            truncate_string(&e.position, POSITION_WIDTH),
            truncate_string(&e.department, DEPARTMENT_WIDTH),
            e.status.label(),
            format_salary(e.salary),
        );
    }
    let _ = writeln!(out, "{} employee(s)", employees.len());
    out
}

pub fn employee_detail(e: &Employee) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", e.full_name(), e.employee_id);
    let _ = writeln!(out, "  Id:         {}", e.id);
    let _ = writeln!(out, "  Position:   {}", e.position);
    let _ = writeln!(out, "  Department: {}", e.department);
    let _ = writeln!(out, "  Status:     {}", e.status.label());
    let _ = writeln!(out, "  Email:      {}", e.email);
    let _ = writeln!(out, "  Phone:      {}", format_phone(&e.phone));
    let _ = writeln!(out, "  Location:   {}", e.location);
    let _ = writeln!(out, "  Salary:     {}", format_salary(e.salary));
    let _ = writeln!(out, "  Hired:      {}", format_date(e.hire_date));
    if let Some(avatar) = &e.avatar {
        let _ = writeln!(out, "  Avatar:     {avatar}");
    }
    out
}

pub fn department_list(counts: &[(String, usize)]) -> String {
    let mut out = String::new();
    for (department, count) in counts {
        let _ = writeln!(out, "{department:<24} {count:>4}");
    }
    out
}

pub fn stats(stats: &EmployeeStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total employees:  {}", stats.total_employees);
    let _ = writeln!(out, "Active:           {}", stats.active_employees);
    let _ = writeln!(out, "New hires:        {}", stats.new_hires);
    let _ = writeln!(out, "On leave:         {}", stats.on_leave);
    out
}

pub fn analytics(
    summary: &PayrollSummary,
    by_department: &[DepartmentSalary],
    distribution: &[StatusShare],
    trend: &[MonthlyHires],
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Payroll");
    let _ = writeln!(out, "  Total:          {}", format_salary(summary.total_payroll));
    let _ = writeln!(out, "  Average salary: {}", format_salary(summary.average_salary));
    let _ = writeln!(out, "  Active:         {}", summary.active_employees);
    let _ = writeln!(out, "  Retention:      {:.1}%", summary.retention_rate);

    let _ = writeln!(out, "\nSalary by department");
    for d in by_department {
        let _ = writeln!(
            out,
            "  {:<DEPARTMENT_WIDTH$} {:>3}  avg {:>10}  total {:>12}",
            truncate_string(&d.department, DEPARTMENT_WIDTH),
            d.count,
            format_salary(d.average),
            format_salary(d.total),
        );
    }

    let _ = writeln!(out, "\nStatus");
    for share in distribution {
        let _ = writeln!(
            out,
            "  {:<9} {:>4}  {:>5.1}%",
            share.status.label(),
            share.count,
            share.percentage
        );
    }

    let _ = writeln!(out, "\nHires per month");
    let peak = trend.iter().map(|m| m.hires).max().unwrap_or(0);
    for month in trend {
        let _ = writeln!(out, "  {:<8} {:>3} {}", month.label, month.hires, bar(month.hires, peak));
    }
    out
}

fn bar(value: usize, peak: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    let len = (value * BAR_WIDTH).div_ceil(peak);
    "#".repeat(len)
}
