use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use staffdesk_core::{EmployeePatch, EmployeeStatus, NewEmployee};

#[derive(Debug, Parser)]
#[command(name = "staffdesk", version, about = "Manage employee records from the command line")]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:8000/employeebe (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List employees, optionally filtered
    List {
        /// Matches first/last name, email, position or employee code
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        department: Option<String>,
        /// active, inactive or on-leave
        #[arg(long)]
        status: Option<EmployeeStatus>,
        /// Ask the backend for the department instead of filtering locally
        #[arg(long, requires = "department")]
        remote: bool,
    },
    /// Show one employee
    Show { id: String },
    /// Create an employee
    Add(AddArgs),
    /// Change fields of an employee
    Update {
        id: String,
        #[command(flatten)]
        fields: PatchArgs,
    },
    /// Delete an employee
    Delete { id: String },
    /// Create every employee listed in a JSON file (an array of records without ids)
    Import { file: PathBuf },
    /// List departments with head counts
    Departments,
    /// Headline figures: total, active, new hires, on leave
    Stats {
        /// Use the backend's stats endpoint instead of computing locally
        #[arg(long)]
        remote: bool,
    },
    /// Payroll, salary by department, status distribution and hiring trend
    Analytics {
        #[arg(long, default_value_t = staffdesk_core::analytics::DEFAULT_TREND_MONTHS)]
        months: usize,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the user config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long)]
    pub position: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub salary: f64,
    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    pub hire_date: Option<NaiveDate>,
    #[arg(long, default_value = "active")]
    pub status: EmployeeStatus,
    #[arg(long)]
    pub avatar: Option<String>,
    #[arg(long, default_value = "")]
    pub location: String,
    /// Internal employee code, e.g. EMP042
    #[arg(long)]
    pub employee_id: String,
}

impl AddArgs {
    pub fn into_new_employee(self, today: NaiveDate) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            department: self.department,
            salary: self.salary,
            hire_date: self.hire_date.unwrap_or(today),
            status: self.status,
            avatar: self.avatar,
            location: self.location,
            employee_id: self.employee_id,
        }
    }
}

#[derive(Debug, Args)]
pub struct PatchArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub salary: Option<f64>,
    #[arg(long)]
    pub hire_date: Option<NaiveDate>,
    #[arg(long)]
    pub status: Option<EmployeeStatus>,
    #[arg(long)]
    pub avatar: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub employee_id: Option<String>,
}

impl From<PatchArgs> for EmployeePatch {
    fn from(args: PatchArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            position: args.position,
            department: args.department,
            salary: args.salary,
            hire_date: args.hire_date,
            status: args.status,
            avatar: args.avatar,
            location: args.location,
            employee_id: args.employee_id,
        }
    }
}
