//! Command dispatch: each subcommand loads the store, performs its intent
//! and renders the resulting snapshot.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use staffdesk_core::analytics;
use staffdesk_core::{Config, Employee, EmployeeFilter, EmployeePatch, EmployeeStore, NewEmployee};

use crate::cli::{Cli, Command};
use crate::render;

pub async fn run(cli: Cli, config: &Config, store: &EmployeeStore) -> Result<()> {
    let json = cli.json;
    let today = Local::now().date_naive();

    match cli.command {
        Command::List { search, department, status, remote } => {
            let filter = EmployeeFilter { search, department, status };
            list(store, &filter, remote, json).await
        }
        Command::Show { id } => show(store, &id, json).await,
        Command::Add(args) => {
            let new = args.into_new_employee(today);
            new.validate()?;
            store.load().await;
            let added = store.add(new).await;
            report(store);
            print_employee(&added, json)
        }
        Command::Update { id, fields } => {
            let patch = EmployeePatch::from(fields);
            if patch.is_empty() {
                bail!("Nothing to update: pass at least one field flag");
            }
            patch.validate()?;
            store.load().await;
            let updated = store.update(&id, patch).await;
            report(store);
            match updated {
                Some(employee) => print_employee(&employee, json),
                None => bail!("No employee with id {id}"),
            }
        }
        Command::Delete { id } => {
            store.load().await;
            let removed = store.delete(&id).await;
            report(store);
            match removed {
                Some(employee) => {
                    println!("Deleted {} ({})", employee.full_name(), employee.id);
                    Ok(())
                }
                None => bail!("No employee with id {id}"),
            }
        }
        Command::Import { file } => import(store, &file, json).await,
        Command::Departments => {
            store.load().await;
            report(store);
            let counts = analytics::department_counts(&store.employees());
            if json {
                print_json(&counts)
            } else {
                print!("{}", render::department_list(&counts));
                Ok(())
            }
        }
        Command::Stats { remote } => stats(store, remote, today, json).await,
        Command::Analytics { months } => {
            store.load().await;
            report(store);
            let employees = store.employees();
            let summary = analytics::summary(&employees);
            let by_department = analytics::salary_by_department(&employees);
            let distribution = analytics::status_distribution(&employees);
            let trend = analytics::hiring_trend(&employees, today, months);
            if json {
                print_json(&serde_json::json!({
                    "summary": summary,
                    "salaryByDepartment": by_department,
                    "statusDistribution": distribution,
                    "hiringTrend": trend,
                }))
            } else {
                print!("{}", render::analytics(&summary, &by_department, &distribution, &trend));
                Ok(())
            }
        }
        Command::Config { save } => {
            if save {
                config.save().context("Failed to save configuration")?;
                eprintln!("Saved to {}", Config::config_path()?.display());
            }
            print_json(config)
        }
    }
}

/// Print the store's warning lines to stderr.
fn report(store: &EmployeeStore) {
    for line in render::state_notice(&store.snapshot()) {
        eprintln!("{line}");
    }
}

async fn list(store: &EmployeeStore, filter: &EmployeeFilter, remote: bool, json: bool) -> Result<()> {
    if remote {
        if let Some(department) = &filter.department {
            let found = store
                .backend()
                .list_by_department(department)
                .await
                .with_context(|| format!("Failed to list department {department}"))?;
            let refined: Vec<_> = filter.apply(&found).into_iter().cloned().collect();
            return print_list(&refined, json);
        }
    }

    store.load().await;
    report(store);
    let found = store.filtered(filter);
    print_list(&found, json)
}

async fn show(store: &EmployeeStore, id: &str, json: bool) -> Result<()> {
    match store.backend().get_by_id(id).await {
        Ok(employee) => print_employee(&employee, json),
        Err(e) if e.is_not_found() => bail!("No employee with id {id}"),
        Err(e) => {
            // Backend trouble: look the record up in whatever the store can show
            warn!(error = %e, id = %id, "Direct lookup failed, searching loaded collection");
            store.load().await;
            report(store);
            match store.get(id) {
                Some(employee) => print_employee(&employee, json),
                None => bail!("No employee with id {id}"),
            }
        }
    }
}

async fn import(store: &EmployeeStore, file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<NewEmployee> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    for (i, record) in records.iter().enumerate() {
        record
            .validate()
            .with_context(|| format!("Record {} in {}", i + 1, file.display()))?;
    }

    store.load().await;
    let added = join_all(records.into_iter().map(|record| store.add(record))).await;
    info!(count = added.len(), "Imported employees");
    report(store);

    if json {
        return print_json(&added);
    }
    let refs: Vec<_> = added.iter().collect();
    print!("{}", render::employee_table(&refs));
    Ok(())
}

async fn stats(store: &EmployeeStore, remote: bool, today: NaiveDate, json: bool) -> Result<()> {
    let figures = if remote {
        store
            .backend()
            .get_stats()
            .await
            .context("Failed to fetch stats")?
    } else {
        store.load().await;
        report(store);
        analytics::local_stats(&store.employees(), today)
    };

    if json {
        print_json(&figures)
    } else {
        print!("{}", render::stats(&figures));
        Ok(())
    }
}

fn print_list(employees: &[Employee], json: bool) -> Result<()> {
    if json {
        return print_json(employees);
    }
    let refs: Vec<_> = employees.iter().collect();
    print!("{}", render::employee_table(&refs));
    Ok(())
}

fn print_employee(employee: &Employee, json: bool) -> Result<()> {
    if json {
        print_json(employee)
    } else {
        print!("{}", render::employee_detail(employee));
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use clap::Parser;
    use staffdesk_core::fallback::fallback_employees;
    use staffdesk_core::store::DELETE_FAILED;
    use staffdesk_core::{EmployeeClient, LoadPhase};

    use super::*;

    /// A store whose backend refuses every connection.
    fn offline_store() -> EmployeeStore {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = EmployeeClient::new(&format!("http://{addr}/employeebe"), None).unwrap();
        EmployeeStore::new(client)
    }

    async fn run_args(store: &EmployeeStore, args: &[&str]) -> Result<()> {
        let cli = Cli::try_parse_from(std::iter::once("staffdesk").chain(args.iter().copied())).unwrap();
        run(cli, &Config::default(), store).await
    }

    #[tokio::test]
    async fn test_update_without_fields_is_rejected_before_loading() {
        let store = offline_store();
        let err = run_args(&store, &["update", "1"]).await.unwrap_err();
        assert!(err.to_string().starts_with("Nothing to update"));
        assert_eq!(store.snapshot().phase, LoadPhase::Loading);
    }

    #[tokio::test]
    async fn test_invalid_add_is_rejected_before_loading() {
        let store = offline_store();
        let err = run_args(
            &store,
            &[
                "add", "--first-name", "Ada", "--last-name", "Lovelace", "--email", "ada@company.com",
                "--position", "Engineer", "--department", "Engineering", "--salary=-5",
                "--employee-id", "EMP100",
            ],
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Salary"));
        assert!(store.employees().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_id_reports_missing() {
        let store = offline_store();
        let err = run_args(&store, &["update", "nobody", "--salary", "1"]).await.unwrap_err();
        assert_eq!(err.to_string(), "No employee with id nobody");
        assert!(store.snapshot().is_fallback());
        assert_eq!(store.employees().as_slice(), fallback_employees());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_reports_missing() {
        let store = offline_store();
        let err = run_args(&store, &["delete", "nobody"]).await.unwrap_err();
        assert_eq!(err.to_string(), "No employee with id nobody");
        assert_eq!(store.employees().len(), fallback_employees().len());
    }

    #[tokio::test]
    async fn test_delete_applies_locally_when_offline() {
        let store = offline_store();
        run_args(&store, &["delete", "1"]).await.unwrap();
        assert!(store.get("1").is_none());
        assert_eq!(store.snapshot().error.as_deref(), Some(DELETE_FAILED));
    }

    #[tokio::test]
    async fn test_show_falls_back_to_loaded_collection() {
        let store = offline_store();
        run_args(&store, &["show", "1"]).await.unwrap();
        assert!(store.snapshot().is_fallback());

        let err = run_args(&store, &["show", "missing"]).await.unwrap_err();
        assert_eq!(err.to_string(), "No employee with id missing");
    }
}
