//! Pure reconciliation of the employee collection after a mutation.
//!
//! [`reconcile`] takes the current collection, the caller's intent and the
//! remote outcome, and returns the next collection. Nothing here performs
//! I/O; the store decides the outcome and publishes the result.
//!
//! A failed remote call never rolls the intent back: the local equivalent of
//! the mutation is applied instead, so the collection always reflects what
//! the user asked for.

use rand::Rng;
use tracing::warn;

use crate::models::{Employee, EmployeePatch, NewEmployee};

/// Length of identifiers synthesized for records the server never saw
const LOCAL_ID_LEN: usize = 9;

const LOCAL_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Result of the remote half of a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The server applied the mutation and answered with its record.
    Record(Employee),
    /// The server applied the mutation without returning a record.
    Applied,
    /// The call failed; the local equivalent is applied instead.
    Failed,
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed)
    }
}

impl<E> From<Result<Employee, E>> for Outcome {
    fn from(result: Result<Employee, E>) -> Self {
        match result {
            Ok(record) => Outcome::Record(record),
            Err(_) => Outcome::Failed,
        }
    }
}

impl<E> From<Result<(), E>> for Outcome {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Outcome::Applied,
            Err(_) => Outcome::Failed,
        }
    }
}

/// Next collection plus the record the mutation produced (or touched).
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<R> {
    pub employees: Vec<Employee>,
    pub record: R,
}

/// A mutation the caller asked for. Each intent knows how to apply itself
/// to a collection given the remote outcome, and what record it yields.
pub trait Intent {
    type Record;

    fn apply(self, current: &[Employee], outcome: Outcome) -> Reconciled<Self::Record>;
}

/// Create a record. Always yields the record that ended up in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Add(pub NewEmployee);

/// Shallow-merge `patch` into the record with identifier `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub id: String,
    pub patch: EmployeePatch,
}

/// Remove the record with this identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete(pub String);

/// Compute the collection that follows `intent` given the remote `outcome`.
pub fn reconcile<I: Intent>(current: &[Employee], intent: I, outcome: Outcome) -> Reconciled<I::Record> {
    intent.apply(current, outcome)
}

/// Random base-36 identifier not used by any record in `current`.
///
/// Only unique against the collection as it is now; a server may later
/// hand out the same identifier.
pub fn local_id(current: &[Employee]) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let id: String = (0..LOCAL_ID_LEN)
            .map(|_| LOCAL_ID_ALPHABET[rng.gen_range(0..LOCAL_ID_ALPHABET.len())] as char)
            .collect();
        if !current.iter().any(|e| e.id == id) {
            return id;
        }
    }
}

impl Intent for Add {
    type Record = Employee;

    /// Append the server's record, or a locally built one with a fresh id.
    /// A server id already present replaces that record in place so
    /// identifiers stay unique.
    fn apply(self, current: &[Employee], outcome: Outcome) -> Reconciled<Employee> {
        let record = match outcome {
            Outcome::Record(created) => created,
            Outcome::Applied | Outcome::Failed => self.0.into_employee(local_id(current)),
        };

        let mut employees = current.to_vec();
        match employees.iter_mut().find(|e| e.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => employees.push(record.clone()),
        }

        Reconciled { employees, record }
    }
}

impl Intent for Update {
    type Record = Option<Employee>;

    /// Replace the matching record with the server's version, or with the
    /// merge of the current record and the patch. The replacement keeps the
    /// requested identifier. Unknown ids leave the collection untouched.
    fn apply(self, current: &[Employee], outcome: Outcome) -> Reconciled<Option<Employee>> {
        let Some(position) = current.iter().position(|e| e.id == self.id) else {
            return Reconciled {
                employees: current.to_vec(),
                record: None,
            };
        };

        let replacement = match outcome {
            Outcome::Record(mut updated) => {
                if updated.id != self.id {
                    warn!(requested = %self.id, returned = %updated.id, "Server answered update with another id");
                    updated.id = self.id;
                }
                updated
            }
            Outcome::Applied | Outcome::Failed => self.patch.apply_to(&current[position]),
        };

        let mut employees = current.to_vec();
        employees[position] = replacement.clone();

        Reconciled {
            employees,
            record: Some(replacement),
        }
    }
}

impl Intent for Delete {
    type Record = Option<Employee>;

    /// Deletion is applied whatever the outcome; the outcome only matters
    /// to the caller's error reporting.
    fn apply(self, current: &[Employee], _outcome: Outcome) -> Reconciled<Option<Employee>> {
        let removed = current.iter().find(|e| e.id == self.0).cloned();
        let employees = current.iter().filter(|e| e.id != self.0).cloned().collect();
        Reconciled {
            employees,
            record: removed,
        }
    }
}
