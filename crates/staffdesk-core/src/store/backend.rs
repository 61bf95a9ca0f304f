use async_trait::async_trait;

use crate::api::{ApiError, EmployeeClient};
use crate::models::{Employee, EmployeePatch, NewEmployee};

/// The remote operations the store depends on.
///
/// `EmployeeClient` is the production implementation; tests substitute an
/// in-memory backend.
#[async_trait]
pub trait EmployeeBackend: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Employee>, ApiError>;

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, ApiError>;

    async fn update(&self, id: &str, patch: &EmployeePatch) -> Result<Employee, ApiError>;

    async fn remove(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl EmployeeBackend for EmployeeClient {
    async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        EmployeeClient::list_all(self).await
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, ApiError> {
        EmployeeClient::create(self, employee).await
    }

    async fn update(&self, id: &str, patch: &EmployeePatch) -> Result<Employee, ApiError> {
        EmployeeClient::update(self, id, patch).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        EmployeeClient::remove(self, id).await
    }
}
