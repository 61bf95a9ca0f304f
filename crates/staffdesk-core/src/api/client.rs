//! API client for the employee REST backend.
//!
//! Every method is a single HTTP round trip: no retries, no caching and no
//! batching. Non-2xx responses become `ApiError::HttpStatus` regardless of
//! the body the server sent.

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::{Client, Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{Employee, EmployeePatch, EmployeeStats, NewEmployee};

use super::ApiError;

/// Collection path below the configured base URL.
const EMPLOYEES_PATH: &str = "employees";

/// Segment for the aggregate stats endpoint.
const STATS_SEGMENT: &str = "stats";

/// API client for the employee backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct EmployeeClient {
    client: Client,
    collection_url: Url,
}

impl EmployeeClient {
    /// Create a client rooted at `base_url` (for example
    /// `http://localhost:8000/employeebe`). Without a timeout the request
    /// waits as long as the transport allows.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        let collection = format!("{}/{}", base_url.trim_end_matches('/'), EMPLOYEES_PATH);
        let collection_url = Url::parse(&collection)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if collection_url.cannot_be_a_base() {
            bail!("API base URL must be hierarchical: {}", base_url);
        }

        Ok(Self {
            client,
            collection_url,
        })
    }

    /// URL of the employee collection, e.g. `.../employeebe/employees`.
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// URL of one child resource below the collection. The segment is
    /// percent-encoded, so identifiers containing `/` or spaces stay a
    /// single path segment.
    fn child_url(&self, segment: &str) -> Url {
        let mut url = self.collection_url.clone();
        // Hierarchical URLs are checked in `new`, so this cannot fail.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(segment);
        }
        url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        Self::check_response(response).await
    }

    async fn request_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        debug!(method = %method, url = %url, "Sending request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// GET /employees
    pub async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        let employees: Vec<Employee> = self
            .request_json(Method::GET, self.collection_url.clone(), None::<&()>)
            .await?;
        debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    /// GET /employees/{id}. A missing record is reported as
    /// `HttpStatus { status: 404, .. }`.
    pub async fn get_by_id(&self, id: &str) -> Result<Employee, ApiError> {
        self.request_json(Method::GET, self.child_url(id), None::<&()>)
            .await
    }

    /// POST /employees. Returns the record with its server-assigned id.
    pub async fn create(&self, employee: &NewEmployee) -> Result<Employee, ApiError> {
        self.request_json(Method::POST, self.collection_url.clone(), Some(employee))
            .await
    }

    /// PUT /employees/{id} with only the fields present in `patch`.
    pub async fn update(&self, id: &str, patch: &EmployeePatch) -> Result<Employee, ApiError> {
        self.request_json(Method::PUT, self.child_url(id), Some(patch))
            .await
    }

    /// DELETE /employees/{id}. Any response body is ignored.
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let url = self.child_url(id);
        debug!(method = "DELETE", url = %url, "Sending request");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    /// GET /employees?department=<d>
    pub async fn list_by_department(&self, department: &str) -> Result<Vec<Employee>, ApiError> {
        let mut url = self.collection_url.clone();
        url.query_pairs_mut().append_pair("department", department);
        self.request_json(Method::GET, url, None::<&()>).await
    }

    /// GET /employees/stats
    pub async fn get_stats(&self) -> Result<EmployeeStats, ApiError> {
        self.request_json(Method::GET, self.child_url(STATS_SEGMENT), None::<&()>)
            .await
    }
}
