use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    config::FetcherSettings,
    employee::{EmployeeList, parse_employee_list, sort_employees},
    error::{ConfigError, FetchError, FetchResult},
};

const USER_AGENT: &str = concat!("products-hr/", env!("CARGO_PKG_VERSION"));

/// Fetches the employee directory from the HR endpoint.
///
/// Holds only immutable settings and a shared client handle, so clones can be
/// used from many tasks at once. Each call performs exactly one GET and never
/// retries.
#[derive(Clone, Debug)]
pub struct EmployeeFetcher {
    settings: FetcherSettings,
    http: Client,
}

impl EmployeeFetcher {
    pub fn new(settings: FetcherSettings) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { settings, http })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(FetcherSettings::from_env()?)
    }

    pub fn settings(&self) -> &FetcherSettings {
        &self.settings
    }

    /// Fetch every employee, sorted ascending by numeric `id`.
    ///
    /// Records with equal ids keep the order the endpoint returned them in.
    /// Any failure discards the whole response.
    #[instrument(name = "hr.get_employees", skip(self), fields(url = %self.settings.url()))]
    pub async fn get_employees(&self) -> FetchResult<EmployeeList> {
        let result = self.fetch().await;
        match &result {
            Ok(employees) => debug!(count = employees.len(), "employees fetched"),
            Err(err) => warn!(kind = %err.kind(), error = %err, "employee fetch failed"),
        }
        result
    }

    async fn fetch(&self) -> FetchResult<EmployeeList> {
        let response = self
            .http
            .get(self.settings.url())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        debug!(status = status.as_u16(), "employees endpoint responded");
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let value: Value = serde_json::from_slice(&body).map_err(FetchError::malformed_body)?;

        let mut employees = parse_employee_list(value)?;
        sort_employees(&mut employees);
        Ok(employees)
    }
}
