//! HR vertical slice: the employee directory.
//!
//! [`EmployeeFetcher::get_employees`] pulls the employee list from the HR
//! endpoint, validates it, and returns it sorted by numeric `id`. Every failure
//! is reported as one [`FetchError`] variant.

mod config;
mod employee;
mod error;
mod fetcher;

pub use crate::config::{DEFAULT_EMPLOYEES_URL, DEFAULT_TIMEOUT, FetcherSettings};
pub use crate::employee::{
    EmployeeId, EmployeeList, EmployeeRecord, parse_employee_list, sort_employees,
};
pub use crate::error::{ConfigError, FetchError, FetchErrorKind, FetchResult, RecordError};
pub use crate::fetcher::EmployeeFetcher;
