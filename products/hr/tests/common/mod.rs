use std::time::Duration;

use products_hr::{EmployeeFetcher, FetcherSettings};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const EMPLOYEES_PATH: &str = "/employees";

pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("products_hr=debug"));
    let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
}

/// Start a mock endpoint that answers one GET with `response`.
pub async fn serve_once(response: ResponseTemplate) -> MockServer {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEES_PATH))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

pub fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

pub fn fetcher_for(server: &MockServer) -> anyhow::Result<EmployeeFetcher> {
    fetcher_with_timeout(&format!("{}{EMPLOYEES_PATH}", server.uri()), Duration::from_secs(5))
}

pub fn fetcher_with_timeout(url: &str, timeout: Duration) -> anyhow::Result<EmployeeFetcher> {
    let settings = FetcherSettings::new(url)?.with_timeout(timeout)?;
    Ok(EmployeeFetcher::new(settings)?)
}
