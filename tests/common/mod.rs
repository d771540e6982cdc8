#![allow(dead_code)]

use once_cell::sync::Lazy;
use sonarcloud_mcp::app::App;
use sonarcloud_mcp::mcp::server::McpServer;
use sonarcloud_mcp::services::config::{ConfigResolver, SonarConfig};
use sonarcloud_mcp::services::sonar_client::SonarClient;
use std::sync::Arc;
use tokio::sync::Mutex;
use wiremock::{MockServer, Request};

pub const TOKEN: &str = "test-token";
pub const ORG: &str = "test-org";

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn config(server: &MockServer, organization: Option<&str>) -> SonarConfig {
    SonarConfig::new(TOKEN, organization.map(str::to_string), server.uri())
}

pub fn resolver(server: &MockServer, organization: Option<&str>) -> Arc<ConfigResolver> {
    Arc::new(ConfigResolver::fixed(config(server, organization)))
}

pub fn client() -> Arc<SonarClient> {
    Arc::new(SonarClient::new().expect("http client"))
}

pub fn mcp_server(server: &MockServer, organization: Option<&str>) -> McpServer {
    let app = App::with_config(config(server, organization)).expect("app wiring");
    McpServer::with_app(app)
}

pub async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

pub fn restore_env(key: &str, previous: Option<String>) {
    match previous {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}
