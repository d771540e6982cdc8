use crate::errors::ToolError;
use crate::managers::{HotspotsManager, IssuesManager, ProjectsManager, QualityGatesManager};
use crate::mcp::catalog::{tool_by_name, tool_catalog};
use crate::services::config::{ConfigResolver, SonarConfig};
use crate::services::sonar_client::SonarClient;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use std::sync::Arc;

pub struct App {
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    fn validate_tool_wiring(executor: &ToolExecutor) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !executor.has_tool(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        let mut uncataloged: Vec<String> = executor
            .tool_names()
            .into_iter()
            .filter(|name| tool_by_name(name).is_none())
            .map(str::to_string)
            .collect();
        if missing.is_empty() && uncataloged.is_empty() {
            return Ok(());
        }
        missing.sort();
        uncataloged.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint(
                "Every tool in tool_catalog.json must have a handler, and every handler tool a catalog entry.",
            )
            .with_details(serde_json::json!({
                "missing_tools": missing,
                "uncataloged_tools": uncataloged,
            })))
    }

    /// Production wiring: credentials are read from the environment on every call.
    pub fn initialize() -> Result<Self, ToolError> {
        Self::with_resolver(ConfigResolver::from_env(), SonarClient::new()?)
    }

    pub fn with_config(config: SonarConfig) -> Result<Self, ToolError> {
        Self::with_resolver(ConfigResolver::fixed(config), SonarClient::new()?)
    }

    pub fn with_resolver(resolver: ConfigResolver, client: SonarClient) -> Result<Self, ToolError> {
        let client = Arc::new(client);
        let resolver = Arc::new(resolver);

        let handlers: Vec<Arc<dyn ToolHandler>> = vec![
            Arc::new(ProjectsManager::new(client.clone(), resolver.clone())),
            Arc::new(IssuesManager::new(client.clone(), resolver.clone())),
            Arc::new(QualityGatesManager::new(client.clone(), resolver.clone())),
            Arc::new(HotspotsManager::new(client, resolver)),
        ];
        let tool_executor = ToolExecutor::new(handlers);
        Self::validate_tool_wiring(&tool_executor)?;
        tracing::debug!(tools = tool_executor.tool_names().len(), "tool wiring verified");

        Ok(Self {
            tool_executor: Arc::new(tool_executor),
        })
    }
}
