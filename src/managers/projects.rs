use crate::constants::{endpoints, qualifiers};
use crate::errors::ToolError;
use crate::managers::{default_page, default_page_size, MAX_PAGE_SIZE};
use crate::models::SearchProjectsResponse;
use crate::services::config::ConfigResolver;
use crate::services::sonar_client::SonarClient;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::{ensure_identifier, ensure_page, ensure_page_size};
use crate::utils::args::{parse_args, to_result};
use crate::utils::query::QueryParams;
use crate::utils::tool_errors::unknown_tool_error;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const PROJECT_TOOLS: &[&str] = &[
    "search_my_sonarqube_projects",
    "show_component",
    "component_tree",
];

#[derive(Debug, Clone, Deserialize)]
pub struct SearchProjectsParams {
    #[serde(default = "default_page_text")]
    pub page: String,
}

impl Default for SearchProjectsParams {
    fn default() -> Self {
        Self {
            page: default_page_text(),
        }
    }
}

fn default_page_text() -> String {
    default_page().to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowComponentParams {
    pub component: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, rename = "pullRequest")]
    pub pull_request: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentTreeParams {
    pub component: String,
    #[serde(default)]
    pub qualifiers: Option<Vec<String>>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, rename = "pullRequest")]
    pub pull_request: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub sort_fields: Option<Vec<String>>,
    #[serde(default)]
    pub asc: Option<bool>,
    #[serde(default = "default_page")]
    pub p: u32,
    #[serde(default = "default_page_size")]
    pub ps: u32,
}

impl ComponentTreeParams {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            qualifiers: None,
            branch: None,
            pull_request: None,
            q: None,
            strategy: None,
            sort_fields: None,
            asc: None,
            p: default_page(),
            ps: default_page_size(),
        }
    }
}

/// Project discovery and component inspection.
#[derive(Clone)]
pub struct ProjectsManager {
    client: Arc<SonarClient>,
    config: Arc<ConfigResolver>,
}

impl ProjectsManager {
    pub fn new(client: Arc<SonarClient>, config: Arc<ConfigResolver>) -> Self {
        Self { client, config }
    }

    /// Without an organization the search is narrowed to projects (`TRK`).
    pub async fn search_my_projects(
        &self,
        params: SearchProjectsParams,
    ) -> Result<SearchProjectsResponse, ToolError> {
        let config = self.config.resolve()?;
        let page = ensure_identifier(&params.page, "page")?;

        let mut query = QueryParams::new();
        query.push("p", page);
        if config.organization.is_none() {
            query.push("qualifiers", qualifiers::PROJECT);
        }

        let raw = self
            .client
            .get(endpoints::COMPONENTS_SEARCH, query, &config)
            .await?;
        SearchProjectsResponse::from_json(&raw)
    }

    pub async fn show_component(&self, params: ShowComponentParams) -> Result<Value, ToolError> {
        let config = self.config.resolve()?;

        let mut query = QueryParams::new();
        query
            .push("component", ensure_identifier(&params.component, "component")?)
            .push_opt("branch", params.branch.as_deref())
            .push_opt("pullRequest", params.pull_request.as_deref());

        self.client
            .get(endpoints::COMPONENTS_SHOW, query, &config)
            .await
    }

    pub async fn component_tree(&self, params: ComponentTreeParams) -> Result<Value, ToolError> {
        let config = self.config.resolve()?;

        let mut query = QueryParams::new();
        query
            .push("component", ensure_identifier(&params.component, "component")?)
            .push("p", ensure_page(params.p, "p")?)
            .push("ps", ensure_page_size(params.ps, "ps", MAX_PAGE_SIZE)?)
            .push_list("qualifiers", params.qualifiers.as_deref())
            .push_opt("branch", params.branch.as_deref())
            .push_opt("pullRequest", params.pull_request.as_deref())
            .push_opt("q", params.q.as_deref())
            .push_opt("strategy", params.strategy.as_deref())
            .push_list("s", params.sort_fields.as_deref())
            .push_bool("asc", params.asc);

        self.client
            .get(endpoints::COMPONENTS_TREE, query, &config)
            .await
    }
}

#[async_trait::async_trait]
impl ToolHandler for ProjectsManager {
    fn tools(&self) -> &'static [&'static str] {
        PROJECT_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "search_my_sonarqube_projects" => {
                to_result(&self.search_my_projects(parse_args(tool, args)?).await?)
            }
            "show_component" => self.show_component(parse_args(tool, args)?).await,
            "component_tree" => self.component_tree(parse_args(tool, args)?).await,
            _ => Err(unknown_tool_error(tool, PROJECT_TOOLS)),
        }
    }
}
