use crate::constants::endpoints;
use crate::errors::ToolError;
use crate::managers::{default_page, default_page_size, MAX_PAGE_SIZE};
use crate::models::QualityGateStatus;
use crate::services::config::ConfigResolver;
use crate::services::sonar_client::SonarClient;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::{
    ensure_any_identifier, ensure_identifier, ensure_page, ensure_page_size,
};
use crate::utils::args::{parse_args, to_result};
use crate::utils::query::QueryParams;
use crate::utils::tool_errors::unknown_tool_error;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const QUALITY_GATE_TOOLS: &[&str] = &[
    "get_project_quality_gate_status",
    "list_quality_gates",
    "show_quality_gate",
    "search_quality_gates",
    "get_quality_gate_by_project",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectStatusParams {
    #[serde(default, rename = "analysisId")]
    pub analysis_id: Option<String>,
    #[serde(default, rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(default, rename = "projectKey")]
    pub project_key: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, rename = "pullRequest")]
    pub pull_request: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowQualityGateParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gate_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQualityGatesParams {
    #[serde(rename = "gateId")]
    pub gate_id: i64,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: u32,
    /// `true`: only associated projects, `false`: only unassociated, absent: all.
    #[serde(default)]
    pub selected: Option<bool>,
}

impl SearchQualityGatesParams {
    pub fn new(gate_id: i64) -> Self {
        Self {
            gate_id,
            query: None,
            page: default_page(),
            page_size: default_page_size(),
            selected: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityGateByProjectParams {
    pub project: String,
}

#[derive(Clone)]
pub struct QualityGatesManager {
    client: Arc<SonarClient>,
    config: Arc<ConfigResolver>,
}

impl QualityGatesManager {
    pub fn new(client: Arc<SonarClient>, config: Arc<ConfigResolver>) -> Self {
        Self { client, config }
    }

    pub async fn project_status(
        &self,
        params: ProjectStatusParams,
    ) -> Result<QualityGateStatus, ToolError> {
        ensure_any_identifier(&[
            ("analysisId", params.analysis_id.as_deref()),
            ("projectId", params.project_id.as_deref()),
            ("projectKey", params.project_key.as_deref()),
        ])?;
        let config = self.config.resolve()?;

        let mut query = QueryParams::new();
        query
            .push_opt("analysisId", params.analysis_id.as_deref())
            .push_opt("projectId", params.project_id.as_deref())
            .push_opt("projectKey", params.project_key.as_deref())
            .push_opt("branch", params.branch.as_deref())
            .push_opt("pullRequest", params.pull_request.as_deref());

        let raw = self
            .client
            .get(endpoints::QUALITYGATES_PROJECT_STATUS, query, &config)
            .await?;
        QualityGateStatus::from_json(&raw)
    }

    pub async fn list(&self) -> Result<Value, ToolError> {
        let config = self.config.require_organization("list_quality_gates")?;
        self.client
            .get(endpoints::QUALITYGATES_LIST, QueryParams::new(), &config)
            .await
    }

    pub async fn show(&self, params: ShowQualityGateParams) -> Result<Value, ToolError> {
        let gate_id = params.gate_id.map(|id| id.to_string());
        ensure_any_identifier(&[
            ("name", params.name.as_deref()),
            ("gate_id", gate_id.as_deref()),
        ])?;
        let config = self.config.require_organization("show_quality_gate")?;

        let mut query = QueryParams::new();
        query
            .push_opt("name", params.name.as_deref())
            .push_opt_num("id", params.gate_id);

        self.client
            .get(endpoints::QUALITYGATES_SHOW, query, &config)
            .await
    }

    pub async fn search(&self, params: SearchQualityGatesParams) -> Result<Value, ToolError> {
        let page = ensure_page(params.page, "page")?;
        let page_size = ensure_page_size(params.page_size, "pageSize", MAX_PAGE_SIZE)?;
        let config = self.config.require_organization("search_quality_gates")?;

        let mut query = QueryParams::new();
        query
            .push("gateId", params.gate_id)
            .push("page", page)
            .push("pageSize", page_size)
            .push_opt("query", params.query.as_deref())
            .push_bool("selected", params.selected);

        self.client
            .get(endpoints::QUALITYGATES_SEARCH, query, &config)
            .await
    }

    pub async fn by_project(&self, params: QualityGateByProjectParams) -> Result<Value, ToolError> {
        let project = ensure_identifier(&params.project, "project")?;
        let config = self
            .config
            .require_organization("get_quality_gate_by_project")?;

        let mut query = QueryParams::new();
        query.push("project", project);

        self.client
            .get(endpoints::QUALITYGATES_GET_BY_PROJECT, query, &config)
            .await
    }
}

#[async_trait::async_trait]
impl ToolHandler for QualityGatesManager {
    fn tools(&self) -> &'static [&'static str] {
        QUALITY_GATE_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "get_project_quality_gate_status" => {
                to_result(&self.project_status(parse_args(tool, args)?).await?)
            }
            "list_quality_gates" => self.list().await,
            "show_quality_gate" => self.show(parse_args(tool, args)?).await,
            "search_quality_gates" => self.search(parse_args(tool, args)?).await,
            "get_quality_gate_by_project" => self.by_project(parse_args(tool, args)?).await,
            _ => Err(unknown_tool_error(tool, QUALITY_GATE_TOOLS)),
        }
    }
}
