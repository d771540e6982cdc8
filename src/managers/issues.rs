use crate::constants::endpoints;
use crate::errors::ToolError;
use crate::managers::{default_page, default_page_size, MAX_PAGE_SIZE};
use crate::models::SearchIssuesResponse;
use crate::services::config::ConfigResolver;
use crate::services::sonar_client::SonarClient;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::{ensure_identifier, ensure_page, ensure_page_size};
use crate::utils::args::{parse_args, to_result};
use crate::utils::query::{QueryParams, StringOrList};
use crate::utils::tool_errors::unknown_tool_error;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const ISSUE_TOOLS: &[&str] = &[
    "search_sonar_issues_in_projects",
    "list_issue_authors",
    "get_issue_changelog",
    "list_issue_tags",
];

#[derive(Debug, Clone, Deserialize)]
pub struct SearchIssuesParams {
    #[serde(default)]
    pub projects: Option<Vec<String>>,
    #[serde(default, rename = "pullRequestId")]
    pub pull_request_id: Option<String>,
    /// Impact severities, e.g. `HIGH,BLOCKER`.
    #[serde(default)]
    pub severities: Option<StringOrList>,
    #[serde(default = "default_page")]
    pub p: u32,
    #[serde(default = "default_page_size")]
    pub ps: u32,
}

impl Default for SearchIssuesParams {
    fn default() -> Self {
        Self {
            projects: None,
            pull_request_id: None,
            severities: None,
            p: default_page(),
            ps: default_page_size(),
        }
    }
}

/// Shared by `list_issue_authors` and `list_issue_tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueFacetParams {
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_page_size")]
    pub ps: u32,
}

impl Default for IssueFacetParams {
    fn default() -> Self {
        Self {
            project: None,
            q: None,
            ps: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueChangelogParams {
    pub issue: String,
}

#[derive(Clone)]
pub struct IssuesManager {
    client: Arc<SonarClient>,
    config: Arc<ConfigResolver>,
}

impl IssuesManager {
    pub fn new(client: Arc<SonarClient>, config: Arc<ConfigResolver>) -> Self {
        Self { client, config }
    }

    pub async fn search_issues(
        &self,
        params: SearchIssuesParams,
    ) -> Result<SearchIssuesResponse, ToolError> {
        let config = self.config.resolve()?;
        let severities = params.severities.as_ref().map(StringOrList::joined);

        let mut query = QueryParams::new();
        query
            .push("p", ensure_page(params.p, "p")?)
            .push("ps", ensure_page_size(params.ps, "ps", MAX_PAGE_SIZE)?)
            .push_list("projects", params.projects.as_deref())
            .push_opt("pullRequest", params.pull_request_id.as_deref())
            .push_opt("impactSeverities", severities.as_deref());

        let raw = self
            .client
            .get(endpoints::ISSUES_SEARCH, query, &config)
            .await?;
        SearchIssuesResponse::from_json(&raw)
    }

    /// Organization-scoped upstream.
    pub async fn list_authors(&self, params: IssueFacetParams) -> Result<Value, ToolError> {
        let query = facet_query(&params)?;
        let config = self.config.require_organization("list_issue_authors")?;
        self.client
            .get(endpoints::ISSUES_AUTHORS, query, &config)
            .await
    }

    pub async fn changelog(&self, params: IssueChangelogParams) -> Result<Value, ToolError> {
        let config = self.config.resolve()?;

        let mut query = QueryParams::new();
        query.push("issue", ensure_identifier(&params.issue, "issue")?);

        self.client
            .get(endpoints::ISSUES_CHANGELOG, query, &config)
            .await
    }

    pub async fn list_tags(&self, params: IssueFacetParams) -> Result<Value, ToolError> {
        let config = self.config.resolve()?;
        let query = facet_query(&params)?;
        self.client.get(endpoints::ISSUES_TAGS, query, &config).await
    }
}

fn facet_query(params: &IssueFacetParams) -> Result<QueryParams, ToolError> {
    let mut query = QueryParams::new();
    query
        .push("ps", ensure_page_size(params.ps, "ps", MAX_PAGE_SIZE)?)
        .push_opt("project", params.project.as_deref())
        .push_opt("q", params.q.as_deref());
    Ok(query)
}

#[async_trait::async_trait]
impl ToolHandler for IssuesManager {
    fn tools(&self) -> &'static [&'static str] {
        ISSUE_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "search_sonar_issues_in_projects" => {
                to_result(&self.search_issues(parse_args(tool, args)?).await?)
            }
            "list_issue_authors" => self.list_authors(parse_args(tool, args)?).await,
            "get_issue_changelog" => self.changelog(parse_args(tool, args)?).await,
            "list_issue_tags" => self.list_tags(parse_args(tool, args)?).await,
            _ => Err(unknown_tool_error(tool, ISSUE_TOOLS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_query_orders_page_size_first() {
        let query = facet_query(&IssueFacetParams {
            project: Some("test-project".to_string()),
            q: Some("dev".to_string()),
            ps: 50,
        })
        .expect("query");
        let keys: Vec<&str> = query.pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["ps", "project", "q"]);
    }

    #[test]
    fn search_params_default_paging() {
        let params: SearchIssuesParams = parse_args("t", Value::Null).expect("parse");
        assert_eq!(params.p, 1);
        assert_eq!(params.ps, 100);
        assert!(params.severities.is_none());
    }
}
