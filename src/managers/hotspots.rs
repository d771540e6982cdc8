use crate::constants::endpoints;
use crate::errors::ToolError;
use crate::managers::{default_page, default_page_size, MAX_PAGE_SIZE};
use crate::models::{ChangeHotspotStatusResponse, HotspotDetails, SearchHotspotsResponse};
use crate::services::config::ConfigResolver;
use crate::services::sonar_client::{HttpMethod, SonarClient};
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::{ensure_identifier, ensure_page, ensure_page_size};
use crate::utils::args::{parse_args, to_result};
use crate::utils::query::{QueryParams, StringOrList};
use crate::utils::tool_errors::unknown_tool_error;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const HOTSPOT_TOOLS: &[&str] = &["search_hotspots", "show_hotspot", "change_hotspot_status"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HotspotStatus {
    ToReview,
    Reviewed,
}

impl HotspotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HotspotStatus::ToReview => "TO_REVIEW",
            HotspotStatus::Reviewed => "REVIEWED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HotspotResolution {
    Fixed,
    Safe,
    Acknowledged,
}

impl HotspotResolution {
    pub fn as_str(self) -> &'static str {
        match self {
            HotspotResolution::Fixed => "FIXED",
            HotspotResolution::Safe => "SAFE",
            HotspotResolution::Acknowledged => "ACKNOWLEDGED",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHotspotsParams {
    #[serde(rename = "projectKey")]
    pub project_key: String,
    #[serde(default)]
    pub files: Option<StringOrList>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, rename = "pullRequest")]
    pub pull_request: Option<String>,
    #[serde(default = "default_page")]
    pub p: u32,
    #[serde(default = "default_page_size")]
    pub ps: u32,
}

impl SearchHotspotsParams {
    pub fn new(project_key: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            files: None,
            branch: None,
            pull_request: None,
            p: default_page(),
            ps: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowHotspotParams {
    pub hotspot: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeHotspotStatusParams {
    pub hotspot: String,
    pub status: HotspotStatus,
    #[serde(default)]
    pub resolution: Option<HotspotResolution>,
}

#[derive(Clone)]
pub struct HotspotsManager {
    client: Arc<SonarClient>,
    config: Arc<ConfigResolver>,
}

impl HotspotsManager {
    pub fn new(client: Arc<SonarClient>, config: Arc<ConfigResolver>) -> Self {
        Self { client, config }
    }

    pub async fn search(
        &self,
        params: SearchHotspotsParams,
    ) -> Result<SearchHotspotsResponse, ToolError> {
        let config = self.config.resolve()?;
        let files = params.files.as_ref().map(StringOrList::joined);

        let mut query = QueryParams::new();
        query
            .push("projectKey", ensure_identifier(&params.project_key, "projectKey")?)
            .push("p", ensure_page(params.p, "p")?)
            .push("ps", ensure_page_size(params.ps, "ps", MAX_PAGE_SIZE)?)
            .push_opt("files", files.as_deref())
            .push_opt("branch", params.branch.as_deref())
            .push_opt("pullRequest", params.pull_request.as_deref());

        let raw = self
            .client
            .get(endpoints::HOTSPOTS_SEARCH, query, &config)
            .await?;
        SearchHotspotsResponse::from_json(&raw)
    }

    pub async fn show(&self, params: ShowHotspotParams) -> Result<HotspotDetails, ToolError> {
        let config = self.config.resolve()?;

        let mut query = QueryParams::new();
        query.push("hotspot", ensure_identifier(&params.hotspot, "hotspot")?);

        let raw = self
            .client
            .get(endpoints::HOTSPOTS_SHOW, query, &config)
            .await?;
        HotspotDetails::from_json(&raw)
    }

    /// Posts the new status as a form body. The resolution is sent only
    /// with `REVIEWED`; a missing one is left for SonarCloud to reject.
    pub async fn change_status(
        &self,
        params: ChangeHotspotStatusParams,
    ) -> Result<ChangeHotspotStatusResponse, ToolError> {
        let config = self.config.resolve()?;
        let hotspot = ensure_identifier(&params.hotspot, "hotspot")?;
        let body = encode_status_form(hotspot, params.status, params.resolution)?;

        if params.status == HotspotStatus::Reviewed && params.resolution.is_none() {
            tracing::warn!(hotspot, "REVIEWED status submitted without a resolution");
        }

        self.client
            .execute(
                endpoints::HOTSPOTS_CHANGE_STATUS,
                QueryParams::new(),
                HttpMethod::Post,
                Some(body),
                &config,
            )
            .await?;

        Ok(ChangeHotspotStatusResponse {
            success: true,
            message: format!(
                "Hotspot {} status changed to {}",
                hotspot,
                params.status.as_str()
            ),
        })
    }
}

fn encode_status_form(
    hotspot: &str,
    status: HotspotStatus,
    resolution: Option<HotspotResolution>,
) -> Result<String, ToolError> {
    let mut fields: Vec<(&str, &str)> = vec![("hotspot", hotspot), ("status", status.as_str())];
    if let (HotspotStatus::Reviewed, Some(resolution)) = (status, resolution) {
        fields.push(("resolution", resolution.as_str()));
    }
    serde_urlencoded::to_string(&fields)
        .map_err(|err| ToolError::internal(format!("Failed to encode form body: {}", err)))
}

#[async_trait::async_trait]
impl ToolHandler for HotspotsManager {
    fn tools(&self) -> &'static [&'static str] {
        HOTSPOT_TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        match tool {
            "search_hotspots" => to_result(&self.search(parse_args(tool, args)?).await?),
            "show_hotspot" => to_result(&self.show(parse_args(tool, args)?).await?),
            "change_hotspot_status" => {
                to_result(&self.change_status(parse_args(tool, args)?).await?)
            }
            _ => Err(unknown_tool_error(tool, HOTSPOT_TOOLS)),
        }
    }
}
