pub mod network {
    pub const DEFAULT_BASE_URL: &str = "https://sonarcloud.io";
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
    pub const USER_AGENT: &str = concat!("sonarcloud-mcp/", env!("CARGO_PKG_VERSION"));
}

pub mod env {
    pub const TOKEN: &str = "SONARCLOUD_TOKEN";
    pub const ORGANIZATION: &str = "SONARCLOUD_ORGANIZATION";
    pub const BASE_URL: &str = "SONARCLOUD_URL";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

pub mod pagination {
    pub const DEFAULT_PAGE_INDEX: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 100;
    pub const DEFAULT_TOTAL: u64 = 0;
}

pub mod endpoints {
    pub const COMPONENTS_SEARCH: &str = "/api/components/search";
    pub const COMPONENTS_SHOW: &str = "/api/components/show";
    pub const COMPONENTS_TREE: &str = "/api/components/tree";
    pub const ISSUES_SEARCH: &str = "/api/issues/search";
    pub const ISSUES_AUTHORS: &str = "/api/issues/authors";
    pub const ISSUES_CHANGELOG: &str = "/api/issues/changelog";
    pub const ISSUES_TAGS: &str = "/api/issues/tags";
    pub const QUALITYGATES_PROJECT_STATUS: &str = "/api/qualitygates/project_status";
    pub const QUALITYGATES_LIST: &str = "/api/qualitygates/list";
    pub const QUALITYGATES_SHOW: &str = "/api/qualitygates/show";
    pub const QUALITYGATES_SEARCH: &str = "/api/qualitygates/search";
    pub const QUALITYGATES_GET_BY_PROJECT: &str = "/api/qualitygates/get_by_project";
    pub const HOTSPOTS_SEARCH: &str = "/api/hotspots/search";
    pub const HOTSPOTS_SHOW: &str = "/api/hotspots/show";
    pub const HOTSPOTS_CHANGE_STATUS: &str = "/api/hotspots/change_status";
}

pub mod qualifiers {
    pub const PROJECT: &str = "TRK";
}
