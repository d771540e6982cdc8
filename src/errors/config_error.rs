use crate::constants::env;
use crate::errors::ToolError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} environment variable is required", var = env::TOKEN)]
    MissingToken,
    #[error("{action} requires {var} to be set in the environment.", var = env::ORGANIZATION)]
    MissingOrganization { action: String },
    #[error("{var} is not a valid URL: {value}", var = env::BASE_URL)]
    InvalidBaseUrl { value: String },
}

impl From<ConfigError> for ToolError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::MissingToken => {
                format!("Export {} with a SonarCloud user token.", env::TOKEN)
            }
            ConfigError::MissingOrganization { .. } => format!(
                "Export {} with the organization key shown in SonarCloud.",
                env::ORGANIZATION
            ),
            ConfigError::InvalidBaseUrl { .. } => {
                format!("Unset {} to use the public endpoint.", env::BASE_URL)
            }
        };
        ToolError::configuration(err.to_string()).with_hint(hint)
    }
}
