use crate::constants::{env, network};
use crate::errors::ConfigError;
use url::Url;

/// Connection settings for one SonarCloud call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SonarConfig {
    pub token: String,
    pub organization: Option<String>,
    pub base_url: String,
}

impl SonarConfig {
    pub fn new(
        token: impl Into<String>,
        organization: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            organization: organization.and_then(non_empty),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(env::TOKEN)
            .and_then(non_empty)
            .ok_or(ConfigError::MissingToken)?;
        let organization = lookup(env::ORGANIZATION).and_then(non_empty);
        let base_url = lookup(env::BASE_URL)
            .and_then(non_empty)
            .unwrap_or_else(|| network::DEFAULT_BASE_URL.to_string());
        if Url::parse(&base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl { value: base_url });
        }
        Ok(Self {
            token,
            organization,
            base_url,
        })
    }

    pub fn require_organization(&self, action: &str) -> Result<&str, ConfigError> {
        self.organization
            .as_deref()
            .ok_or_else(|| ConfigError::MissingOrganization {
                action: action.to_string(),
            })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone)]
enum ConfigSource {
    Env,
    Fixed(SonarConfig),
}

/// Hands every tool call its configuration: freshly read from the
/// environment, or a value resolved once by the embedding caller.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    source: ConfigSource,
}

impl ConfigResolver {
    pub fn from_env() -> Self {
        Self {
            source: ConfigSource::Env,
        }
    }

    pub fn fixed(config: SonarConfig) -> Self {
        Self {
            source: ConfigSource::Fixed(config),
        }
    }

    pub fn resolve(&self) -> Result<SonarConfig, ConfigError> {
        match &self.source {
            ConfigSource::Env => SonarConfig::from_env(),
            ConfigSource::Fixed(config) => Ok(config.clone()),
        }
    }

    /// Like `resolve`, but fails unless an organization is configured.
    pub fn require_organization(&self, action: &str) -> Result<SonarConfig, ConfigError> {
        let config = self.resolve()?;
        config.require_organization(action)?;
        Ok(config)
    }
}
