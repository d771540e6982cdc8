use crate::constants::network as network_constants;
use crate::errors::ToolError;
use crate::services::config::SonarConfig;
use crate::utils::query::QueryParams;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    fn as_reqwest(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// The single place where SonarCloud is called over HTTP.
#[derive(Clone)]
pub struct SonarClient {
    http: Client,
}

impl SonarClient {
    pub fn new() -> Result<Self, ToolError> {
        Self::with_timeout(Duration::from_millis(
            network_constants::TIMEOUT_API_REQUEST_MS,
        ))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ToolError> {
        let http = Client::builder()
            .user_agent(network_constants::USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| ToolError::internal(format!("Failed to build HTTP client: {}", err)))?;
        Ok(Self { http })
    }

    pub async fn get(
        &self,
        endpoint: &str,
        query: QueryParams,
        config: &SonarConfig,
    ) -> Result<Value, ToolError> {
        self.execute(endpoint, query, HttpMethod::Get, None, config)
            .await
    }

    /// Performs one request and returns the parsed JSON body.
    ///
    /// The configured organization is added as a default `organization`
    /// query parameter. A 2xx response with an empty body yields `{}`.
    pub async fn execute(
        &self,
        endpoint: &str,
        mut query: QueryParams,
        method: HttpMethod,
        body: Option<String>,
        config: &SonarConfig,
    ) -> Result<Value, ToolError> {
        if let Some(org) = config.organization.as_deref() {
            query.set_default("organization", org);
        }
        let url = build_url(&config.base_url, endpoint, &query)?;
        let headers = build_headers(&config.token, body.is_some())?;

        let mut req = self
            .http
            .request(method.as_reqwest(), url.clone())
            .headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        tracing::debug!(method = ?method, endpoint, "sonarcloud request");
        let started = Instant::now();
        let response = req.send().await.map_err(ToolError::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ToolError::from)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).to_string();
            tracing::warn!(
                endpoint,
                status = status.as_u16(),
                elapsed_ms,
                "sonarcloud request failed"
            );
            return Err(ToolError::upstream(status.as_u16(), text)
                .with_details(serde_json::json!({ "endpoint": endpoint, "url": url.as_str() })));
        }

        tracing::debug!(
            endpoint,
            status = status.as_u16(),
            bytes = bytes.len(),
            elapsed_ms,
            "sonarcloud response"
        );

        if bytes.is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_slice(&bytes).map_err(|err| {
            ToolError::internal(format!(
                "SonarCloud returned a non-JSON body for {}: {}",
                endpoint, err
            ))
        })
    }
}

fn build_url(base_url: &str, endpoint: &str, query: &QueryParams) -> Result<Url, ToolError> {
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    let mut url = Url::parse(&raw)
        .map_err(|_| ToolError::configuration(format!("Invalid SonarCloud URL: {}", raw)))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query.pairs() {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

fn build_headers(token: &str, has_body: bool) -> Result<HeaderMap, ToolError> {
    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ToolError::configuration("SONARCLOUD_TOKEN contains invalid characters"))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    if has_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_endpoint_without_double_slash() {
        let mut query = QueryParams::new();
        query.push("p", 1).push("organization", "acme");
        let url = build_url("https://sonarcloud.io/", "/api/components/search", &query)
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://sonarcloud.io/api/components/search?p=1&organization=acme"
        );
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let url = build_url(
            "https://sonar.example.com/sonarqube",
            "/api/issues/tags",
            &QueryParams::new(),
        )
        .expect("url");
        assert_eq!(url.as_str(), "https://sonar.example.com/sonarqube/api/issues/tags");
    }

    #[test]
    fn headers_carry_bearer_token_and_form_type() {
        let headers = build_headers("secret", true).expect("headers");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);

        let headers = build_headers("secret", false).expect("headers");
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn default_client_uses_thirty_second_timeout() {
        assert_eq!(
            Duration::from_millis(network_constants::TIMEOUT_API_REQUEST_MS),
            Duration::from_secs(30)
        );
        assert!(SonarClient::new().is_ok());
    }
}
