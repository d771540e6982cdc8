use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    InvalidParams,
    Configuration,
    Upstream,
    Transport,
    Timeout,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub retryable: bool,
    /// HTTP status of the upstream response, set for `Upstream` errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Upstream response body, kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
            retryable: matches!(kind, ToolErrorKind::Timeout | ToolErrorKind::Transport),
            status: None,
            body: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidParams, "VALIDATION_ERROR", message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Configuration, "CONFIGURATION_ERROR", message)
    }

    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let mut err = Self::new(
            ToolErrorKind::Upstream,
            "UPSTREAM_HTTP_ERROR",
            format!("SonarCloud API returned HTTP {}", status),
        );
        err.retryable = false;
        err.status = Some(status);
        err.body = Some(body);
        err
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Transport, "TRANSPORT_ERROR", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Timeout, "TIMEOUT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, "INTERNAL", message)
    }

    /// Both plain transport failures and timeouts count as transport errors.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ToolErrorKind::Transport | ToolErrorKind::Timeout)
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.body) {
            (Some(status), Some(body)) if !body.is_empty() => {
                write!(f, "{} (status {}): {}", self.message, status, body)
            }
            _ => write!(f, "{}", self.message),
        }
    }
}

impl Error for ToolError {}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::internal(err.to_string())
    }
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ToolError::timeout("HTTP request timed out");
        }
        ToolError::transport(err.to_string())
    }
}
