use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::errors::ToolError;
use crate::utils::tool_errors::unknown_tool_error;

use serde_json::Value;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool names this handler answers for.
    fn tools(&self) -> &'static [&'static str];

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

#[derive(Clone, Debug)]
pub(crate) struct ToolCallMeta {
    pub tool: String,
    pub trace_id: String,
    pub started_at: String,
    pub duration_ms: u64,
}

impl ToolCallMeta {
    fn to_value(&self) -> Value {
        serde_json::json!({
            "tool": self.tool,
            "trace_id": self.trace_id,
            "started_at": self.started_at,
            "duration_ms": self.duration_ms,
        })
    }
}

impl ToolExecutor {
    pub fn new(handlers: Vec<Arc<dyn ToolHandler>>) -> Self {
        let mut map: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        for handler in handlers {
            for tool in handler.tools() {
                map.insert(tool.to_string(), handler.clone());
            }
        }
        Self {
            handlers: Arc::new(map),
        }
    }

    pub fn has_tool(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Runs `tool` and wraps its output as `{ "result": .., "meta": .. }`.
    pub async fn execute(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        let Some(handler) = self.handlers.get(tool).cloned() else {
            return Err(unknown_tool_error(tool, &self.tool_names()));
        };

        let trace_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now().to_rfc3339();
        let started = Instant::now();
        let span = tracing::info_span!("tool_call", tool, trace_id = %trace_id);

        let outcome = async {
            tracing::debug!("tool call started");
            handler.handle(tool, args).await
        }
        .instrument(span.clone())
        .await;
        let duration_ms = started.elapsed().as_millis() as u64;
        let _entered = span.enter();

        match outcome {
            Ok(result) => {
                tracing::info!(duration_ms, "tool call finished");
                let meta = ToolCallMeta {
                    tool: tool.to_string(),
                    trace_id,
                    started_at,
                    duration_ms,
                };
                Ok(serde_json::json!({
                    "result": result,
                    "meta": meta.to_value(),
                }))
            }
            Err(err) => {
                tracing::warn!(
                    duration_ms,
                    kind = ?err.kind,
                    code = %err.code,
                    status = err.status,
                    "tool call failed: {}",
                    err.message
                );
                Err(err)
            }
        }
    }
}
