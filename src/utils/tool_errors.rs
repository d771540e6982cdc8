use crate::errors::ToolError;
use crate::utils::suggest::suggest;

pub fn unknown_tool_error(tool: &str, known_tools: &[&str]) -> ToolError {
    let suggestions = suggest(tool, known_tools, 3);
    let mut err = ToolError::invalid_params(format!("Unknown tool: {}", tool));
    if !suggestions.is_empty() {
        err = err.with_hint(format!("Did you mean: {}?", suggestions.join(", ")));
    }
    err.with_details(serde_json::json!({
        "known_tools": known_tools,
        "did_you_mean": suggestions,
    }))
}
