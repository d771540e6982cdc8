use crate::errors::ToolError;

/// Checks a required identifier and returns it unchanged.
pub fn ensure_identifier<'a>(value: &'a str, label: &str) -> Result<&'a str, ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_params(format!(
            "{} must be a non-empty string",
            label
        )));
    }
    if value.contains('\0') {
        return Err(ToolError::invalid_params(format!(
            "{} must not contain null bytes",
            label
        )));
    }
    Ok(value)
}

/// Fails unless at least one of the named optional identifiers is set.
pub fn ensure_any_identifier(fields: &[(&str, Option<&str>)]) -> Result<(), ToolError> {
    let present = fields
        .iter()
        .any(|(_, value)| value.map(|v| !v.trim().is_empty()).unwrap_or(false));
    if present {
        return Ok(());
    }
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    let message = match names.as_slice() {
        [a, b] => format!("Either {} or {} must be provided", a, b),
        _ => format!("At least one of {} must be provided", names.join(", ")),
    };
    Err(ToolError::invalid_params(message))
}

pub fn ensure_page_size(value: u32, label: &str, max: u32) -> Result<u32, ToolError> {
    if value == 0 || value > max {
        return Err(ToolError::invalid_params(format!(
            "{} must be between 1 and {}",
            label, max
        )));
    }
    Ok(value)
}

pub fn ensure_page(value: u32, label: &str) -> Result<u32, ToolError> {
    if value == 0 {
        return Err(ToolError::invalid_params(format!(
            "{} is 1-indexed and must be at least 1",
            label
        )));
    }
    Ok(value)
}
