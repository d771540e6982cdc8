use crate::errors::ToolError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes tool arguments into `T`; `null` reads as `{}`.
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|err| ToolError::invalid_params(format!("Invalid arguments for {}: {}", tool, err)))
}

pub fn to_result<T: serde::Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value)
        .map_err(|err| ToolError::internal(format!("Failed to serialize result: {}", err)))
}
