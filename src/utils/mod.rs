pub mod args;
pub mod query;
pub mod suggest;
pub mod tool_errors;
