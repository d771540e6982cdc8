pub mod config;
pub mod sonar_client;
pub mod tool_executor;
pub mod validation;
