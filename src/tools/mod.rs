//! MCP tools exposed by the server

pub mod dispatcher;
pub mod errors;
pub mod params;
pub mod server;

pub use dispatcher::{ToolDispatcher, ToolSpec};
pub use errors::{ERROR_PREFIX, ToolError, error_text, into_response_text};
pub use params::{FASTGPT_TOOL, SEARCH_TOOL, ToolCall, ToolKind};
pub use server::KagiServer;
