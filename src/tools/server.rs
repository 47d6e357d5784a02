//! MCP server handler
//!
//! Thin adapter from MCP `tools/list` and `tools/call` requests to the
//! [`ToolDispatcher`]. Tool errors travel as `Error:` text inside a
//! successful `CallToolResult`; only protocol failures become `McpError`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use std::sync::Arc;

use super::dispatcher::{ToolDispatcher, ToolSpec};

#[derive(Clone)]
pub struct KagiServer {
    dispatcher: Arc<ToolDispatcher>,
}

impl KagiServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Tools in MCP form
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher
            .list_tools()
            .into_iter()
            .map(mcp_tool)
            .collect()
    }
}

fn mcp_tool(spec: ToolSpec) -> Tool {
    Tool::new(spec.name, spec.description, spec.input_schema)
}

impl ServerHandler for KagiServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "This server provides Kagi tools: kagi_search_fetch - web search over one or more queries with continuously numbered results, kagi_fastgpt - a summarized answer with numbered references. Disabled tools are not listed."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let text = self
            .dispatcher
            .invoke(&request.name, request.arguments)
            .await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
