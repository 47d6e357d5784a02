//! Tool dispatcher
//!
//! Discovery and invocation surface, independent of the MCP transport.
//!
//! ```text
//! invoke(name, arguments)
//!     ├─ unknown name        → "Error: Unknown tool: <name>"
//!     ├─ tool disabled       → "<Tool> functionality is disabled."
//!     ├─ decode → ToolCall   → "Error: <validation message>"
//!     └─ run
//!         ├─ Search   → FanOutExecutor → format_search_results
//!         └─ FastGpt  → KagiBackend::fastgpt → format_fastgpt_response
//! ```
//!
//! [`ToolDispatcher::invoke`] always returns text. Failures are rendered by
//! [`into_response_text`] and nowhere else.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::errors::{ToolError, into_response_text};
use super::params::{FastGptArgs, JsonObject, SearchArgs, ToolCall, ToolKind};
use crate::config::{Config, FeatureFlags};
use crate::format::{format_fastgpt_response, format_search_results};
use crate::kagi::KagiBackend;
use crate::search::FanOutExecutor;

/// A tool as advertised to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: JsonObject,
}

impl From<ToolKind> for ToolSpec {
    fn from(kind: ToolKind) -> Self {
        Self {
            name: kind.name(),
            description: kind.description(),
            input_schema: kind.input_schema(),
        }
    }
}

pub struct ToolDispatcher {
    features: FeatureFlags,
    backend: Arc<dyn KagiBackend>,
    executor: FanOutExecutor,
}

impl ToolDispatcher {
    pub fn new(config: &Config, backend: Arc<dyn KagiBackend>) -> Self {
        let executor = FanOutExecutor::new(
            Arc::clone(&backend),
            config.search_timeout,
            config.concurrency_limit(),
        );

        Self {
            features: config.features,
            backend,
            executor,
        }
    }

    pub fn is_enabled(&self, kind: ToolKind) -> bool {
        match kind {
            ToolKind::Search => self.features.search,
            ToolKind::FastGpt => self.features.fastgpt,
        }
    }

    /// Enabled tools, in registration order
    pub fn list_tools(&self) -> Vec<ToolSpec> {
        let tools: Vec<ToolSpec> = ToolKind::ALL
            .into_iter()
            .filter(|&kind| self.is_enabled(kind))
            .map(ToolSpec::from)
            .collect();

        info!(
            "Available tools: {:?}",
            tools.iter().map(|t| t.name).collect::<Vec<_>>()
        );
        tools
    }

    /// Invoke a tool by name; never fails
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> String {
        info!("Tool called: {}", name);
        debug!("Arguments: {:?}", arguments);

        let result = match ToolKind::from_name(name) {
            None => Err(ToolError::UnknownTool(name.to_string())),
            Some(kind) if !self.is_enabled(kind) => {
                warn!("Tool {} invoked while disabled", name);
                Ok(kind.disabled_message().to_string())
            }
            Some(kind) => match ToolCall::decode(kind, arguments) {
                Ok(call) => self.run(call).await,
                Err(e) => Err(e),
            },
        };

        if let Err(e) = &result {
            warn!("Tool {} failed: {}", name, e);
        }

        into_response_text(result)
    }

    /// Run an already-decoded call
    pub async fn run(&self, call: ToolCall) -> Result<String, ToolError> {
        debug!("Running {}", call.kind().name());
        match call {
            ToolCall::Search(args) => self.search(&args).await,
            ToolCall::FastGpt(args) => self.fastgpt(&args).await,
        }
    }

    async fn search(&self, args: &SearchArgs) -> Result<String, ToolError> {
        let queries = args.queries();
        let results = self.executor.execute(queries).await?;
        ensure_aligned(queries.len(), results.len())?;

        info!("Search completed for {} queries", queries.len());
        Ok(format_search_results(queries, &results))
    }

    async fn fastgpt(&self, args: &FastGptArgs) -> Result<String, ToolError> {
        let answer = self.backend.fastgpt(args.query(), args.cache()).await?;
        info!(
            "FastGPT answered with {} references",
            answer.references.len()
        );
        Ok(format_fastgpt_response(&answer))
    }
}

/// One result set per query, or the upstream broke its contract
fn ensure_aligned(expected: usize, actual: usize) -> Result<(), ToolError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ToolError::ResultCountMismatch { expected, actual })
    }
}
