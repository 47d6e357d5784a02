//! Tool argument types
//!
//! Raw JSON arguments are decoded exactly once, at the dispatcher edge, into
//! a [`ToolCall`]. Handlers only ever see validated values.

use rmcp::schemars;
use serde_json::{Map, Value};

use super::errors::ToolError;

pub type JsonObject = Map<String, Value>;

pub const SEARCH_TOOL: &str = "kagi_search_fetch";
pub const FASTGPT_TOOL: &str = "kagi_fastgpt";

const NO_QUERIES: &str = "Search called with no queries.";
const NO_FASTGPT_QUERY: &str = "FastGPT called without a query.";

// Wire shape of the search tool arguments
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
#[schemars(description = "Search queries to run; results from all of them are numbered together.")]
pub struct SearchParams {
    #[schemars(
        description = "One or more concise, keyword-focused search queries. Include essential context within each query for standalone use."
    )]
    pub queries: Vec<String>,
}

// Wire shape of the FastGPT tool arguments
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
#[schemars(description = "Question to answer with a web-grounded summary.")]
pub struct FastGptParams {
    #[schemars(description = "A question or topic to get a summarized, referenced answer for")]
    pub query: String,
    #[serde(default = "default_cache")]
    #[schemars(description = "Whether Kagi may serve a cached answer (default true)")]
    pub cache: bool,
}

fn default_cache() -> bool {
    true
}

/// Registered tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Search,
    FastGpt,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Search, ToolKind::FastGpt];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            SEARCH_TOOL => Some(ToolKind::Search),
            FASTGPT_TOOL => Some(ToolKind::FastGpt),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Search => SEARCH_TOOL,
            ToolKind::FastGpt => FASTGPT_TOOL,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::Search => {
                "Perform web search based on one or more queries. Results are from all queries given. They are numbered continuously, so that a user may be able to refer to a result by a specific number."
            }
            ToolKind::FastGpt => {
                "Answer a question using Kagi FastGPT: a concise summary grounded in live web search results, followed by a numbered list of references."
            }
        }
    }

    /// Text returned when the tool is invoked while turned off
    pub fn disabled_message(self) -> &'static str {
        match self {
            ToolKind::Search => "Search functionality is disabled.",
            ToolKind::FastGpt => "FastGPT functionality is disabled.",
        }
    }

    /// JSON Schema of the tool arguments
    pub fn input_schema(self) -> JsonObject {
        let schema = match self {
            ToolKind::Search => schemars::schema_for!(SearchParams),
            ToolKind::FastGpt => schemars::schema_for!(FastGptParams),
        };

        // The Rust type name is meaningless to the host
        match serde_json::to_value(schema) {
            Ok(Value::Object(mut map)) => {
                map.remove("title");
                map
            }
            _ => JsonObject::new(),
        }
    }
}

/// Validated search arguments: at least one non-blank query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    queries: Vec<String>,
}

impl SearchArgs {
    pub fn new(queries: Vec<String>) -> Result<Self, ToolError> {
        if queries.is_empty() {
            return Err(ToolError::validation(NO_QUERIES));
        }

        if let Some(position) = queries.iter().position(|q| q.trim().is_empty()) {
            return Err(ToolError::validation(format!(
                "Search query #{} is empty.",
                position + 1
            )));
        }

        Ok(Self { queries })
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }
}

/// Validated FastGPT arguments
#[derive(Debug, Clone, PartialEq)]
pub struct FastGptArgs {
    query: String,
    cache: bool,
}

impl FastGptArgs {
    pub fn new(query: impl Into<String>, cache: bool) -> Result<Self, ToolError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ToolError::validation(NO_FASTGPT_QUERY));
        }
        Ok(Self { query, cache })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cache(&self) -> bool {
        self.cache
    }
}

/// A decoded tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Search(SearchArgs),
    FastGpt(FastGptArgs),
}

impl ToolCall {
    /// Decode raw arguments for `kind`
    pub fn decode(kind: ToolKind, arguments: Option<JsonObject>) -> Result<Self, ToolError> {
        let arguments = arguments.unwrap_or_default();

        match kind {
            ToolKind::Search => {
                if is_absent(&arguments, "queries") {
                    return Err(ToolError::validation(NO_QUERIES));
                }
                let params: SearchParams = serde_json::from_value(Value::Object(arguments))
                    .map_err(|e| ToolError::validation(format!("Invalid search arguments: {}", e)))?;
                Ok(ToolCall::Search(SearchArgs::new(params.queries)?))
            }
            ToolKind::FastGpt => {
                if is_absent(&arguments, "query") {
                    return Err(ToolError::validation(NO_FASTGPT_QUERY));
                }
                let params: FastGptParams = serde_json::from_value(Value::Object(arguments))
                    .map_err(|e| ToolError::validation(format!("Invalid FastGPT arguments: {}", e)))?;
                Ok(ToolCall::FastGpt(FastGptArgs::new(params.query, params.cache)?))
            }
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::Search(_) => ToolKind::Search,
            ToolCall::FastGpt(_) => ToolKind::FastGpt,
        }
    }
}

fn is_absent(arguments: &JsonObject, key: &str) -> bool {
    matches!(arguments.get(key), None | Some(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Option<JsonObject> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[test]
    fn test_decode_search() {
        let call = ToolCall::decode(ToolKind::Search, args(json!({"queries": ["a", "b"]}))).unwrap();
        match call {
            ToolCall::Search(search) => assert_eq!(search.queries(), ["a", "b"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_queries_fail_validation() {
        for raw in [None, args(json!({})), args(json!({"queries": null})), args(json!({"queries": []}))] {
            let err = ToolCall::decode(ToolKind::Search, raw).unwrap_err();
            assert!(matches!(err, ToolError::Validation(_)));
            assert_eq!(err.to_string(), "Search called with no queries.");
        }

        assert!(SearchArgs::new(vec![]).is_err());
    }

    #[test]
    fn test_blank_query_is_rejected() {
        let err = SearchArgs::new(vec!["ok".to_string(), "  ".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "Search query #2 is empty.");
    }

    #[test]
    fn test_wrong_queries_type_is_rejected() {
        let err = ToolCall::decode(ToolKind::Search, args(json!({"queries": "just one"}))).unwrap_err();
        assert!(err.to_string().starts_with("Invalid search arguments"));
    }

    #[test]
    fn test_decode_fastgpt_defaults_cache_to_true() {
        let call = ToolCall::decode(ToolKind::FastGpt, args(json!({"query": "why"}))).unwrap();
        assert_eq!(call, ToolCall::FastGpt(FastGptArgs::new("why", true).unwrap()));

        let call = ToolCall::decode(ToolKind::FastGpt, args(json!({"query": "why", "cache": false}))).unwrap();
        assert_eq!(call, ToolCall::FastGpt(FastGptArgs::new("why", false).unwrap()));
    }

    #[test]
    fn test_fastgpt_requires_query() {
        for raw in [None, args(json!({"query": ""})), args(json!({"cache": true}))] {
            let err = ToolCall::decode(ToolKind::FastGpt, raw).unwrap_err();
            assert_eq!(err.to_string(), "FastGPT called without a query.");
        }
    }

    #[test]
    fn test_tool_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("Search"), None);
    }

    #[test]
    fn test_search_schema_requires_queries() {
        let schema = ToolKind::Search.input_schema();
        assert_eq!(schema["properties"]["queries"]["type"], "array");
        assert_eq!(schema["properties"]["queries"]["items"]["type"], "string");
        assert_eq!(schema["required"], json!(["queries"]));
    }

    #[test]
    fn test_schema_text_is_for_the_caller() {
        for kind in ToolKind::ALL {
            let schema = kind.input_schema();
            assert!(schema.get("title").is_none());

            let description = schema["description"].as_str().unwrap();
            assert!(!description.contains("Schema and wire shape"));
            assert!(!description.contains("Params"));
        }

        let search = ToolKind::Search.input_schema();
        assert!(search["description"].as_str().unwrap().contains("numbered together"));
    }

    #[test]
    fn test_fastgpt_schema_cache_is_optional() {
        let schema = ToolKind::FastGpt.input_schema();
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(schema["properties"]["cache"]["type"], "boolean");
        assert_eq!(schema["required"], json!(["query"]));
    }
}
