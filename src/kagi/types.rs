//! Wire types for the Kagi Search and FastGPT APIs

use serde::{Deserialize, Serialize};

/// Kagi response envelope: `{"meta": {...}, "data": ...}`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub meta: Option<Meta>,
    pub data: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub ms: Option<u64>,
    #[serde(default)]
    pub api_balance: Option<f64>,
}

/// Error body: `{"meta": {...}, "error": [{"code": 1, "msg": "..."}]}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: String,
}

impl ErrorEnvelope {
    /// Join all error messages, or `None` if the body carried none
    pub fn message(&self) -> Option<String> {
        let msgs: Vec<&str> = self
            .error
            .iter()
            .map(|e| e.msg.as_str())
            .filter(|m| !m.is_empty())
            .collect();

        if msgs.is_empty() {
            None
        } else {
            Some(msgs.join("; "))
        }
    }
}

/// Search response for a single query
pub type SearchResponse = Envelope<QueryResultSet>;

/// Items returned for one query, in upstream order
pub type QueryResultSet = Vec<SearchItem>;

/// One entry of a search response
///
/// Kagi tags entries with `t`: 0 is an organic hit, 1 is a block of
/// related searches. Any other tag is kept as `Other` and never rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSearchItem")]
pub enum SearchItem {
    Organic(OrganicResult),
    Related(Vec<String>),
    Other(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub published: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSearchItem {
    t: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    list: Vec<String>,
}

impl TryFrom<RawSearchItem> for SearchItem {
    type Error = String;

    fn try_from(raw: RawSearchItem) -> Result<Self, Self::Error> {
        match raw.t {
            0 => {
                let title = raw
                    .title
                    .ok_or_else(|| "search result without title".to_string())?;
                let url = raw
                    .url
                    .ok_or_else(|| "search result without url".to_string())?;
                Ok(SearchItem::Organic(OrganicResult {
                    title,
                    url,
                    snippet: raw.snippet.unwrap_or_default(),
                    published: raw.published,
                }))
            }
            1 => Ok(SearchItem::Related(raw.list)),
            other => Ok(SearchItem::Other(other)),
        }
    }
}

impl SearchItem {
    pub fn organic(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        published: Option<&str>,
    ) -> Self {
        SearchItem::Organic(OrganicResult {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            published: published.map(str::to_string),
        })
    }

    pub fn as_organic(&self) -> Option<&OrganicResult> {
        match self {
            SearchItem::Organic(result) => Some(result),
            SearchItem::Related(_) | SearchItem::Other(_) => None,
        }
    }
}

/// Request body for `POST /fastgpt`
#[derive(Debug, Clone, Serialize)]
pub struct FastGptRequest<'a> {
    pub query: &'a str,
    pub cache: bool,
    pub web_search: bool,
}

/// FastGPT answer with its citations
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FastGptAnswer {
    pub output: String,
    #[serde(default)]
    pub tokens: Option<u64>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl Reference {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_search_response() {
        let body = serde_json::json!({
            "meta": {"id": "abc", "node": "us-east", "ms": 120},
            "data": [
                {"t": 0, "rank": 1, "url": "https://a.example", "title": "A",
                 "snippet": "first", "published": "2024-01-02T00:00:00Z"},
                {"t": 1, "list": ["a b", "a c"]},
                {"t": 0, "url": "https://b.example", "title": "B"}
            ]
        });

        let response: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.data.len(), 3);
        assert_eq!(
            response.data[0],
            SearchItem::organic("A", "https://a.example", "first", Some("2024-01-02T00:00:00Z"))
        );
        assert_eq!(
            response.data[1],
            SearchItem::Related(vec!["a b".to_string(), "a c".to_string()])
        );
        let b = response.data[2].as_organic().unwrap();
        assert_eq!(b.snippet, "");
        assert!(b.published.is_none());
    }

    #[test]
    fn test_unknown_item_type_is_kept_as_other() {
        let body = serde_json::json!({"data": [
            {"t": 0, "title": "A", "url": "https://a"},
            {"t": 2, "foo": 1},
            {"t": 0, "title": "B", "url": "https://b"}
        ]});

        let response: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.data.len(), 3);
        assert_eq!(response.data[1], SearchItem::Other(2));
        assert!(response.data[1].as_organic().is_none());
    }

    #[test]
    fn test_organic_without_url_is_rejected() {
        let body = serde_json::json!({"data": [{"t": 0, "title": "no url"}]});
        let err = serde_json::from_value::<SearchResponse>(body).unwrap_err();
        assert!(err.to_string().starts_with("search result without url"));
    }

    #[test]
    fn test_decode_fastgpt_answer() {
        let body = serde_json::json!({
            "meta": {"id": "x"},
            "data": {
                "output": "Answer [1]",
                "tokens": 42,
                "references": [{"title": "T", "snippet": "s", "url": "https://t.example"}]
            }
        });

        let answer: Envelope<FastGptAnswer> = serde_json::from_value(body).unwrap();
        assert_eq!(answer.data.output, "Answer [1]");
        assert_eq!(answer.data.tokens, Some(42));
        assert_eq!(answer.data.references[0].url, "https://t.example");
    }

    #[test]
    fn test_error_envelope_message() {
        let body = serde_json::json!({
            "error": [{"code": 1, "msg": "Unauthorized"}, {"code": 2, "msg": "Insufficient credit"}]
        });
        let envelope: ErrorEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(
            envelope.message().as_deref(),
            Some("Unauthorized; Insufficient credit")
        );

        let empty: ErrorEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.message().is_none());
    }
}
