//! Kagi API integration
//!
//! The [`KagiBackend`] trait is the seam between the tool layer and the
//! network. [`KagiClient`] implements it over HTTP; tests substitute their
//! own implementations.

pub mod client;
pub mod error;
pub mod types;

pub use client::{KagiClient, KagiClientConfig};
pub use error::KagiError;
pub use types::{
    FastGptAnswer, OrganicResult, QueryResultSet, Reference, SearchItem, SearchResponse,
};

use async_trait::async_trait;

/// Upstream search and summarization calls
///
/// Implementations must be Send + Sync so a single instance can serve
/// concurrent fan-out tasks.
#[async_trait]
pub trait KagiBackend: Send + Sync {
    /// Run one web search
    async fn search(&self, query: &str) -> Result<SearchResponse, KagiError>;

    /// Ask FastGPT for a summarized answer
    async fn fastgpt(&self, query: &str, cache: bool) -> Result<FastGptAnswer, KagiError>;
}
