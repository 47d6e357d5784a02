//! Concurrent fan-out of search queries
//!
//! Every query gets its own upstream call on a [`JoinSet`] that lives only
//! for the duration of [`FanOutExecutor::execute`]. Results are written into
//! one slot per input index, so completion order never leaks into the output.
//!
//! There is no partial success: the first failure or timeout aborts the
//! remaining calls and fails the whole operation.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::kagi::{KagiBackend, QueryResultSet};
use crate::tools::ToolError;

pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs one upstream search per query and reassembles results in order
#[derive(Clone)]
pub struct FanOutExecutor {
    backend: Arc<dyn KagiBackend>,
    timeout: Duration,
    /// `None` runs every query at once
    max_concurrency: Option<usize>,
}

impl FanOutExecutor {
    pub fn new(
        backend: Arc<dyn KagiBackend>,
        timeout: Duration,
        max_concurrency: Option<usize>,
    ) -> Self {
        Self {
            backend,
            timeout,
            max_concurrency: max_concurrency.filter(|&n| n > 0),
        }
    }

    /// Create with the default 10 second per-call timeout and no cap
    pub fn with_defaults(backend: Arc<dyn KagiBackend>) -> Self {
        Self::new(backend, DEFAULT_SEARCH_TIMEOUT, None)
    }

    /// Search every query concurrently
    ///
    /// Element `i` of the result belongs to `queries[i]`.
    pub async fn execute(&self, queries: &[String]) -> Result<Vec<QueryResultSet>, ToolError> {
        let permits = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let mut tasks = JoinSet::new();

        for (index, query) in queries.iter().enumerate() {
            let backend = Arc::clone(&self.backend);
            let permits = permits.clone();
            let query = query.clone();
            let timeout = self.timeout;

            tasks.spawn(async move {
                let _permit = match permits {
                    Some(semaphore) => Some(
                        semaphore
                            .acquire_owned()
                            .await
                            .map_err(|e| ToolError::internal(e.to_string()))?,
                    ),
                    None => None,
                };

                let response = tokio::time::timeout(timeout, backend.search(&query))
                    .await
                    .map_err(|_| ToolError::Timeout {
                        query: query.clone(),
                        timeout,
                    })??;

                debug!(
                    "Query #{} \"{}\" returned {} items",
                    index,
                    query,
                    response.data.len()
                );
                Ok::<_, ToolError>((index, response.data))
            });
        }

        let mut slots: Vec<Option<QueryResultSet>> = vec![None; queries.len()];

        while let Some(joined) = tasks.join_next().await {
            let (index, items) = match joined {
                Ok(Ok(done)) => done,
                Ok(Err(e)) => {
                    warn!("Search fan-out failed: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    return Err(ToolError::internal(format!("search task failed: {}", e)));
                }
            };
            slots[index] = Some(items);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| ToolError::internal(format!("no result for query #{}", index)))
            })
            .collect()
    }
}
