//! Multi-query search execution

pub mod fanout;

pub use fanout::{DEFAULT_SEARCH_TIMEOUT, FanOutExecutor};
