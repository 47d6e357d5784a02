//! Text rendering of Kagi results for LLM and human consumption

pub mod references;
pub mod search_results;

pub use references::format_fastgpt_response;
pub use search_results::format_search_results;
