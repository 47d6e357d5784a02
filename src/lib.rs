//! Kagi MCP - Kagi web search and FastGPT exposed as MCP tools
//!
//! Library modules for the MCP server

pub mod config;
pub mod format;
pub mod kagi;
pub mod search;
pub mod tools;
