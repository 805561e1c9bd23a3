//! Data models shared across the workspace.

pub mod config;
