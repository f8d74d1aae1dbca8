//! Glue utilities for a PR-driven automation pipeline: Markdown conversion
//! for review comments and PR bodies, spec URL discovery, ClickUp task
//! fetching with parent-chain resolution, agent manifest listing, and prompt
//! template rendering.

pub mod agents;
pub mod chain;
pub mod cli;
pub mod clickup;
pub mod comments;
pub mod config;
pub mod error;
pub mod report;
pub mod spec_url;
pub mod task;
pub mod template;
