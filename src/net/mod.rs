//! HTTP plumbing for the dish endpoints.

pub mod api;
pub mod types;
