//! # Opbridge Client
//!
//! Resilient client for the OpenProject v3 HAL+JSON API.
//!
//! This crate contains:
//! - HTTP transport with retry/backoff ([`http`])
//! - Reference-data caching with a fixed TTL ([`cache`])
//! - Query filter encoding and hypermedia helpers ([`filters`], [`hal`])
//! - Configuration loading ([`config`])
//! - The [`OpenProjectClient`] operation catalogue ([`api`])
//!
//! ## Architecture
//! - Depends on `opbridge-domain` for error types and request models
//! - One [`OpenProjectClient`] per process, shared across concurrent
//!   operations; no ambient singleton
//! - All failures surface as `opbridge_domain::Error`, never panics

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod filters;
pub mod hal;
pub mod http;

// Re-export commonly used items
pub use api::OpenProjectClient;
pub use cache::ReferenceCache;
pub use filters::{Filter, FilterSet};
pub use http::{HttpClient, HttpClientBuilder, RetryPolicy};
