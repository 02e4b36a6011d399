//! HTTP layer: configuration injection, shared-secret auth, feed
//! loading, and the filtered-calendar endpoint.

pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod middleware;
