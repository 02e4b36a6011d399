//! Shared configuration and error types for the calsift feed filter.

pub mod config;
pub mod error;
