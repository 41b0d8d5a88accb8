//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Chat and history handlers.
pub mod chat;
/// Document upload and ingestion handlers.
pub mod documents;
/// Health check handler.
pub mod health;
