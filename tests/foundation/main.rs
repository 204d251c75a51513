//! Integration tests for Layer 0: Foundation
//!
//! Tests entity identity, error types, and configuration.

mod config;
