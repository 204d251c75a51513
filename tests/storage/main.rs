//! Integration tests for Layer 1: Storage
//!
//! Tests component pools, collections, and system validation.

mod pools;
