//! Integration tests for configuration
//!
//! Tests check-mode defaults, presets, and builder methods.

use aether_foundation::{CheckMode, EcsConfig};

// =============================================================================
// Check Mode
// =============================================================================

#[test]
fn default_mode_follows_build_profile() {
    assert_eq!(CheckMode::default().is_checked(), cfg!(debug_assertions));
}

#[test]
fn mode_predicates() {
    assert!(CheckMode::Checked.is_checked());
    assert!(!CheckMode::Unchecked.is_checked());
}

// =============================================================================
// Presets and Builders
// =============================================================================

#[test]
fn default_config() {
    let config = EcsConfig::default();
    assert_eq!(config.checks, CheckMode::default());
    assert_eq!(config.pool_capacity, 0);
}

#[test]
fn presets() {
    assert!(EcsConfig::checked().is_checked());
    assert!(!EcsConfig::unchecked().is_checked());
    assert_eq!(EcsConfig::checked().pool_capacity, 0);
}

#[test]
fn builder_chain() {
    let config = EcsConfig::checked()
        .with_pool_capacity(256)
        .with_checks(CheckMode::Unchecked);

    assert_eq!(config.checks, CheckMode::Unchecked);
    assert_eq!(config.pool_capacity, 256);
    assert_eq!(config, EcsConfig::unchecked().with_pool_capacity(256));
}
