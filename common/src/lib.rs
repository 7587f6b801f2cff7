pub mod build_paths;
pub mod config;
pub mod yaml_include;

/// Common utilities shared across the order flattening workspace
///
/// This crate provides shared functionality that can be used by both the
/// generic `processing` engine and the `ecom` order domain, including:
///
/// - The YAML configuration model and its defaults
/// - `!include` resolution used when assembling configuration at build time
/// - Locating the profile directory that receives the assembled configuration
/// - Order event fixtures and scratch workspaces for tests

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export commonly used test utilities for easier access
#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{OrderEventBuilder, TestWorkspace, orders_document};
