//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, JSON file on native)
//! - Presentation (DOM labels and Web Audio on web)
//! - Entry points and logging setup

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Session seed: the configured one, otherwise fresh entropy
pub fn session_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(rand::random)
}
