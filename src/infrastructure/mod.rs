//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: YAML configuration loading
//! - Plugins: Module catalog and registry
//! - Adapters: Forum session and notification delivery implementations
//! - Random: Random sources for the random meta-command

pub mod adapters;
pub mod config;
pub mod plugins;
pub mod random;
