//! Module system for sockbot
//!
//! Modules are compiled in and registered with a [`ModuleCatalog`]. The
//! [`ModuleRegistry`] turns the catalog into the ordered list of modules that
//! may start, and the operator's configuration decides which of those do.

pub mod catalog;
pub mod registry;

pub use catalog::ModuleCatalog;
pub use registry::{LoadedModule, ModuleRegistry, ALWAYS_ON_MODULE};
