//! Application services - Business logic orchestration

pub mod bootstrap;

pub use bootstrap::{Bootstrap, StartedBot};
