//! HTTP middleware components.

pub mod actor;

pub use actor::resolve_actor;
