//! Folio Kernel Library
//!
//! Content API: node and blog CRUD resources over a pluggable store, with
//! token-based actor resolution. The `folio` binary serves it over HTTP.

pub mod actor;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod state;
