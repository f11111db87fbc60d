//! HTTP interface
//!
//! Thin actix-web handlers over [`crate::services::MappingStore`].

pub mod services;

pub use services::{AppStartTime, health_routes, shortener_routes};
