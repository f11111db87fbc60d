//! chote - a URL shortener with short-lived links
//!
//! Long URLs are stored under short codes (chosen by the caller or generated)
//! that stay claimed for two minutes. After that a code is reclaimed by the
//! next operation that touches it.
//!
//! # Architecture
//! - `services`: code generation, freshness and the mapping store
//! - `storage`: transactional repositories (SeaORM, in-memory)
//! - `api`: HTTP handlers
//! - `config`: TOML + environment configuration
//! - `runtime`: startup, shutdown and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
