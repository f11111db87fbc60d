//! Service layer for business logic
//!
//! This module provides the short-code allocation and resolution logic
//! shared by the HTTP handlers and the CLI.

mod freshness;
mod identifier;
mod mapping_store;

pub use freshness::Freshness;
pub use identifier::{IdentifierGenerator, RandomSource, ThreadRngSource};
pub use mapping_store::{CODE_TAKEN_MESSAGE, DEFAULT_LIFETIME, MappingStore, Resolution};
