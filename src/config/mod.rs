//! Configuration module for courtsprite
//!
//! Provides types and parsing for `courtsprite.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
