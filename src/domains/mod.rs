//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools`: the tool-dispatch core and the tool catalog
//! - `resources`: read-only documents describing the server

pub mod resources;
pub mod tools;
