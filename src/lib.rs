//! Schemy Library
//!
//! Downloads the schema of an Airtable base through the metadata API and
//! renders it as formatted JSON.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use domain::config::SchemyConfig;
pub use domain::error::{SchemyError, SchemyResult};
pub use domain::schema::{BaseId, Field, Schema, Table};
pub use infrastructure::airtable::{AirtableClient, SchemaSource};
