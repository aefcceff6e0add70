// Airtable module - Metadata API access
pub mod client;

pub use client::{AirtableClient, AIRTABLE_API_URL};

use crate::domain::{
    error::SchemyResult,
    schema::{BaseId, Schema},
};
use async_trait::async_trait;

/// Something that can produce the schema of a base.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch the schema of `base_id`, with exactly one remote call.
    async fn get_base_schema(&self, base_id: &BaseId) -> SchemyResult<Schema>;
}
