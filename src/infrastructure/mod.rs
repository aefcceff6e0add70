// Infrastructure module - External dependencies and adapters
pub mod airtable;
pub mod config;
pub mod logging;
