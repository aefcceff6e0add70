// Domain module - Schema types, configuration and errors
pub mod config;
pub mod error;
pub mod schema;
