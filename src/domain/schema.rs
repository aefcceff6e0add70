//! Airtable base schema types, mirrored from the metadata API.

use crate::domain::error::{SchemyError, SchemyResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Schema of one Airtable base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Tables, in the order the base lists them.
    pub tables: Vec<Table>,
}

/// A table in a base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

/// A field in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Airtable field type, e.g. `singleLineText`.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,
    /// Type-specific options. Passed through untouched.
    #[serde(default, skip_serializing_if = "has_no_options")]
    pub options: Option<Map<String, Value>>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn has_no_options(options: &Option<Map<String, Value>>) -> bool {
    options.as_ref().map_or(true, Map::is_empty)
}

impl Schema {
    pub fn field_count(&self) -> usize {
        self.tables.iter().map(|t| t.fields.len()).sum()
    }
}

/// Body of a failed metadata API call.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Airtable reports most failures as `{"type", "message"}`, but some (404s in
/// particular) as a bare error code string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured {
        #[serde(rename = "type")]
        kind: String,
        message: String,
    },
    Code(String),
}

impl ErrorDetail {
    pub fn kind(&self) -> &str {
        match self {
            ErrorDetail::Structured { kind, .. } => kind,
            ErrorDetail::Code(code) => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorDetail::Structured { message, .. } => message,
            ErrorDetail::Code(code) => code,
        }
    }
}

/// A validated Airtable base ID: `app` followed by 14 ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseId(String);

impl BaseId {
    pub fn parse(value: &str) -> SchemyResult<Self> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new("^app[a-zA-Z0-9]{14}$").expect("couldn't parse built-in regex");
        }

        if RE.is_match(value) {
            Ok(BaseId(value.to_owned()))
        } else {
            Err(SchemyError::InvalidInput(format!(
                "base ID {} is not valid (expected \"app\" followed by 14 letters or digits)",
                value
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
