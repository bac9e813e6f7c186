//! The declaration document read by `duck check`.
//!
//! ```json
//! {
//!   "compilerOptions": { "strictFunctionTypes": true },
//!   "types": { "Point": { "kind": "shape", "fields": [ ... ] } },
//!   "enums": [ { "name": "Direction", "members": [ { "name": "Up" } ] } ],
//!   "queries": [
//!     { "assignable": { "source": { "kind": "ref", "name": "Point" }, "target": ..., "expect": true } },
//!     { "enumValue": { "enum": "Direction", "member": "Up" } },
//!     { "enumName": { "enum": "Direction", "value": 0 } }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use duck_enums::EnumDecl;
use duck_solver::{CompatOptions, TypeRef};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub compiler_options: CompatOptions,
    /// Named declarations, in declaration order. Bodies may reference any
    /// name in this map or any enum name.
    #[serde(default)]
    pub types: IndexMap<String, TypeRef>,
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
    #[serde(default)]
    pub queries: Vec<Query>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Query {
    Assignable {
        source: TypeRef,
        target: TypeRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<bool>,
    },
    EnumValue {
        #[serde(rename = "enum")]
        enum_name: String,
        member: String,
    },
    EnumName {
        #[serde(rename = "enum")]
        enum_name: String,
        value: f64,
    },
}

impl Query {
    /// The query's JSON tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Assignable { .. } => "assignable",
            Query::EnumValue { .. } => "enumValue",
            Query::EnumName { .. } => "enumName",
        }
    }
}

pub fn parse_document(source: &str) -> Result<Document> {
    let document = serde_json::from_str(source).context("failed to parse document JSON")?;
    Ok(document)
}

pub fn load_document(path: &Path) -> Result<Document> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document: {}", path.display()))?;
    parse_document(&source).with_context(|| format!("failed to load document: {}", path.display()))
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
