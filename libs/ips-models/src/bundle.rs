//! The document bundle envelope
//!
//! The composer's output is a document-type [`Bundle`]: the composition as
//! the first entry, followed by every record the composition references.
//! Entry resources are held as raw JSON values so a bundle can carry the
//! composition and heterogeneous records side by side.

use crate::error::{Error, Result};
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A container for a collection of resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "bundle_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Purpose of this bundle
    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    /// When the bundle was assembled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// If search, the total number of matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    /// Entries in the bundle
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn bundle_resource_type() -> String {
    "Bundle".to_string()
}

impl Bundle {
    /// An empty bundle of the given type.
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            resource_type: bundle_resource_type(),
            id: None,
            bundle_type,
            timestamp: None,
            total: None,
            entry: Vec::new(),
            extensions: HashMap::new(),
        }
    }

    /// Serialize `resource` and append it as an entry.
    pub fn push_resource<T: Serialize>(
        &mut self,
        full_url: impl Into<String>,
        resource: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(resource)?;
        self.entry.push(BundleEntry {
            full_url: Some(full_url.into()),
            resource: Some(value),
        });
        Ok(())
    }

    /// Decode every entry's resource as a clinical [`Resource`].
    ///
    /// Used to consume a searchset produced by an external record search.
    /// Fails on entries without a resource rather than skipping them.
    pub fn entry_resources(&self) -> Result<Vec<Resource>> {
        self.entry
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                let value = entry.resource.as_ref().ok_or_else(|| {
                    Error::InvalidResource(format!("bundle entry {position} has no resource"))
                })?;
                Ok(serde_json::from_value(value.clone())?)
            })
            .collect()
    }
}

/// Type of bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    Document,
    Message,
    Transaction,
    TransactionResponse,
    Batch,
    BatchResponse,
    History,
    Searchset,
    Collection,
}

/// Entry in the bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// URI for the entry (relative URL or urn)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// The resource in this entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,
}
