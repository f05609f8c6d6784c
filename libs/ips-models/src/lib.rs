//! FHIR-shaped data models for patient summary composition
//!
//! This crate provides the data types shared by the summary composer and the
//! member-match operation. The models are deliberately lean: they carry the
//! fields the composition rules actually inspect (type, identity, subject,
//! codings, status) and keep everything else round-trippable through a
//! flattened `extensions` map.
//!
//! # Module Organization
//!
//! - `primitives`: Coding, CodeableConcept, Reference, Identifier, Narrative
//! - `resource`: the uniform clinical record consumed by the composer
//! - `patient`: Patient and Coverage, used at the member-match boundary
//! - `composition`: the composed summary document and its sections
//! - `bundle`: the document bundle envelope
//!
//! # Example
//!
//! ```rust
//! use summa_models::{Resource, ResourceType};
//! use serde_json::json;
//!
//! let observation: Resource = serde_json::from_value(json!({
//!     "resourceType": "Observation",
//!     "id": "bp-1",
//!     "status": "final",
//!     "category": [{ "coding": [{ "code": "vital-signs" }] }]
//! }))
//! .unwrap();
//!
//! assert_eq!(observation.resource_type, ResourceType::Observation);
//! assert!(observation.has_category_code("vital-signs"));
//! ```

pub mod bundle;
pub mod composition;
pub mod error;
pub mod patient;
pub mod primitives;
pub mod resource;

// Re-export commonly used types
pub use bundle::*;
pub use composition::*;
pub use error::{Error, Result};
pub use patient::*;
pub use primitives::*;
pub use resource::*;
