//! **Modelling and multi-version rendering of CycloneDX BOM documents.**
//!
//! `cyclonedx-render` models a Bill-of-Materials document and renders it as
//! CycloneDX JSON or XML conforming to any of the historical schema versions
//! 1.0 through 1.4. Each version supports a different feature set; a single
//! capability table ([`schema`]) decides which fields and features are
//! emitted, so the same document can be downgraded to an older schema
//! without hand-editing.
//!
//! ## Key pieces
//!
//! - **[`model`]**: plain data records ([`Bom`], [`Component`], [`Metadata`],
//!   licenses, hashes, external references) plus [`BomRef`], the
//!   identity-compared cell that names a component within one document.
//! - **[`schema`]**: [`SchemaVersion`] and [`OutputFormat`], backed by one
//!   static capability table.
//! - **[`output`]**: the two serializer families and the shared
//!   orchestration: reference discrimination, dependency-graph flattening,
//!   tree building, text encoding.
//! - **[`validation`]**: the interface external schema validators plug into.
//!
//! ## Rendering a document
//!
//! ```
//! use cyclonedx_render::{
//!     serialize_bom, Bom, Component, ComponentType, OutputFormat, SchemaVersion,
//! };
//!
//! fn main() -> cyclonedx_render::Result<()> {
//!     let mut bom = Bom::new();
//!     let mut app = Component::new(ComponentType::Application, "demo-app")
//!         .with_version("1.0.0")
//!         .with_bom_ref_value("demo-app@1.0.0");
//!     let lib = Component::new(ComponentType::Library, "serde")
//!         .with_version("1.0.219")
//!         .with_bom_ref_value("serde@1.0.219");
//!     app.add_dependency(lib.bom_ref());
//!     bom.add_component(app);
//!     bom.add_component(lib);
//!
//!     let json = serialize_bom(&bom, OutputFormat::Json, SchemaVersion::V1_4, true)?;
//!     assert!(json.contains("\"specVersion\": \"1.4\""));
//!
//!     let xml = serialize_bom(&bom, OutputFormat::Xml, SchemaVersion::V1_3, false)?;
//!     assert!(xml.contains("http://cyclonedx.org/schema/bom/1.3"));
//!     Ok(())
//! }
//! ```
//!
//! ## Reference identity and discrimination
//!
//! Components refer to each other through shared [`BomRef`] handles, not
//! through embedded copies, so equality of two refs is an identity question.
//! During one `serialize()` call every reachable ref is temporarily given a
//! unique, non-null value (so the wire output is referentially valid) and
//! restored afterwards, also when serialization fails partway. A document
//! graph must therefore not be serialized from two threads at once; the
//! handle type is deliberately not `Send`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational here
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // model::Component, output::BomSerializer etc. read fine at call sites
    clippy::module_name_repetitions
)]

pub mod error;
pub mod model;
pub mod output;
pub mod schema;
pub mod validation;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use model::{
    Bom, BomRef, Component, ComponentType, DisjunctiveLicense, ExternalRefType,
    ExternalReference, HashAlgorithm, LicenseChoice, LicenseRepository, Licensing, Metadata,
    Property, Tool, UrnUuid,
};
pub use output::{serialize_bom, BomRefDiscriminator, BomSerializer, JsonSerializer, XmlSerializer};
pub use schema::{OutputFormat, SchemaVersion};
pub use validation::{ValidationError, Validator};
