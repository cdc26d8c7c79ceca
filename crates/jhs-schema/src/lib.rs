//! # jhs-schema: Route Tables from Hyper-Schema Documents
//!
//! Turns a JSON Hyper-Schema document into an immutable [`RouteTable`]
//! mapping each [`EndpointKey`](jhs_core::EndpointKey) to a compiled
//! [`SchemaHandle`].
//!
//! ## Building (`builder`)
//!
//! [`SchemaTableBuilder`] walks the document's `links` array once:
//!
//! - `links` must be an array of objects, each with string `href` and `rel`.
//! - A link with both `method` and `schema` becomes a route keyed by
//!   `(method, href, encType)`, `encType` defaulting to `application/json`.
//! - Links without `method` or `schema` are skipped.
//! - A second link for an existing key is a hard duplicate-route error.
//!
//! ## Schema Engine (`handle`)
//!
//! Schemas compile through the `jsonschema` crate. `$ref` resolution is
//! local only: the root document's `definitions`/`$defs` are shared with
//! every link schema, and remote URIs resolve only against schemas
//! registered with [`SchemaTableBuilder::external_schema`].
//!
//! ## Crate Policy
//!
//! - Depends only on `jhs-core` internally.
//! - The table is built once and never mutated afterwards; share it behind
//!   an `Arc` across request handlers.

pub mod builder;
pub mod document;
pub mod handle;
pub mod table;

pub use builder::SchemaTableBuilder;
pub use handle::{SchemaCompiler, SchemaHandle};
pub use jsonschema::Draft;
pub use table::RouteTable;
