//! # jhs-core: Foundational Types for Hyper-Schema Validation
//!
//! This crate is the leaf of the `jhs` workspace. It defines the value types
//! shared by the route table, the request validator, and every host
//! integration. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One route identity.** [`EndpointKey`] is the `(method, href, encType)`
//!    triple. Equality and hashing are structural and exact; no path or
//!    method canonicalization happens here.
//!
//! 2. **One media-type rule.** Every adapter derives its encoding type through
//!    [`media::essence`], so `"application/json; charset=UTF-8"` and
//!    `"application/json"` always produce the same key.
//!
//! 3. **One error channel.** [`JhsError`] separates build-time failures
//!    (malformed document, duplicate route), request-time rejections
//!    (media type, validation), and programmer errors (configuration).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jhs-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod endpoint;
pub mod error;
pub mod media;
pub mod violation;

pub use endpoint::EndpointKey;
pub use error::{DocumentError, JhsError, ValidationError};
pub use media::{is_entity_method, is_json, DEFAULT_ENC_TYPE, ENTITY_METHODS};
pub use violation::{ValidationViolations, Violation};
