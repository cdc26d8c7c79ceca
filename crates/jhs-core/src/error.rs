//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout the `jhs` workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Build-time errors ([`JhsError::Document`], [`JhsError::DuplicateRoute`])
//!   abort route table construction. A host must not start serving with a
//!   partially built table.
//! - Request-time errors ([`JhsError::MediaType`], [`JhsError::Validation`])
//!   are the expected rejection outcomes a host translates into a client
//!   response (typically HTTP 400).
//! - [`JhsError::Configuration`] is a programmer error: a required input was
//!   absent.

use thiserror::Error;

use crate::endpoint::EndpointKey;
use crate::violation::{ValidationViolations, Violation};

/// Top-level error type for hyper-schema request validation.
#[derive(Error, Debug)]
pub enum JhsError {
    /// The hyper-schema document is structurally malformed.
    #[error("malformed hyper-schema document: {0}")]
    Document(#[from] DocumentError),

    /// Two link definitions share the same `(method, href, encType)`.
    #[error("duplicate link definition: {key}")]
    DuplicateRoute {
        /// The colliding key.
        key: EndpointKey,
    },

    /// The request media type is not `application/json` and strict media
    /// type checking is enabled.
    #[error("request media type '{found}' is not 'application/json'")]
    MediaType {
        /// The media type the request carried.
        found: String,
    },

    /// The request value does not conform to its route schema.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A required argument was absent.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl JhsError {
    /// Returns true for the recoverable, request-level outcomes a host
    /// should turn into a client-visible rejection.
    pub fn is_request_rejection(&self) -> bool {
        matches!(self, Self::MediaType { .. } | Self::Validation(_))
    }

    /// Returns true for errors raised while building a route table.
    pub fn is_build_error(&self) -> bool {
        matches!(self, Self::Document(_) | Self::DuplicateRoute { .. })
    }
}

/// Structural problem in a hyper-schema document.
///
/// Every variant names the JSON Pointer of the offending location.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A required key is absent.
    #[error("'{pointer}' must exist in the document")]
    MissingKey {
        /// Pointer to the missing key.
        pointer: String,
    },

    /// A value has the wrong JSON type.
    #[error("'{pointer}' must be {expected}")]
    WrongType {
        /// Pointer to the mistyped value.
        pointer: String,
        /// Description of the expected JSON type, e.g. "an array".
        expected: &'static str,
    },

    /// A link's schema could not be compiled.
    #[error("schema at '{pointer}' cannot be compiled: {reason}")]
    InvalidSchema {
        /// Pointer to the link's `schema` member.
        pointer: String,
        /// Reason reported by the schema engine.
        reason: String,
    },

    /// The document could not be read or parsed.
    #[error("cannot load document '{path}': {reason}")]
    Load {
        /// Path of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}

/// A request value failed validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The request body (or its encoding) could not be read as JSON.
    #[error("malformed request body: {reason}")]
    MalformedBody {
        /// Parser or decoder message.
        reason: String,
    },

    /// The parsed request value does not match the route schema.
    #[error("request does not match the schema of {key}:\n{violations}")]
    SchemaMismatch {
        /// Route whose schema rejected the request.
        key: EndpointKey,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },
}

impl ValidationError {
    /// Violations carried by this error; empty for malformed bodies.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::MalformedBody { .. } => &[],
            Self::SchemaMismatch { violations, .. } => violations.violations(),
        }
    }
}
