//! # Validate Subcommand
//!
//! Runs one synthetic request through the request validator, exactly as a
//! host service would see it: the path and query become the request URI,
//! `--content-type` becomes the header, and the body is taken verbatim.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Args;
use http::header::CONTENT_TYPE;
use http::Request;
use jhs_core::{JhsError, ValidationError};
use jhs_validator::{BufferedRequest, RequestValidator, ValidatorConfig};

use crate::document::DocumentArgs;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct RequestArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// HTTP method, e.g. `POST`.
    #[arg(long, short = 'X')]
    pub method: String,

    /// Request path, e.g. `/users`.
    #[arg(long)]
    pub path: String,

    /// `Content-Type` header. Omitted means no header.
    #[arg(long)]
    pub content_type: Option<String>,

    /// Raw query string, without the leading `?`.
    #[arg(long)]
    pub query: Option<String>,

    /// Request body.
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the request body from a file.
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Reject non-JSON requests instead of skipping them.
    #[arg(long)]
    pub strict_media_type: bool,
}

impl RequestArgs {
    fn request(&self) -> Result<BufferedRequest> {
        let uri = match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.path),
            _ => self.path.clone(),
        };

        let body = match (&self.body, &self.body_file) {
            (Some(body), _) => Bytes::from(body.clone()),
            (None, Some(path)) => Bytes::from(
                std::fs::read(path)
                    .with_context(|| format!("cannot read body file {}", path.display()))?,
            ),
            (None, None) => Bytes::new(),
        };

        let mut builder = Request::builder().method(self.method.as_str()).uri(&uri);
        if let Some(content_type) = &self.content_type {
            builder = builder.header(CONTENT_TYPE, content_type.as_str());
        }
        let request = builder
            .body(body)
            .with_context(|| format!("invalid request {} {uri}", self.method))?;
        Ok(BufferedRequest::new(request))
    }
}

/// Execute the validate subcommand.
///
/// `config` is an optional YAML validator configuration; without one the
/// `JHS_*` environment variables apply.
pub fn run_request(args: &RequestArgs, config: Option<&Path>) -> Result<u8> {
    let mut validator_config = match config {
        Some(path) => ValidatorConfig::from_yaml_file(path)?,
        None => ValidatorConfig::from_env()?,
    };
    if args.strict_media_type {
        validator_config.strict_media_type = true;
    }

    let table = args.document.build()?;
    let validator = RequestValidator::new(Arc::new(table), validator_config)?;
    let request = args.request()?;

    match validator.validate(&request) {
        Ok(()) => {
            println!("OK: {} {} is valid", args.method, args.path);
            Ok(0)
        }
        Err(err) if err.is_request_rejection() => {
            println!("REJECTED: {} {}", args.method, args.path);
            println!("{}", describe_rejection(&err));
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}

/// Human-readable rejection report, one violation per line.
pub fn describe_rejection(err: &JhsError) -> String {
    match err {
        JhsError::Validation(ValidationError::SchemaMismatch { key, violations }) => {
            let mut lines = vec![format!("  route: {key}")];
            lines.extend(violations.violations().iter().map(|v| format!("  - {v}")));
            lines.join("\n")
        }
        other => format!("  {other}"),
    }
}
