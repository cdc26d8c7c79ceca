//! # jhs-cli: Hyper-Schema Command-Line Interface
//!
//! ## Subcommands
//!
//! - `check`: build a document's route table and report problems
//! - `routes`: list the routes a document declares
//! - `validate`: run one synthetic request through the validator
//!
//! ## Crate Policy
//!
//! - Argument parsing lives beside each handler; `main` only dispatches.
//! - Handlers return the process exit code: `0` success, `1` rejected
//!   request. Hard failures surface as `anyhow` errors.

pub mod check;
pub mod document;
pub mod request;
pub mod routes;
