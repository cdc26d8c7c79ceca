//! # Check Subcommand
//!
//! Builds a document's route table and reports the route count. Any
//! structural problem, duplicate route or uncompilable schema fails the
//! command.

use anyhow::Result;
use clap::Args;

use crate::document::DocumentArgs;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let table = args.document.build()?;
    println!(
        "OK: {} declares {} route(s)",
        args.document.document.display(),
        table.len()
    );
    Ok(0)
}
