//! # Routes Subcommand
//!
//! Lists a document's routes, sorted by method, href and encoding type.

use anyhow::Result;
use clap::Args;
use jhs_core::EndpointKey;

use crate::document::DocumentArgs;

/// Arguments for the routes subcommand.
#[derive(Args, Debug)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Print routes as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Execute the routes subcommand.
pub fn run_routes(args: &RoutesArgs) -> Result<u8> {
    let table = args.document.build()?;
    println!("{}", render_routes(&table.keys(), args.json)?);
    Ok(0)
}

/// Render route keys one per line, or as a JSON array.
pub fn render_routes(keys: &[&EndpointKey], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(keys)?);
    }
    Ok(keys
        .iter()
        .map(|k| format!("{:<7} {} ({})", k.method(), k.href(), k.enc_type()))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let a = EndpointKey::of("GET", "/a", "application/json").unwrap();
        let b = EndpointKey::of("POST", "/a", "application/json").unwrap();
        let text = render_routes(&[&a, &b], false).unwrap();
        assert_eq!(
            text,
            "GET     /a (application/json)\nPOST    /a (application/json)"
        );
    }

    #[test]
    fn test_render_json() {
        let a = EndpointKey::of("PUT", "/img", "image/png").unwrap();
        let text = render_routes(&[&a], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["method"], "PUT");
        assert_eq!(value[0]["encType"], "image/png");
    }
}
