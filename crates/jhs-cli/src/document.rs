//! Document arguments shared by every subcommand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use jhs_schema::{Draft, RouteTable, SchemaTableBuilder};

/// JSON Schema drafts accepted by `--draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DraftArg {
    #[value(name = "4")]
    Draft4,
    #[value(name = "6")]
    Draft6,
    #[value(name = "7")]
    Draft7,
    #[value(name = "2019-09")]
    Draft201909,
    #[value(name = "2020-12")]
    Draft202012,
}

impl From<DraftArg> for Draft {
    fn from(arg: DraftArg) -> Self {
        match arg {
            DraftArg::Draft4 => Draft::Draft4,
            DraftArg::Draft6 => Draft::Draft6,
            DraftArg::Draft7 => Draft::Draft7,
            DraftArg::Draft201909 => Draft::Draft201909,
            DraftArg::Draft202012 => Draft::Draft202012,
        }
    }
}

/// Location and interpretation of a hyper-schema document.
#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Hyper-schema document (`.json`, `.yaml` or `.yml`).
    pub document: PathBuf,

    /// Force a JSON Schema draft instead of reading `$schema`.
    #[arg(long, value_enum)]
    pub draft: Option<DraftArg>,
}

impl DocumentArgs {
    /// Load the document and build its route table.
    pub fn build(&self) -> Result<RouteTable> {
        let mut builder = SchemaTableBuilder::from_path(&self.document)?;
        if let Some(draft) = self.draft {
            builder = builder.draft(draft.into());
        }
        builder
            .build()
            .with_context(|| format!("invalid hyper-schema document {}", self.document.display()))
    }
}
