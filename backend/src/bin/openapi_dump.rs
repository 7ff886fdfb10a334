//! Print the OpenAPI document as JSON.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use company_api::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Emit the company API OpenAPI document",
    version
)]
struct CliArgs {
    /// Write the document to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")?;
    match args.output {
        Some(path) => std::fs::write(&path, json + "\n")
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
