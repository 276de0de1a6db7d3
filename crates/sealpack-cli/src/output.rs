//! Summary renderers for directory runs.

use anyhow::{Result, anyhow};
use clap::ValueEnum;
use sealpack_pipeline::Summary;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub(crate) fn render_summary(summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(summary)
                .map_err(|err| anyhow!("failed to format JSON: {err}"))?;
            println!("{text}");
        }
        OutputFormat::Table => {
            println!("{:<10} {:>6}", "OUTCOME", "FILES");
            println!("{:<10} {:>6}", "succeeded", summary.succeeded);
            println!("{:<10} {:>6}", "failed", summary.failed);
            println!("{:<10} {:>6}", "total", summary.total());
        }
    }
    Ok(())
}
