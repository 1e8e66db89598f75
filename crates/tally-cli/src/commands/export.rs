//! Export command implementation

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tally_core::db::Database;
use tally_core::export::{export_transactions, ExportFormat, ExportOptions};
use tally_core::models::parse_date;

/// Export the ledger to a file, or stdout when no output is given
pub fn cmd_export(
    db: &Database,
    format: &str,
    output: Option<PathBuf>,
    from: Option<String>,
    to: Option<String>,
) -> Result<usize> {
    let format = format
        .parse::<ExportFormat>()
        .map_err(anyhow::Error::msg)?;

    let opts = ExportOptions {
        from: from
            .as_deref()
            .map(parse_date)
            .transpose()
            .context("Invalid --from date")?,
        to: to
            .as_deref()
            .map(parse_date)
            .transpose()
            .context("Invalid --to date")?,
    };

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let count = export_transactions(db, format, &opts, BufWriter::new(file))?;
            println!("✅ Exported {} transactions to {}", count, path.display());
            Ok(count)
        }
        None => {
            let stdout = io::stdout();
            let count = export_transactions(db, format, &opts, stdout.lock())?;
            Ok(count)
        }
    }
}
