//! Final result rendering

use crate::error::CliError;
use pyndex_ops::OperationResult;

/// Renders operation results as plain text or JSON
pub struct OutputRenderer {
    json: bool,
}

impl OutputRenderer {
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print the result to stdout
    pub fn render_result(&self, result: &OperationResult) -> Result<(), CliError> {
        if self.json {
            let rendered = serde_json::to_string_pretty(result)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            println!("{rendered}");
            return Ok(());
        }

        match result {
            OperationResult::AddReport(report) => {
                for pkg in &report.packages {
                    println!(
                        "added {} {} ({}, {} bytes, owner {})",
                        pkg.name, pkg.version, pkg.filename, pkg.size, pkg.owner
                    );
                }
            }
        }
        Ok(())
    }
}
