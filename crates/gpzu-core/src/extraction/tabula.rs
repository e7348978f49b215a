use crate::error::GpzuError;
use crate::extraction::table::{Cell, Table};
use crate::extraction::{spill_to_tempfile, TableExtractor};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;

/// Table backend running tabula-java (`java -jar tabula.jar`) with JSON output.
///
/// Every extracted table keeps its first row as the header, matching what
/// the limit and exemption table rules expect.
pub struct TabulaExtractor {
    jar: PathBuf,
}

impl TabulaExtractor {
    pub fn new(jar: impl Into<PathBuf>) -> Self {
        TabulaExtractor { jar: jar.into() }
    }
}

#[derive(Debug, Deserialize)]
struct TabulaTable {
    data: Vec<Vec<TabulaCell>>,
}

#[derive(Debug, Deserialize)]
struct TabulaCell {
    #[serde(default)]
    text: String,
}

impl TableExtractor for TabulaExtractor {
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<Table>, GpzuError> {
        let tmpfile = spill_to_tempfile(pdf_bytes)?;

        let output = Command::new("java")
            .arg("-jar")
            .arg(&self.jar)
            .args(["--pages", "all", "--format", "JSON"])
            .arg(tmpfile.path())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GpzuError::ToolNotFound {
                        tool: "java",
                        hint: "tabula-java needs a Java runtime (apt install default-jre)",
                    }
                } else {
                    GpzuError::Extraction(format!("tabula failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(GpzuError::ToolFailed {
                tool: "tabula",
                code,
                stderr,
            });
        }

        parse_tabula_json(&String::from_utf8_lossy(&output.stdout))
    }

    fn backend_name(&self) -> &str {
        "tabula"
    }
}

fn parse_tabula_json(json: &str) -> Result<Vec<Table>, GpzuError> {
    let raw: Vec<TabulaTable> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter(|t| !t.data.is_empty())
        .map(|t| {
            let grid = t
                .data
                .into_iter()
                .map(|row| row.into_iter().map(|c| Cell::text(c.text)).collect())
                .collect();
            Table::from_grid(grid)
        })
        .collect())
}
