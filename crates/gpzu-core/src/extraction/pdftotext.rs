use crate::error::GpzuError;
use crate::extraction::{spill_to_tempfile, PdfExtractor};
use std::process::Command;

/// Page-text backend using pdftotext (from poppler-utils).
///
/// Runs in reading-order mode (no `-layout`): the header rules match on
/// line prefixes, so column padding would only get in the way.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, GpzuError> {
        let tmpfile = spill_to_tempfile(pdf_bytes)?;

        let output = Command::new("pdftotext")
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GpzuError::ToolNotFound {
                        tool: "pdftotext",
                        hint: "Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)",
                    }
                } else {
                    GpzuError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(GpzuError::ToolFailed {
                tool: "pdftotext",
                code,
                stderr,
            });
        }

        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages. pdftotext terminates every page with
/// a form feed, so the piece after the last one is not a page.
fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split('\x0c').map(|p| p.to_string()).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    if pages.len() == 1 && pages[0].trim().is_empty() {
        pages.clear();
    }
    pages
}
