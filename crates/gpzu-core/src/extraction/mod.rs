pub mod pdftotext;
pub mod table;
pub mod tabula;
pub mod workbook;

use crate::error::GpzuError;
use table::Table;

/// Trait for page-text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the text of every page, in page order (page 1 first).
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, GpzuError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for table extraction backends.
pub trait TableExtractor: Send + Sync {
    /// Extract every table of the document, in document order.
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<Table>, GpzuError>;

    fn backend_name(&self) -> &str;
}

/// Write PDF bytes to a named temporary file for command-line backends.
pub(crate) fn spill_to_tempfile(pdf_bytes: &[u8]) -> Result<tempfile::NamedTempFile, GpzuError> {
    use std::io::Write;

    let mut tmpfile =
        tempfile::NamedTempFile::new().map_err(|e| GpzuError::Extraction(e.to_string()))?;
    tmpfile
        .write_all(pdf_bytes)
        .map_err(|e| GpzuError::Extraction(e.to_string()))?;
    Ok(tmpfile)
}
