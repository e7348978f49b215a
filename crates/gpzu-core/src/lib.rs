pub mod cache;
pub mod error;
pub mod extraction;
pub mod lexical;
pub mod model;
pub mod parsing;
pub mod postprocess;
pub mod report;
pub mod rules;

use chrono::NaiveDate;
use std::path::Path;
use tracing::{info, warn};

use cache::{cache_id, RawArtifacts, RawCache};
use error::GpzuError;
use extraction::{PdfExtractor, TableExtractor};
use lexical::MorphAnalyzer;
use model::Document;
use report::ParseResult;
use rules::schema::HeaderRules;

/// Main API entry point: turns plan PDFs into parse results.
///
/// Every collaborator is supplied by the caller; nothing is global. The
/// cache is optional and may be shared between parsers.
pub struct Parser<'a> {
    text: &'a dyn PdfExtractor,
    tables: &'a dyn TableExtractor,
    analyzer: &'a dyn MorphAnalyzer,
    cache: Option<&'a RawCache>,
    rules: Vec<HeaderRules>,
    today: NaiveDate,
}

impl<'a> Parser<'a> {
    /// A parser using `rules` as its rule book, judging plan status against
    /// the local date.
    pub fn new(
        text: &'a dyn PdfExtractor,
        tables: &'a dyn TableExtractor,
        analyzer: &'a dyn MorphAnalyzer,
        rules: Vec<HeaderRules>,
    ) -> Self {
        Parser {
            text,
            tables,
            analyzer,
            cache: None,
            rules,
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_cache(mut self, cache: &'a RawCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Date plan status is judged against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn rules(&self) -> &[HeaderRules] {
        &self.rules
    }

    /// Load a source document.
    ///
    /// A cache record under the file's name wins without reading the file.
    /// Otherwise the file is read and handed to both extractors; a failing
    /// extractor is logged and contributes nothing.
    pub fn load(&self, path: &Path) -> Result<Document, GpzuError> {
        let id = cache_id(path);

        if let Some(artifacts) = self.cache.and_then(|c| c.load(&id)) {
            info!(id = %id, pages = artifacts.pages.len(), tables = artifacts.tables.len(), "using cached extraction");
            return Ok(Document::new(id, artifacts));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| GpzuError::SourceUnreadable(format!("{}: {e}", path.display())))?;
        let (artifacts, complete) = self.extract(&id, &bytes);

        if let Some(cache) = self.cache {
            if complete {
                cache.save(&id, &artifacts);
            }
        }

        Ok(Document::new(id, artifacts))
    }

    /// Run both extractors over `bytes`. The flag reports whether both
    /// succeeded.
    fn extract(&self, id: &str, bytes: &[u8]) -> (RawArtifacts, bool) {
        let mut complete = true;

        let pages = self.text.extract_pages(bytes).unwrap_or_else(|e| {
            warn!(id, backend = self.text.backend_name(), error = %e, "unable to read text");
            complete = false;
            Vec::new()
        });
        info!(id, pages = pages.len(), backend = self.text.backend_name(), "text loaded");

        let tables = self.tables.extract_tables(bytes).unwrap_or_else(|e| {
            warn!(id, backend = self.tables.backend_name(), error = %e, "unable to read tables");
            complete = false;
            Vec::new()
        });
        info!(id, tables = tables.len(), backend = self.tables.backend_name(), "tables loaded");

        (RawArtifacts { pages, tables }, complete)
    }

    /// Extract the raw fields of a loaded document and build its result.
    pub fn parse(&self, doc: &mut Document) {
        parsing::extract_fields(doc, &self.rules, self.today);
        doc.result = Some(postprocess::build_result(doc, self.analyzer));
    }

    /// Load, parse and return the result of one source, telling apart an
    /// unreadable source, content in an unknown layout and a missing result.
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult, GpzuError> {
        let mut doc = self.load(path)?;
        if doc.is_blank() {
            return Err(GpzuError::SourceUnreadable(doc.source_id));
        }

        self.parse(&mut doc);
        if doc.dialect().is_none() {
            let reason = if doc.fields.number.is_empty() {
                "no registration number on the first page".to_string()
            } else {
                format!("no header rules for registration number '{}'", doc.fields.number)
            };
            return Err(GpzuError::ContentUnparseable {
                source_id: doc.source_id,
                reason,
            });
        }

        doc.result().cloned()
    }
}
