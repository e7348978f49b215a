use gpzu_core::cache::RawCache;
use gpzu_core::error::GpzuError;
use gpzu_core::extraction::pdftotext::PdftotextExtractor;
use gpzu_core::extraction::tabula::TabulaExtractor;
use gpzu_core::extraction::workbook::WorkbookTables;
use gpzu_core::extraction::TableExtractor;
use gpzu_core::lexical::SuffixAnalyzer;
use gpzu_core::Parser;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::commands::rules::rule_book;
use crate::output;
use crate::OutputFormat;

/// Collaborator configuration shared by the parsing commands.
pub struct Settings {
    pub cache_dir: PathBuf,
    pub rules: Option<PathBuf>,
    pub tabula_jar: PathBuf,
    pub tables: Option<PathBuf>,
    pub today: Option<NaiveDate>,
}

pub fn run(
    pdf_file: &Path,
    settings: &Settings,
    output_format: OutputFormat,
    output_file: Option<PathBuf>,
) -> Result<(), GpzuError> {
    let rules = rule_book(settings.rules.as_deref())?;
    let cache = RawCache::new(&settings.cache_dir);
    let text = PdftotextExtractor::new();
    let tables: Box<dyn TableExtractor> = match &settings.tables {
        Some(workbook) => {
            debug!(workbook = %workbook.display(), "reading tables from workbook");
            Box::new(WorkbookTables::new(workbook))
        }
        None => {
            debug!(jar = %settings.tabula_jar.display(), "reading tables with tabula");
            Box::new(TabulaExtractor::new(&settings.tabula_jar))
        }
    };
    let analyzer = SuffixAnalyzer::new();

    let mut parser = Parser::new(&text, tables.as_ref(), &analyzer, rules).with_cache(&cache);
    if let Some(today) = settings.today {
        parser = parser.with_today(today);
    }
    info!(file = %pdf_file.display(), cache = %settings.cache_dir.display(), "parsing plan");
    let result = parser.parse_file(pdf_file)?;
    info!(groups = result.groups.len(), "plan parsed");

    if let Some(path) = output_file {
        // Always write JSON when saving to file
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json)?;
        eprintln!("Result written to {}", path.display());
        return Ok(());
    }

    match output_format {
        OutputFormat::Json => output::json::print(&result)?,
        OutputFormat::Table => output::table::print(&result),
        OutputFormat::Flat => output::flat::print(&result),
    }

    Ok(())
}
