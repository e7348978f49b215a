use gpzu_core::cache::{cache_id, RawCache};
use gpzu_core::error::GpzuError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// First letters of plan file names: Latin `R` and Cyrillic `Р`.
const PLAN_FILE_INITIALS: &[char] = &['R', 'Р'];

pub fn status(cache_dir: &Path, input_files: &[PathBuf]) -> Result<(), GpzuError> {
    let cache = RawCache::new(cache_dir);
    for path in input_files {
        println!("{}\t{}", path.display(), cache_status(&cache, path));
    }
    Ok(())
}

pub fn list(cache_dir: &Path, dir: &Path) -> Result<(), GpzuError> {
    let cache = RawCache::new(cache_dir);

    let mut plans: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_plan_file(p))
        .collect();
    plans.sort();
    debug!(dir = %dir.display(), plans = plans.len(), "listed plan files");

    if plans.is_empty() {
        eprintln!("No plan PDFs in {}", dir.display());
        return Ok(());
    }

    for path in &plans {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        println!("{}\t{}", name, cache_status(&cache, path));
    }
    Ok(())
}

fn cache_status(cache: &RawCache, path: &Path) -> &'static str {
    if cache.contains(&cache_id(path)) {
        "parsed"
    } else {
        "not_parsed"
    }
}

fn is_plan_file(path: &Path) -> bool {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    is_pdf && name.starts_with(PLAN_FILE_INITIALS)
}
