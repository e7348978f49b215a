use gpzu_core::error::GpzuError;
use gpzu_core::report::ParseResult;
use std::path::Path;

use crate::output;

pub fn run(result_file: &Path) -> Result<(), GpzuError> {
    let json = std::fs::read(result_file)?;
    let result: ParseResult = serde_json::from_slice(&json)?;
    output::flat::print(&result);
    Ok(())
}
