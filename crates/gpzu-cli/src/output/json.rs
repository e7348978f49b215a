use gpzu_core::error::GpzuError;
use gpzu_core::report::ParseResult;

pub fn print(result: &ParseResult) -> Result<(), GpzuError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
