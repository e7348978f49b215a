use gpzu_core::report::{flatten, ParseResult};

pub fn print(result: &ParseResult) {
    print!("{}", flatten(result).to_tsv());
}
