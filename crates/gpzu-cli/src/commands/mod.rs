pub mod cache;
pub mod flatten;
pub mod parse;
pub mod rules;
