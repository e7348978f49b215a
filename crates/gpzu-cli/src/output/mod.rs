pub mod flat;
pub mod json;
pub mod table;
