pub mod parser;
pub mod prompt;
pub mod translate;
