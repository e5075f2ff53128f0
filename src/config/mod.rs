pub mod models;
pub mod parser;

pub use models::TenkiConfig;
pub use parser::*;
