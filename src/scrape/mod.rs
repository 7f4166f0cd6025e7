// src/scrape/mod.rs
mod acquire;
mod corpus;

pub use acquire::Acquirer;
pub use corpus::CorpusDriver;
