pub mod connectors;
pub mod ingest;

pub use connectors::{CsvConnector, DataValidator};
pub use ingest::{ParsedBatch, RejectedRecord};
