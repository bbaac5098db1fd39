pub mod export;
pub mod import;

pub use export::{BookSnapshot, Exporter};
pub use import::{ImportError, ImportOptions, ImportResult, Importer, read_customers_csv};
