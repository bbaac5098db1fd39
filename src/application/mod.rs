// Application layer - use cases shared by the CLI and the import/export code.

pub mod error;
mod service;

pub use error::*;
pub use service::*;
