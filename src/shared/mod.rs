/// Shared kernel: error types, result alias and small utilities used across layers
pub mod error;
pub mod memo;
pub mod result;
pub mod security;

pub use memo::Memo;
pub use result::{Result, ScannerResult};
