pub mod types;
pub mod settings;
pub mod errors;

#[cfg(test)]
mod types_test;

// Re-export ConvertError for convenience
pub use errors::{ConvertError, ConvertResult};
