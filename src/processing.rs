mod error;
mod processor;

#[cfg(test)]
mod tests;

pub use error::{ProcessingError, Result};
pub use processor::{ProcessedOutput, Processor, SourceRef};
