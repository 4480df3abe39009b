mod client;
mod error;
mod format;

#[cfg(test)]
mod tests;

pub use client::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ConfigError, Result};
pub use format::{FileFormat, read_file, write_file};
