mod blob_store;
mod client;
mod error;
mod result;

#[cfg(test)]
mod tests;

pub use blob_store::{BlobStore, ObjectUrl};
pub use client::{ApiClient, ApiResponse, RequestSender};
pub use error::{Result, TransportError};
pub use result::{ProcessingResult, ResultSlot};
