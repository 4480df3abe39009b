mod catalog_service;
mod context;
mod error;
mod job_service;
mod process_service;


pub use catalog_service::CatalogService;
pub use context::AppContext;
pub use error::{AppError, Result};
pub use job_service::JobService;
pub use process_service::{ProcessRequest, ProcessService, UrlCheck};
