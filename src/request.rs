mod builder;
mod error;
mod json;
mod multipart;
mod registry;


pub use builder::{
    RequestBody, RequestBuilder, SingleImageBuilder, ToolInputs, ToolRequest, TwoImageBuilder,
    build_multipart,
};
pub use error::{RequestError, Result};
pub use json::{build_json, json_setting_names};
pub use multipart::{EncodedForm, FieldValue, FormField, MultipartForm};
pub use registry::BuilderRegistry;
