mod catalog;
mod error;
mod frames;
mod params;
mod registry;
mod schema;


pub use error::{Result, ToolError};
pub use frames::FrameSelection;
pub use params::{ParamValue, SettingsBag, is_hex_color};
pub use registry::{descriptor, list_tools};
pub use schema::{
    API_PREFIX, DefaultValue, EndpointDescriptor, FILE_FIELD, InputMode, OutputKind, ParamKind,
    ParamSpec, SecondaryInput, URL_FIELD,
};
