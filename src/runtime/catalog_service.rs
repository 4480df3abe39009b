use crate::tools::{EndpointDescriptor, descriptor, list_tools};

use super::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn list(&self) -> Vec<&'static EndpointDescriptor> {
        list_tools()
    }

    pub fn describe(&self, tool: &str) -> Result<&'static EndpointDescriptor> {
        Ok(descriptor(tool)?)
    }
}
