use std::collections::HashMap;
use std::sync::Arc;

use crate::tools::{EndpointDescriptor, SettingsBag, list_tools};

use super::{RequestBuilder, Result, SingleImageBuilder, ToolInputs, ToolRequest, TwoImageBuilder};

#[derive(Clone)]
pub struct BuilderRegistry {
    fallback: Arc<dyn RequestBuilder>,
    overrides: HashMap<&'static str, Arc<dyn RequestBuilder>>,
}

impl std::fmt::Debug for BuilderRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut overridden = self.overrides.keys().collect::<Vec<_>>();
        overridden.sort();
        formatter
            .debug_struct("BuilderRegistry")
            .field("overrides", &overridden)
            .finish()
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for tool in list_tools() {
            if let Some(secondary) = &tool.secondary {
                registry.register(tool.name, TwoImageBuilder::for_input(secondary));
            }
        }
        registry
    }
}

impl BuilderRegistry {
    pub fn empty() -> Self {
        Self {
            fallback: Arc::new(SingleImageBuilder),
            overrides: HashMap::new(),
        }
    }

    pub fn register<B: RequestBuilder + 'static>(&mut self, tool: &'static str, builder: B) {
        self.overrides.insert(tool, Arc::new(builder));
    }

    pub fn builder_for(&self, tool: &str) -> &dyn RequestBuilder {
        self.overrides
            .get(tool)
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    pub fn build(
        &self,
        descriptor: &'static EndpointDescriptor,
        inputs: &ToolInputs,
        settings: &SettingsBag,
    ) -> Result<ToolRequest> {
        self.builder_for(descriptor.name)
            .build(inputs, settings, descriptor)
    }
}
