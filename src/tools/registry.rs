use std::collections::HashMap;
use std::sync::OnceLock;

use super::catalog::TOOLS;
use super::{EndpointDescriptor, Result, ToolError};

type Registry = HashMap<&'static str, &'static EndpointDescriptor>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| TOOLS.iter().map(|tool| (tool.name, tool)).collect())
}

pub fn descriptor(name: &str) -> Result<&'static EndpointDescriptor> {
    registry()
        .get(name)
        .copied()
        .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
}

pub fn list_tools() -> Vec<&'static EndpointDescriptor> {
    let mut tools = registry().values().copied().collect::<Vec<_>>();
    tools.sort_by(|left, right| left.name.cmp(right.name));
    tools
}
