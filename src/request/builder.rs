use serde_json::Value;

use crate::source::{FileBlob, ImageSource};
use crate::tools::{
    EndpointDescriptor, FILE_FIELD, InputMode, ParamValue, SecondaryInput, SettingsBag,
};

use super::json::build_json;
use super::{MultipartForm, RequestError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInputs {
    pub primary: ImageSource,
    pub secondary: Option<ImageSource>,
}

impl ToolInputs {
    pub fn single(primary: ImageSource) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: ImageSource) -> Self {
        self.secondary = Some(secondary);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Multipart(MultipartForm),
    Json(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub tool: &'static str,
    pub method: &'static str,
    pub path: String,
    pub body: RequestBody,
}

impl ToolRequest {
    pub fn mode(&self) -> InputMode {
        match self.body {
            RequestBody::Multipart(_) => InputMode::File,
            RequestBody::Json(_) => InputMode::Url,
        }
    }
}

pub trait RequestBuilder: Send + Sync {
    fn build(
        &self,
        inputs: &ToolInputs,
        settings: &SettingsBag,
        descriptor: &'static EndpointDescriptor,
    ) -> Result<ToolRequest>;
}

pub(super) fn ordered_settings<'a>(
    settings: &'a SettingsBag,
    descriptor: &EndpointDescriptor,
) -> Vec<(&'a str, &'a ParamValue)> {
    let declared = descriptor
        .params
        .iter()
        .filter_map(|spec| settings.get(spec.name).map(|value| (spec.name, value)));
    let extra = settings
        .iter()
        .filter(|(name, _)| descriptor.param(name).is_none());
    declared.chain(extra).collect()
}

pub fn build_multipart(
    file: &FileBlob,
    settings: &SettingsBag,
    descriptor: &EndpointDescriptor,
) -> MultipartForm {
    let mut form = MultipartForm::new();
    form.push_file(FILE_FIELD, file.clone());
    for (name, value) in ordered_settings(settings, descriptor) {
        form.push_text(name, value.to_string());
    }
    form
}

fn single_request(
    primary: &ImageSource,
    settings: &SettingsBag,
    descriptor: &'static EndpointDescriptor,
) -> ToolRequest {
    let body = match primary {
        ImageSource::File(blob) => RequestBody::Multipart(build_multipart(blob, settings, descriptor)),
        ImageSource::Url(url) => RequestBody::Json(build_json(url, settings, descriptor)),
    };
    ToolRequest {
        tool: descriptor.name,
        method: descriptor.method,
        path: descriptor.path(primary.mode()),
        body,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SingleImageBuilder;

impl RequestBuilder for SingleImageBuilder {
    fn build(
        &self,
        inputs: &ToolInputs,
        settings: &SettingsBag,
        descriptor: &'static EndpointDescriptor,
    ) -> Result<ToolRequest> {
        if inputs.secondary.is_some() {
            return Err(RequestError::UnexpectedSecondary {
                tool: descriptor.name.to_string(),
            });
        }
        Ok(single_request(&inputs.primary, settings, descriptor))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoImageBuilder {
    file_field: &'static str,
    url_field: &'static str,
}

impl TwoImageBuilder {
    pub fn new(file_field: &'static str, url_field: &'static str) -> Self {
        Self {
            file_field,
            url_field,
        }
    }

    pub fn for_input(input: &SecondaryInput) -> Self {
        Self::new(input.file_field, input.url_field)
    }
}

impl RequestBuilder for TwoImageBuilder {
    fn build(
        &self,
        inputs: &ToolInputs,
        settings: &SettingsBag,
        descriptor: &'static EndpointDescriptor,
    ) -> Result<ToolRequest> {
        let tool = || descriptor.name.to_string();
        let secondary = inputs
            .secondary
            .as_ref()
            .ok_or_else(|| RequestError::MissingSecondary { tool: tool() })?;

        let mut request = single_request(&inputs.primary, settings, descriptor);
        match (&mut request.body, secondary) {
            (RequestBody::Multipart(form), ImageSource::File(overlay)) => {
                form.push_file(self.file_field, overlay.clone());
            }
            (RequestBody::Json(Value::Object(body)), ImageSource::Url(overlay)) => {
                body.insert(self.url_field.to_string(), Value::String(overlay.to_string()));
            }
            _ => return Err(RequestError::MixedModes { tool: tool() }),
        }
        Ok(request)
    }
}
