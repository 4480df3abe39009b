use serde::Serialize;

pub const API_PREFIX: &str = "/api/v1";

pub const FILE_FIELD: &str = "file";

pub const URL_FIELD: &str = "image_url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    File,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Integer,
    Float,
    Boolean,
    Color,
    Text,
    Choice,
    Frames,
}

impl ParamKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Color => "colour",
            Self::Text => "text",
            Self::Choice => "choice",
            Self::Frames => "frame list",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl ParamSpec {
    pub const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            min: None,
            max: None,
            options: &[],
            default: None,
        }
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub const fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }
}

fn has_no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecondaryInput {
    pub file_field: &'static str,
    pub url_field: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Image,
    Archive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub method: &'static str,
    pub params: &'static [ParamSpec],
    pub samples: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondaryInput>,
    pub output: OutputKind,
}

impl EndpointDescriptor {
    pub fn file_path(&self) -> String {
        format!("{API_PREFIX}/{}", self.name)
    }

    pub fn url_path(&self) -> String {
        format!("{API_PREFIX}/{}-by-url", self.name)
    }

    pub fn path(&self, mode: InputMode) -> String {
        match mode {
            InputMode::File => self.file_path(),
            InputMode::Url => self.url_path(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn param_names(&self) -> Vec<&'static str> {
        self.params.iter().map(|param| param.name).collect()
    }
}
