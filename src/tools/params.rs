use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    DefaultValue, EndpointDescriptor, FrameSelection, ParamKind, ParamSpec, Result, ToolError,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Color(String),
    Text(String),
}

impl ParamValue {
    fn from_default(spec: &ParamSpec, default: DefaultValue) -> Self {
        match (spec.kind, default) {
            (ParamKind::Float, DefaultValue::Integer(value)) => Self::Float(value as f64),
            (_, DefaultValue::Integer(value)) => Self::Integer(value),
            (_, DefaultValue::Float(value)) => Self::Float(value),
            (_, DefaultValue::Bool(value)) => Self::Bool(value),
            (ParamKind::Color, DefaultValue::Str(value)) => Self::Color(value.to_string()),
            (_, DefaultValue::Str(value)) => Self::Text(value.to_string()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Integer(value) => Value::from(*value),
            Self::Float(value) => Value::from(*value),
            Self::Bool(value) => Value::Bool(*value),
            Self::Color(value) | Self::Text(value) => Value::String(value.clone()),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Color(value) | Self::Text(value) => formatter.write_str(value),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SettingsBag {
    values: BTreeMap<String, ParamValue>,
}

impl SettingsBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(descriptor: &EndpointDescriptor) -> Self {
        descriptor
            .params
            .iter()
            .filter_map(|spec| {
                spec.default
                    .map(|default| (spec.name.to_string(), ParamValue::from_default(spec, default)))
            })
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: SettingsBag) {
        self.values.extend(other.values);
    }

    pub fn validate(&self, descriptor: &EndpointDescriptor) -> Result<()> {
        for (name, value) in &self.values {
            let spec = lookup(descriptor, name)?;
            validate_value(spec, value)?;
        }
        Ok(())
    }

    /// Applies one `name=value` assignment, coercing by the declared kind.
    pub fn set_from_str(&mut self, descriptor: &EndpointDescriptor, assignment: &str) -> Result<()> {
        let (name, raw) = assignment
            .split_once('=')
            .ok_or_else(|| ToolError::InvalidAssignment(assignment.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ToolError::InvalidAssignment(assignment.to_string()));
        }
        let spec = lookup(descriptor, name)?;
        let value = coerce_str(spec, raw.trim())?;
        validate_value(spec, &value)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn from_json(descriptor: &EndpointDescriptor, object: &Map<String, Value>) -> Result<Self> {
        let mut bag = Self::new();
        for (name, raw) in object {
            let spec = lookup(descriptor, name)?;
            let value = coerce_json(spec, raw)?;
            validate_value(spec, &value)?;
            bag.values.insert(name.clone(), value);
        }
        Ok(bag)
    }
}

impl FromIterator<(String, ParamValue)> for SettingsBag {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn lookup(descriptor: &EndpointDescriptor, name: &str) -> Result<&'static ParamSpec> {
    descriptor.param(name).ok_or_else(|| ToolError::UnknownParam {
        tool: descriptor.name.to_string(),
        param: name.to_string(),
    })
}

fn invalid(spec: &ParamSpec, reason: impl Into<String>) -> ToolError {
    ToolError::InvalidValue {
        param: spec.name.to_string(),
        reason: reason.into(),
    }
}

fn coerce_str(spec: &ParamSpec, raw: &str) -> Result<ParamValue> {
    match spec.kind {
        ParamKind::Integer => raw
            .parse::<i64>()
            .map(ParamValue::Integer)
            .map_err(|_| invalid(spec, format!("`{raw}` is not an integer"))),
        ParamKind::Float => raw
            .parse::<f64>()
            .map(ParamValue::Float)
            .map_err(|_| invalid(spec, format!("`{raw}` is not a number"))),
        ParamKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(ParamValue::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(ParamValue::Bool(false)),
            _ => Err(invalid(spec, format!("`{raw}` is not a boolean"))),
        },
        ParamKind::Color if raw.starts_with('#') => Ok(ParamValue::Color(raw.to_string())),
        ParamKind::Color => Ok(ParamValue::Color(format!("#{raw}"))),
        ParamKind::Frames => Ok(ParamValue::from(&FrameSelection::parse(raw)?)),
        ParamKind::Text | ParamKind::Choice => Ok(ParamValue::Text(raw.to_string())),
    }
}

fn coerce_json(spec: &ParamSpec, raw: &Value) -> Result<ParamValue> {
    if let Value::String(text) = raw {
        return coerce_str(spec, text);
    }
    let value = match spec.kind {
        ParamKind::Integer => raw.as_i64().map(ParamValue::Integer).or_else(|| {
            raw.as_f64()
                .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                .map(|value| ParamValue::Integer(value as i64))
        }),
        ParamKind::Float => raw.as_f64().map(ParamValue::Float),
        ParamKind::Boolean => raw.as_bool().map(ParamValue::Bool),
        ParamKind::Text => raw.as_number().map(|number| ParamValue::Text(number.to_string())),
        ParamKind::Frames => match raw.as_array() {
            Some(items) => {
                let frames = items
                    .iter()
                    .map(|item| {
                        item.as_u64()
                            .and_then(|frame| u32::try_from(frame).ok())
                            .ok_or_else(|| ToolError::InvalidFrames(format!("`{item}` is not a frame index")))
                    })
                    .collect::<Result<FrameSelection>>()?;
                Some(ParamValue::from(&frames))
            }
            None => None,
        },
        ParamKind::Color | ParamKind::Choice => None,
    };
    value.ok_or_else(|| invalid(spec, format!("expected a {} value, got `{raw}`", spec.kind.label())))
}

fn validate_value(spec: &ParamSpec, value: &ParamValue) -> Result<()> {
    match (spec.kind, value) {
        (ParamKind::Integer, ParamValue::Integer(_))
        | (ParamKind::Float, ParamValue::Integer(_) | ParamValue::Float(_)) => {
            check_range(spec, value.as_f64().unwrap_or_default())
        }
        (ParamKind::Boolean, ParamValue::Bool(_)) | (ParamKind::Text, ParamValue::Text(_)) => Ok(()),
        (ParamKind::Color, ParamValue::Color(color)) => {
            if is_hex_color(color) {
                Ok(())
            } else {
                Err(invalid(spec, format!("`{color}` is not a #RGB or #RRGGBB colour")))
            }
        }
        (ParamKind::Choice, ParamValue::Text(choice)) => {
            if spec.options.contains(&choice.as_str()) {
                Ok(())
            } else {
                Err(invalid(
                    spec,
                    format!("`{choice}` is not one of: {}", spec.options.join(", ")),
                ))
            }
        }
        (ParamKind::Frames, ParamValue::Text(frames)) => FrameSelection::parse(frames).map(|_| ()),
        (kind, other) => Err(invalid(
            spec,
            format!("expected a {} value, got `{other}`", kind.label()),
        )),
    }
}

fn check_range(spec: &ParamSpec, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid(spec, "must be a finite number"));
    }
    let below = spec.min.is_some_and(|min| value < min);
    let above = spec.max.is_some_and(|max| value > max);
    if below || above {
        return Err(ToolError::OutOfRange {
            param: spec.name.to_string(),
            value,
            min: spec.min.unwrap_or(f64::NEG_INFINITY),
            max: spec.max.unwrap_or(f64::INFINITY),
        });
    }
    Ok(())
}
