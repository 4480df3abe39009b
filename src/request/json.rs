use std::collections::BTreeSet;

use serde_json::{Map, Value};
use url::Url;

use crate::tools::{EndpointDescriptor, SettingsBag, URL_FIELD};

use super::builder::ordered_settings;

pub fn build_json(url: &Url, settings: &SettingsBag, descriptor: &EndpointDescriptor) -> Value {
    let mut body = Map::new();
    body.insert(URL_FIELD.to_string(), Value::String(url.to_string()));
    for (name, value) in ordered_settings(settings, descriptor) {
        body.insert(name.to_string(), value.to_json());
    }
    Value::Object(body)
}

pub fn json_setting_names<'a>(body: &'a Value, image_keys: &[&str]) -> BTreeSet<&'a str> {
    body.as_object()
        .map(|object| {
            object
                .keys()
                .map(String::as_str)
                .filter(|key| !image_keys.contains(key))
                .collect()
        })
        .unwrap_or_default()
}
