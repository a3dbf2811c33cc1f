//! Template JSON load/save.
//!
//! Document shape:
//! ```json
//! {
//!   "name": "ORM",
//!   "description": "Occlusion-Roughness-Metallic",
//!   "channels": {
//!     "R": { "type": "ambient_occlusion", "default": 1.0 },
//!     "G": { "type": "roughness", "default": 0.5 },
//!     "B": { "type": "metallic", "default": 0.0 }
//!   }
//! }
//! ```
//! Malformed JSON syntax surfaces as `Json`; schema violations surface as
//! `TemplateValidation` with a message naming the offending field.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::channel_map::ChannelMap;
use crate::error::{ChanPackError, Result};
use crate::template::{PackingTemplate, Slot};

/// Parses a template from a JSON document string.
pub fn template_from_json(text: &str) -> Result<PackingTemplate> {
    let data: Value = serde_json::from_str(text)?;

    let Value::Object(obj) = data else {
        return Err(ChanPackError::TemplateValidation(
            "template document must be a JSON object".into(),
        ));
    };

    let name = require_string(&obj, "name")?;
    let description = require_string(&obj, "description")?;

    let mut template = PackingTemplate::new(name, description);

    match obj.get("channels") {
        None => {}
        Some(Value::Object(channels)) => {
            for (key, entry) in channels {
                let slot: Slot = key.parse().map_err(|_| {
                    ChanPackError::TemplateValidation(format!(
                        "invalid channel key '{key}': valid keys are R, G, B, A"
                    ))
                })?;
                if let Some(map) = parse_channel(slot, entry)? {
                    template = template.with_channel(slot, map);
                }
            }
        }
        Some(other) => {
            return Err(ChanPackError::TemplateValidation(format!(
                "'channels' must be an object, got {}",
                type_name(other)
            )));
        }
    }

    Ok(template)
}

/// Serialized document shape. Field order here fixes the on-disk key order;
/// `channels` relies on serde_json's `preserve_order` feature for R,G,B,A.
#[derive(Serialize)]
struct TemplateDoc<'a> {
    name: &'a str,
    description: &'a str,
    channels: Map<String, Value>,
}

#[derive(Serialize)]
struct ChannelDoc<'a> {
    #[serde(rename = "type")]
    map_type: &'a str,
    default: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Serializes a template to a pretty-printed JSON document.
///
/// Keys appear in `name`, `description`, `channels` order with slots in
/// R,G,B,A order. Unused slots and auto-derived channel descriptions are
/// omitted; the document ends with a trailing newline.
pub fn template_to_json(template: &PackingTemplate) -> String {
    let mut channels = Map::new();
    for (slot, map) in template.used_channels() {
        let entry = ChannelDoc {
            map_type: map.map_type(),
            default: map.default_value(),
            description: (!map.has_auto_description()).then(|| map.description()),
        };
        let value = serde_json::to_value(entry)
            .unwrap_or_else(|_| unreachable!("channel entries contain no non-serializable values"));
        channels.insert(slot.as_str().into(), value);
    }

    let doc = TemplateDoc {
        name: &template.name,
        description: &template.description,
        channels,
    };
    let mut text = serde_json::to_string_pretty(&doc)
        .unwrap_or_else(|_| unreachable!("template documents contain no non-serializable values"));
    text.push('\n');
    text
}

/// Loads a template from a JSON file.
///
/// Fails with `NotFound` when the file does not exist; read failures surface
/// as `Io`, syntax errors as `Json`, schema violations as
/// `TemplateValidation`.
pub fn load_template(path: impl AsRef<Path>) -> Result<PackingTemplate> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ChanPackError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let template = template_from_json(&text).map_err(|e| match e {
        ChanPackError::TemplateValidation(msg) => ChanPackError::TemplateValidation(format!(
            "template file '{}': {msg}",
            path.display()
        )),
        other => other,
    })?;
    debug!(template = %template.name, path = %path.display(), "loaded template");
    Ok(template)
}

/// Saves a template as pretty-printed JSON, creating parent directories as
/// needed.
pub fn save_template(template: &PackingTemplate, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, template_to_json(template))?;
    debug!(template = %template.name, path = %path.display(), "saved template");
    Ok(())
}

/// Validates a template file without keeping the result.
pub fn validate_template_file(path: impl AsRef<Path>) -> Result<()> {
    load_template(path).map(|_| ())
}

fn parse_channel(slot: Slot, entry: &Value) -> Result<Option<ChannelMap>> {
    let entry = match entry {
        Value::Null => return Ok(None),
        Value::Object(obj) => obj,
        other => {
            return Err(ChanPackError::TemplateValidation(format!(
                "channel '{slot}' must be an object or null, got {}",
                type_name(other)
            )));
        }
    };

    let map_type = match entry.get("type") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(ChanPackError::TemplateValidation(format!(
                "channel '{slot}' field 'type' must be a string, got {}",
                type_name(other)
            )));
        }
        None => {
            return Err(ChanPackError::TemplateValidation(format!(
                "channel '{slot}' missing required field: 'type'"
            )));
        }
    };

    let default = match entry.get("default") {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
            ChanPackError::TemplateValidation(format!(
                "channel '{slot}' field 'default' is not a finite number"
            ))
        })?,
        Some(other) => {
            return Err(ChanPackError::TemplateValidation(format!(
                "channel '{slot}' field 'default' must be a number, got {}",
                type_name(other)
            )));
        }
        None => {
            return Err(ChanPackError::TemplateValidation(format!(
                "channel '{slot}' missing required field: 'default'"
            )));
        }
    };

    let mut map = ChannelMap::new(map_type, default as f32).map_err(|e| {
        ChanPackError::TemplateValidation(format!("invalid channel data for '{slot}': {e}"))
    })?;

    match entry.get("description") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) => map = map.with_description(s.clone()),
        Some(other) => {
            return Err(ChanPackError::TemplateValidation(format!(
                "channel '{slot}' field 'description' must be a string, got {}",
                type_name(other)
            )));
        }
    }

    Ok(Some(map))
}

fn require_string(obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ChanPackError::TemplateValidation(format!(
            "field '{field}' must be a string, got {}",
            type_name(other)
        ))),
        None => Err(ChanPackError::TemplateValidation(format!(
            "missing required field: '{field}'"
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
