use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{ChanPackError, Result};

/// One texture-map semantic (e.g. roughness) and the constant used to fill
/// its channel when no source texture is supplied.
///
/// Immutable after construction; `default_value` is validated to [0.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMap {
    map_type: String,
    default_value: f32,
    description: String,
}

impl ChannelMap {
    /// Creates a channel map with an auto-derived description
    /// (`"ambient_occlusion"` -> `"Ambient Occlusion"`).
    ///
    /// Fails with `InvalidConfig` when `default_value` is outside [0.0, 1.0].
    pub fn new(map_type: impl Into<String>, default_value: f32) -> Result<Self> {
        let map_type = map_type.into();
        if !(0.0..=1.0).contains(&default_value) {
            return Err(ChanPackError::InvalidConfig(format!(
                "default_value must be between 0.0 and 1.0, got {default_value}"
            )));
        }
        let description = auto_description(&map_type);
        Ok(Self {
            map_type,
            default_value,
            description,
        })
    }

    /// Replaces the auto-derived description with an explicit one.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn map_type(&self) -> &str {
        &self.map_type
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// True when the description is exactly the auto-derived one.
    /// The template saver omits such descriptions from JSON output.
    pub fn has_auto_description(&self) -> bool {
        self.description == auto_description(&self.map_type)
    }

    /// Scales `default_value` to the 8-bit range using truncate-toward-zero
    /// conversion: `(v * 255.0) as u8`, so 0.5 -> 127 (not 128).
    ///
    /// Existing packed assets were produced with this exact policy; changing
    /// it to nearest-rounding would shift default-filled planes by one level.
    pub fn default_fill_value(&self) -> u8 {
        scale_unit_truncating(self.default_value)
    }
}

/// Truncate-toward-zero scaling from the unit interval to 8-bit.
/// The single definition of the default-fill rounding policy.
pub(crate) fn scale_unit_truncating(value: f32) -> u8 {
    (value * 255.0) as u8
}

impl fmt::Display for ChannelMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (default: {})", self.description, self.default_value)
    }
}

/// Derives a human-readable description from a map type: underscores become
/// spaces and each word is title-cased.
pub fn auto_description(map_type: &str) -> String {
    map_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Well-known channel types with conventional default fill values, keyed by
/// map type. Built once on first use.
pub fn builtin_channels() -> &'static BTreeMap<&'static str, ChannelMap> {
    static TABLE: OnceLock<BTreeMap<&'static str, ChannelMap>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let entries = [
            ("ambient_occlusion", 1.0),
            ("roughness", 0.5),
            ("metallic", 0.0),
            ("displacement", 0.5),
            ("height", 0.5),
            ("opacity", 1.0),
            ("alpha", 1.0),
        ];
        entries
            .into_iter()
            .map(|(name, default)| {
                let map = ChannelMap::new(name, default)
                    .unwrap_or_else(|_| unreachable!("builtin defaults are in [0, 1]"));
                (name, map)
            })
            .collect()
    })
}
