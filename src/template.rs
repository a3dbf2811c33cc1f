use std::fmt;
use std::str::FromStr;

use crate::channel_map::ChannelMap;

/// A channel slot in a packed image's plane stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    R,
    G,
    B,
    A,
}

impl Slot {
    /// All slots in plane order.
    pub const ALL: [Slot; 4] = [Slot::R, Slot::G, Slot::B, Slot::A];

    /// Plane index within a packed RGB/RGBA image.
    pub fn index(self) -> usize {
        match self {
            Slot::R => 0,
            Slot::G => 1,
            Slot::B => 2,
            Slot::A => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::R => "R",
            Slot::G => "G",
            Slot::B => "B",
            Slot::A => "A",
        }
    }
}

impl FromStr for Slot {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(Slot::R),
            "G" => Ok(Slot::G),
            "B" => Ok(Slot::B),
            "A" => Ok(Slot::A),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named assignment of texture map types to RGBA channel slots.
///
/// Unassigned slots stay empty and produce no plane when packing. Templates
/// are value objects: equality is structural and nothing mutates them after
/// construction.
///
/// ```
/// use chanpack::{ChannelMap, PackingTemplate, Slot};
/// # fn main() -> chanpack::Result<()> {
/// let orm = PackingTemplate::new("ORM", "Occlusion-Roughness-Metallic")
///     .with_channel(Slot::R, ChannelMap::new("ambient_occlusion", 1.0)?)
///     .with_channel(Slot::G, ChannelMap::new("roughness", 0.5)?)
///     .with_channel(Slot::B, ChannelMap::new("metallic", 0.0)?);
/// assert!(!orm.is_rgba());
/// assert_eq!(orm.used_channels().len(), 3);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PackingTemplate {
    pub name: String,
    pub description: String,
    channels: [Option<ChannelMap>; 4],
}

impl PackingTemplate {
    /// Creates a template with all four slots unassigned.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            channels: [None, None, None, None],
        }
    }

    /// Assigns a channel map to a slot (builder style).
    pub fn with_channel(mut self, slot: Slot, map: ChannelMap) -> Self {
        self.channels[slot.index()] = Some(map);
        self
    }

    /// The channel map assigned to `slot`, or `None` for an unused slot.
    pub fn channel(&self, slot: Slot) -> Option<&ChannelMap> {
        self.channels[slot.index()].as_ref()
    }

    pub fn is_channel_used(&self, slot: Slot) -> bool {
        self.channels[slot.index()].is_some()
    }

    /// True when the template assigns the alpha slot, i.e. packing with it
    /// produces an RGBA image.
    pub fn is_rgba(&self) -> bool {
        self.is_channel_used(Slot::A)
    }

    /// The assigned slots in R, G, B, A order.
    pub fn used_channels(&self) -> Vec<(Slot, &ChannelMap)> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.channel(slot).map(|map| (slot, map)))
            .collect()
    }
}

impl fmt::Display for PackingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self
            .used_channels()
            .into_iter()
            .map(|(slot, map)| format!("{} ({})", slot, map.map_type()))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}: {}\nChannels: {}", self.name, self.description, channels)
    }
}
