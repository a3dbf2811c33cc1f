//! Core library for packing grayscale texture maps into RGBA channels.
//!
//! - `pack_channels` composes up to four single-channel buffers into one RGB/RGBA image
//! - `pack_texture_from_template` drives composition from a named `PackingTemplate`
//! - `unpack_texture` / `extract_channel` invert the process
//! - Templates load/save as small JSON documents
//!
//! Quick example:
//! ```ignore
//! use chanpack::prelude::*;
//! use std::collections::HashMap;
//! # fn main() -> chanpack::Result<()> {
//! let orm = load_template("templates/orm.json")?;
//! let mut textures: HashMap<String, TextureSource> = HashMap::new();
//! textures.insert("ambient_occlusion".into(), "textures/ao.png".into());
//! textures.insert("roughness".into(), "textures/rough.png".into());
//! let packed = pack_texture_from_template(&textures, &orm)?;
//! let channels = unpack_texture(&packed, &orm)?;
//! println!("unpacked {} channels", channels.len());
//! # Ok(()) }
//! ```

pub mod channel_map;
pub mod error;
pub mod io;
pub mod pack;
pub mod template;
pub mod template_io;
pub mod unpack;
pub mod validator;

pub use channel_map::*;
pub use error::*;
pub use io::*;
pub use pack::*;
pub use template::*;
pub use template_io::*;
pub use unpack::*;
pub use validator::*;

/// Convenience prelude for common types and functions.
/// Importing `chanpack::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::channel_map::{ChannelMap, builtin_channels};
    pub use crate::error::{ChanPackError, Result};
    pub use crate::pack::{
        DEFAULT_RESOLUTION, TextureSource, create_default_channel, normalize_resolution,
        pack_channels, pack_texture_from_template,
    };
    pub use crate::template::{PackingTemplate, Slot};
    pub use crate::template_io::{load_template, save_template, template_from_json, template_to_json};
    pub use crate::unpack::{AUTO_ALPHA_KEY, extract_channel, unpack_texture};
}
