//! Configuration surface: user-facing options, the screen profile, and the
//! durable store the visibility flags persist through.

mod core;
mod store;

pub use self::core::{ConfigKey, OutlineColor, ScreenProfile, ShadingPalette, StorageConfig};
pub use store::{ConfigError, ConfigStore, JsonFileStore, MemoryStore};
