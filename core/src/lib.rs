//! Emulator settings layer
//!
//! Binds UI-facing settings to an external configuration store.
//!
//! # Architecture
//!
//! - [`ConfigStore`] / [`InputStore`] - Contracts of the external stores
//! - [`MemoryStore`] - In-memory store with global and per-game scope
//! - [`Setting`] / [`TypedSetting`] - Capability traits, backed by [`StoreSetting`]
//! - [`InputSetting`] - Stick, modifier and button bindings
//! - [`persist`] - TOML persistence of the store

pub mod input;
pub mod memory;
pub mod persist;
pub mod registry;
pub mod setting;
pub mod store;

pub use emucfg_shared::{AnalogDirection, InputType, NativeAnalog, NativeButton, ParamPackage};

pub use input::{
    AnalogInputSetting, ButtonInputSetting, InputSetting, ModifierInputSetting, StickBinding,
};
pub use memory::{MemoryStore, SettingDescriptor};
pub use persist::{ConfigError, ConfigFile, PlayerInput};
pub use registry::SettingsRegistry;
pub use setting::{
    BooleanSetting, ByteSetting, DynSetting, FloatSetting, IntSetting, LongSetting, Setting,
    SettingType, ShortSetting, StoreSetting, StringSetting, TypedSetting,
};
pub use store::{ConfigStore, InputStore, SettingValue, ValueKind};
