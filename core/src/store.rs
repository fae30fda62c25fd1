//! Contracts of the external configuration and input stores.
//!
//! Settings never own state: every read and write goes through one of these
//! traits, keyed by the setting key (or player/control for input bindings).
//! Implementations are expected to serialize their own access.

use std::fmt;

use emucfg_shared::{NativeAnalog, NativeButton, ParamPackage};
use serde::{Deserialize, Serialize};

/// Type tag of a [`SettingValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Byte => "byte",
            ValueKind::Short => "short",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        };
        f.pad(name)
    }
}

/// Dynamically-typed setting value as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    String(String),
}

impl SettingValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Bool(_) => ValueKind::Bool,
            SettingValue::Byte(_) => ValueKind::Byte,
            SettingValue::Short(_) => ValueKind::Short,
            SettingValue::Int(_) => ValueKind::Int,
            SettingValue::Long(_) => ValueKind::Long,
            SettingValue::Float(_) => ValueKind::Float,
            SettingValue::String(_) => ValueKind::String,
        }
    }

    /// Parse the textual form of a value of the given kind.
    ///
    /// This is the inverse of the `Display` impl.
    pub fn parse(kind: ValueKind, s: &str) -> Option<Self> {
        let s_trim = s.trim();
        Some(match kind {
            ValueKind::Bool => SettingValue::Bool(s_trim.parse().ok()?),
            ValueKind::Byte => SettingValue::Byte(s_trim.parse().ok()?),
            ValueKind::Short => SettingValue::Short(s_trim.parse().ok()?),
            ValueKind::Int => SettingValue::Int(s_trim.parse().ok()?),
            ValueKind::Long => SettingValue::Long(s_trim.parse().ok()?),
            ValueKind::Float => SettingValue::Float(s_trim.parse().ok()?),
            ValueKind::String => SettingValue::String(s.to_string()),
        })
    }

    /// Convert to a TOML value for persistence.
    pub fn to_toml(&self) -> toml::Value {
        match self {
            SettingValue::Bool(v) => toml::Value::Boolean(*v),
            SettingValue::Byte(v) => toml::Value::Integer(i64::from(*v)),
            SettingValue::Short(v) => toml::Value::Integer(i64::from(*v)),
            SettingValue::Int(v) => toml::Value::Integer(i64::from(*v)),
            SettingValue::Long(v) => toml::Value::Integer(*v),
            // Shortest f32 text, so 0.1 is written as 0.1
            SettingValue::Float(v) => {
                toml::Value::Float(v.to_string().parse().unwrap_or_else(|_| f64::from(*v)))
            }
            SettingValue::String(v) => toml::Value::String(v.clone()),
        }
    }

    /// Convert a TOML value back, checking it fits `kind`.
    ///
    /// Integers are range-checked; floats accept integer literals.
    pub fn from_toml(kind: ValueKind, value: &toml::Value) -> Option<Self> {
        Some(match (kind, value) {
            (ValueKind::Bool, toml::Value::Boolean(v)) => SettingValue::Bool(*v),
            (ValueKind::Byte, toml::Value::Integer(v)) => {
                SettingValue::Byte(u8::try_from(*v).ok()?)
            }
            (ValueKind::Short, toml::Value::Integer(v)) => {
                SettingValue::Short(i16::try_from(*v).ok()?)
            }
            (ValueKind::Int, toml::Value::Integer(v)) => SettingValue::Int(i32::try_from(*v).ok()?),
            (ValueKind::Long, toml::Value::Integer(v)) => SettingValue::Long(*v),
            (ValueKind::Float, toml::Value::Float(v)) => SettingValue::Float(*v as f32),
            (ValueKind::Float, toml::Value::Integer(v)) => SettingValue::Float(*v as f32),
            (ValueKind::String, toml::Value::String(v)) => SettingValue::String(v.clone()),
            _ => return None,
        })
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(v) => write!(f, "{v}"),
            SettingValue::Byte(v) => write!(f, "{v}"),
            SettingValue::Short(v) => write!(f, "{v}"),
            SettingValue::Int(v) => write!(f, "{v}"),
            SettingValue::Long(v) => write!(f, "{v}"),
            SettingValue::Float(v) => write!(f, "{v}"),
            SettingValue::String(v) => f.write_str(v),
        }
    }
}

/// Key-value configuration store holding setting values and their metadata.
///
/// Behavior for keys the store does not know is up to the implementation.
pub trait ConfigStore: Send + Sync {
    /// Whether the value may change while a game is running.
    fn is_runtime_modifiable(&self, key: &str) -> bool;

    /// Key of the setting this one is linked to, or `""`.
    fn paired_setting_key(&self, key: &str) -> String;

    /// Whether the setting may switch between global and per-game scope.
    fn is_switchable(&self, key: &str) -> bool;

    /// Whether the setting currently resolves to its global value.
    fn using_global(&self, key: &str) -> bool;

    fn set_global(&self, key: &str, global: bool);

    /// Whether the value persists across sessions.
    fn is_saveable(&self, key: &str) -> bool;

    /// Textual form of the default value.
    fn default_to_string(&self, key: &str) -> String;

    /// Read a value.
    ///
    /// With `needs_global` the global-scope value is returned regardless of
    /// the current scope flag; otherwise whichever scope is active.
    fn get_value(&self, key: &str, needs_global: bool) -> Option<SettingValue>;

    /// Write a value into the active scope.
    fn set_value(&self, key: &str, value: SettingValue);
}

/// Per-player input binding store.
///
/// A control with no binding reads back as an empty package.
pub trait InputStore: Send + Sync {
    fn stick_param(&self, player: usize, analog: NativeAnalog) -> ParamPackage;

    /// Replace the whole stick package.
    fn set_stick_param(&self, player: usize, analog: NativeAnalog, param: ParamPackage);

    fn button_param(&self, player: usize, button: NativeButton) -> ParamPackage;

    /// Replace the whole button package.
    fn set_button_param(&self, player: usize, button: NativeButton, param: ParamPackage);
}
