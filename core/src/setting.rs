//! Setting capability traits and their store-backed adapters.
//!
//! A setting is a projection of one store key. It caches nothing: the scope
//! flag and the value are re-read from the store on every access, so changes
//! made behind its back are always visible.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::store::{ConfigStore, SettingValue, ValueKind};

/// Capability contract shared by every configuration entry.
pub trait Setting {
    fn key(&self) -> &str;

    fn store(&self) -> &dyn ConfigStore;

    fn default_value(&self) -> SettingValue;

    fn is_runtime_modifiable(&self) -> bool {
        self.store().is_runtime_modifiable(self.key())
    }

    /// Key of the linked setting, `""` if none.
    fn paired_setting_key(&self) -> String {
        self.store().paired_setting_key(self.key())
    }

    fn is_switchable(&self) -> bool {
        self.store().is_switchable(self.key())
    }

    /// Whether the setting currently uses its global value.
    fn global(&self) -> bool {
        self.store().using_global(self.key())
    }

    fn set_global(&self, global: bool) {
        self.store().set_global(self.key(), global)
    }

    fn is_saveable(&self) -> bool {
        self.store().is_saveable(self.key())
    }

    /// Render the current value.
    ///
    /// With `needs_global` the global value is rendered even when the setting
    /// is in per-game scope.
    fn value_as_string(&self, needs_global: bool) -> String;

    /// Write the default value into the active scope.
    fn reset(&self);
}

/// A setting with typed access to its value.
pub trait TypedSetting<T>: Setting {
    fn get(&self, needs_global: bool) -> T;

    fn set(&self, value: T);
}

/// Rust types that can back a [`TypedSetting`].
pub trait SettingType: Sized + Clone + Default + fmt::Display {
    const KIND: ValueKind;

    fn from_value(value: SettingValue) -> Option<Self>;

    fn into_value(self) -> SettingValue;

    /// Parse the store's textual default.
    fn parse_default(s: &str) -> Option<Self> {
        SettingValue::parse(Self::KIND, s).and_then(Self::from_value)
    }
}

macro_rules! impl_setting_type {
    ($ty:ty, $variant:ident) => {
        impl SettingType for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_value(value: SettingValue) -> Option<Self> {
                match value {
                    SettingValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_value(self) -> SettingValue {
                SettingValue::$variant(self)
            }
        }
    };
}

impl_setting_type!(bool, Bool);
impl_setting_type!(u8, Byte);
impl_setting_type!(i16, Short);
impl_setting_type!(i32, Int);
impl_setting_type!(i64, Long);
impl_setting_type!(f32, Float);
impl_setting_type!(String, String);

/// Typed setting backed by a [`ConfigStore`] key.
///
/// Holds only the key and the store handle.
pub struct StoreSetting<T> {
    key: String,
    store: Arc<dyn ConfigStore>,
    _marker: PhantomData<fn() -> T>,
}

pub type BooleanSetting = StoreSetting<bool>;
pub type ByteSetting = StoreSetting<u8>;
pub type ShortSetting = StoreSetting<i16>;
pub type IntSetting = StoreSetting<i32>;
pub type LongSetting = StoreSetting<i64>;
pub type FloatSetting = StoreSetting<f32>;
pub type StringSetting = StoreSetting<String>;

impl<T: SettingType> StoreSetting<T> {
    pub fn new(key: impl Into<String>, store: Arc<dyn ConfigStore>) -> Self {
        Self {
            key: key.into(),
            store,
            _marker: PhantomData,
        }
    }

    /// Typed default, parsed from the store on every call.
    pub fn default_typed(&self) -> T {
        let raw = self.store.default_to_string(&self.key);
        T::parse_default(&raw).unwrap_or_else(|| {
            tracing::warn!(
                "Default '{}' of setting '{}' is not a {} value",
                raw,
                self.key,
                T::KIND
            );
            T::default()
        })
    }
}

impl<T> fmt::Debug for StoreSetting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSetting").field("key", &self.key).finish()
    }
}

impl<T: SettingType> Setting for StoreSetting<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    fn default_value(&self) -> SettingValue {
        self.default_typed().into_value()
    }

    fn value_as_string(&self, needs_global: bool) -> String {
        self.get(needs_global).to_string()
    }

    fn reset(&self) {
        self.set(self.default_typed());
    }
}

impl<T: SettingType> TypedSetting<T> for StoreSetting<T> {
    fn get(&self, needs_global: bool) -> T {
        match self.store.get_value(&self.key, needs_global) {
            Some(value) => T::from_value(value).unwrap_or_else(|| {
                tracing::warn!("Setting '{}' does not hold a {} value", self.key, T::KIND);
                self.default_typed()
            }),
            None => self.default_typed(),
        }
    }

    fn set(&self, value: T) {
        self.store.set_value(&self.key, value.into_value());
    }
}

/// Untyped setting whose kind is taken from the store's default.
///
/// Used where the key is only known at runtime, e.g. from the command line.
pub struct DynSetting {
    key: String,
    kind: ValueKind,
    store: Arc<dyn ConfigStore>,
}

impl DynSetting {
    /// Returns `None` if the store has no value for `key`.
    pub fn new(key: impl Into<String>, store: Arc<dyn ConfigStore>) -> Option<Self> {
        let key = key.into();
        let kind = store.get_value(&key, true)?.kind();
        Some(Self { key, kind, store })
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn get(&self, needs_global: bool) -> Option<SettingValue> {
        self.store.get_value(&self.key, needs_global)
    }

    /// Parse `text` as this setting's kind and store it.
    ///
    /// Returns the stored value, or `None` if the text does not parse.
    pub fn set_from_str(&self, text: &str) -> Option<SettingValue> {
        let value = SettingValue::parse(self.kind, text)?;
        self.store.set_value(&self.key, value.clone());
        Some(value)
    }
}

impl fmt::Debug for DynSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynSetting")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Setting for DynSetting {
    fn key(&self) -> &str {
        &self.key
    }

    fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    fn default_value(&self) -> SettingValue {
        let raw = self.store.default_to_string(&self.key);
        SettingValue::parse(self.kind, &raw).unwrap_or_else(|| {
            tracing::warn!("Default '{}' of setting '{}' does not parse", raw, self.key);
            // Fall back to whatever the store currently holds globally
            self.get(true).unwrap_or(SettingValue::String(raw))
        })
    }

    fn value_as_string(&self, needs_global: bool) -> String {
        self.get(needs_global)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    fn reset(&self) {
        self.store.set_value(&self.key, self.default_value());
    }
}
