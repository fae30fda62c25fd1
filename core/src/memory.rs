//! In-memory configuration and input store.
//!
//! Each setting keeps a global value and an optional per-game value. The
//! `using_global` flag picks which one reads and writes resolve to.

use std::sync::{Mutex, MutexGuard, PoisonError};

use emucfg_shared::{NativeAnalog, NativeButton, ParamPackage};
use hashbrown::HashMap;

use crate::store::{ConfigStore, InputStore, SettingValue};

/// Static description of a setting: its key, default and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDescriptor {
    pub key: String,
    pub default: SettingValue,
    pub runtime_modifiable: bool,
    pub paired_key: Option<String>,
    pub switchable: bool,
    pub saveable: bool,
}

impl SettingDescriptor {
    /// New descriptor: not runtime-modifiable, switchable, saveable, unpaired.
    pub fn new(key: impl Into<String>, default: SettingValue) -> Self {
        Self {
            key: key.into(),
            default,
            runtime_modifiable: false,
            paired_key: None,
            switchable: true,
            saveable: true,
        }
    }

    pub fn runtime_modifiable(mut self, value: bool) -> Self {
        self.runtime_modifiable = value;
        self
    }

    pub fn paired_with(mut self, key: impl Into<String>) -> Self {
        self.paired_key = Some(key.into());
        self
    }

    pub fn switchable(mut self, value: bool) -> Self {
        self.switchable = value;
        self
    }

    pub fn saveable(mut self, value: bool) -> Self {
        self.saveable = value;
        self
    }
}

#[derive(Debug, Clone)]
struct Entry {
    descriptor: SettingDescriptor,
    global: SettingValue,
    local: Option<SettingValue>,
    using_global: bool,
}

impl Entry {
    fn new(descriptor: SettingDescriptor) -> Self {
        Self {
            global: descriptor.default.clone(),
            descriptor,
            local: None,
            using_global: true,
        }
    }

    fn resolve(&self, needs_global: bool) -> &SettingValue {
        if needs_global || self.using_global {
            return &self.global;
        }
        self.local.as_ref().unwrap_or(&self.global)
    }
}

#[derive(Debug, Default)]
struct Inner {
    settings: HashMap<String, Entry>,
    sticks: HashMap<(usize, NativeAnalog), ParamPackage>,
    buttons: HashMap<(usize, NativeButton), ParamPackage>,
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a setting at its default value.
    ///
    /// Re-registering a key replaces its descriptor and resets its values.
    pub fn register(&self, descriptor: SettingDescriptor) {
        let key = descriptor.key.clone();
        if self
            .lock()
            .settings
            .insert(key.clone(), Entry::new(descriptor))
            .is_some()
        {
            tracing::debug!("Setting '{}' re-registered", key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().settings.contains_key(key)
    }

    pub fn descriptor(&self, key: &str) -> Option<SettingDescriptor> {
        self.lock().settings.get(key).map(|e| e.descriptor.clone())
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().settings.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Overwrite the global value regardless of the active scope.
    ///
    /// Returns `false` if the key is unknown or the value has the wrong kind.
    pub fn set_global_value(&self, key: &str, value: SettingValue) -> bool {
        let mut inner = self.lock();
        let Some(entry) = inner.settings.get_mut(key) else {
            tracing::warn!("Ignoring write to unknown setting '{}'", key);
            return false;
        };
        if entry.descriptor.default.kind() != value.kind() {
            tracing::warn!(
                "Ignoring {} value for {} setting '{}'",
                value.kind(),
                entry.descriptor.default.kind(),
                key
            );
            return false;
        }
        entry.global = value;
        true
    }

    /// Install a per-game value and switch the setting to local scope.
    ///
    /// Returns `false` if the key is unknown, not switchable, or the value
    /// has the wrong kind.
    pub fn set_local_value(&self, key: &str, value: SettingValue) -> bool {
        let mut inner = self.lock();
        let Some(entry) = inner.settings.get_mut(key) else {
            tracing::warn!("Ignoring write to unknown setting '{}'", key);
            return false;
        };
        if !entry.descriptor.switchable {
            tracing::warn!("Setting '{}' is not switchable, keeping it global", key);
            return false;
        }
        if entry.descriptor.default.kind() != value.kind() {
            tracing::warn!(
                "Ignoring {} value for {} setting '{}'",
                value.kind(),
                entry.descriptor.default.kind(),
                key
            );
            return false;
        }
        entry.local = Some(value);
        entry.using_global = false;
        true
    }

    /// Per-game values of every setting currently in local scope, sorted by key.
    pub fn local_values(&self) -> Vec<(String, SettingValue)> {
        let inner = self.lock();
        let mut values: Vec<_> = inner
            .settings
            .iter()
            .filter(|(_, e)| !e.using_global)
            .filter_map(|(k, e)| e.local.clone().map(|v| (k.clone(), v)))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        values
    }

    /// Drop every per-game value and return all settings to global scope.
    pub fn clear_local(&self) {
        let mut inner = self.lock();
        for entry in inner.settings.values_mut() {
            entry.local = None;
            entry.using_global = true;
        }
    }

    /// Every non-empty stick binding as `(player, analog, package)`.
    pub fn stick_bindings(&self) -> Vec<(usize, NativeAnalog, ParamPackage)> {
        let inner = self.lock();
        let mut out: Vec<_> = inner
            .sticks
            .iter()
            .filter(|(_, p)| !p.is_empty())
            .map(|(&(player, analog), p)| (player, analog, p.clone()))
            .collect();
        out.sort_by_key(|(player, analog, _)| (*player, analog.index()));
        out
    }

    /// Every non-empty button binding as `(player, button, package)`.
    pub fn button_bindings(&self) -> Vec<(usize, NativeButton, ParamPackage)> {
        let inner = self.lock();
        let mut out: Vec<_> = inner
            .buttons
            .iter()
            .filter(|(_, p)| !p.is_empty())
            .map(|(&(player, button), p)| (player, button, p.clone()))
            .collect();
        out.sort_by_key(|(player, button, _)| (*player, button.index()));
        out
    }

    fn with_entry<R>(&self, key: &str, default: R, f: impl FnOnce(&Entry) -> R) -> R {
        match self.lock().settings.get(key) {
            Some(entry) => f(entry),
            None => {
                tracing::warn!("Unknown setting '{}'", key);
                default
            }
        }
    }
}

impl ConfigStore for MemoryStore {
    fn is_runtime_modifiable(&self, key: &str) -> bool {
        self.with_entry(key, false, |e| e.descriptor.runtime_modifiable)
    }

    fn paired_setting_key(&self, key: &str) -> String {
        self.with_entry(key, String::new(), |e| {
            e.descriptor.paired_key.clone().unwrap_or_default()
        })
    }

    fn is_switchable(&self, key: &str) -> bool {
        self.with_entry(key, false, |e| e.descriptor.switchable)
    }

    fn using_global(&self, key: &str) -> bool {
        self.with_entry(key, true, |e| e.using_global)
    }

    fn set_global(&self, key: &str, global: bool) {
        let mut inner = self.lock();
        let Some(entry) = inner.settings.get_mut(key) else {
            tracing::warn!("Cannot change scope of unknown setting '{}'", key);
            return;
        };
        if global {
            entry.using_global = true;
            return;
        }
        if !entry.descriptor.switchable {
            tracing::warn!("Setting '{}' is not switchable, keeping it global", key);
            return;
        }
        if entry.local.is_none() {
            entry.local = Some(entry.global.clone());
        }
        entry.using_global = false;
    }

    fn is_saveable(&self, key: &str) -> bool {
        self.with_entry(key, false, |e| e.descriptor.saveable)
    }

    fn default_to_string(&self, key: &str) -> String {
        self.with_entry(key, String::new(), |e| e.descriptor.default.to_string())
    }

    fn get_value(&self, key: &str, needs_global: bool) -> Option<SettingValue> {
        self.with_entry(key, None, |e| Some(e.resolve(needs_global).clone()))
    }

    fn set_value(&self, key: &str, value: SettingValue) {
        let mut inner = self.lock();
        let Some(entry) = inner.settings.get_mut(key) else {
            tracing::warn!("Ignoring write to unknown setting '{}'", key);
            return;
        };
        if entry.descriptor.default.kind() != value.kind() {
            tracing::warn!(
                "Ignoring {} value for {} setting '{}'",
                value.kind(),
                entry.descriptor.default.kind(),
                key
            );
            return;
        }
        if entry.using_global {
            entry.global = value;
        } else {
            entry.local = Some(value);
        }
    }
}

impl InputStore for MemoryStore {
    fn stick_param(&self, player: usize, analog: NativeAnalog) -> ParamPackage {
        self.lock()
            .sticks
            .get(&(player, analog))
            .cloned()
            .unwrap_or_default()
    }

    fn set_stick_param(&self, player: usize, analog: NativeAnalog, param: ParamPackage) {
        tracing::debug!("Player {} {:?} bound to '{}'", player, analog, param);
        self.lock().sticks.insert((player, analog), param);
    }

    fn button_param(&self, player: usize, button: NativeButton) -> ParamPackage {
        self.lock()
            .buttons
            .get(&(player, button))
            .cloned()
            .unwrap_or_default()
    }

    fn set_button_param(&self, player: usize, button: NativeButton, param: ParamPackage) {
        tracing::debug!("Player {} {:?} bound to '{}'", player, button, param);
        self.lock().buttons.insert((player, button), param);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.register(
            SettingDescriptor::new("volume", SettingValue::Byte(100)).runtime_modifiable(true),
        );
        store.register(
            SettingDescriptor::new("device_name", SettingValue::String("Emulator".into()))
                .switchable(false),
        );
        store.register(
            SettingDescriptor::new("speed_limit", SettingValue::Short(100))
                .paired_with("use_speed_limit"),
        );
        store.register(SettingDescriptor::new("use_speed_limit", SettingValue::Bool(true)));
        store
    }

    #[test]
    fn metadata_comes_from_descriptor() {
        let store = store();
        assert!(store.is_runtime_modifiable("volume"));
        assert!(!store.is_runtime_modifiable("speed_limit"));
        assert_eq!(store.paired_setting_key("speed_limit"), "use_speed_limit");
        assert_eq!(store.paired_setting_key("volume"), "");
        assert!(!store.is_switchable("device_name"));
        assert!(store.is_saveable("volume"));
        assert_eq!(store.default_to_string("volume"), "100");
    }

    #[test]
    fn unknown_key_answers_neutral_values() {
        let store = store();
        assert!(!store.is_switchable("nope"));
        assert!(store.using_global("nope"));
        assert_eq!(store.get_value("nope", false), None);
        store.set_value("nope", SettingValue::Bool(true));
        assert!(!store.contains("nope"));
    }

    #[test]
    fn writes_follow_active_scope() {
        let store = store();
        store.set_value("volume", SettingValue::Byte(50));
        store.set_global("volume", false);
        // Local scope is seeded from the global value
        assert_eq!(store.get_value("volume", false), Some(SettingValue::Byte(50)));

        store.set_value("volume", SettingValue::Byte(20));
        assert_eq!(store.get_value("volume", false), Some(SettingValue::Byte(20)));
        assert_eq!(store.get_value("volume", true), Some(SettingValue::Byte(50)));

        store.set_global("volume", true);
        assert_eq!(store.get_value("volume", false), Some(SettingValue::Byte(50)));

        // Going local again restores the earlier per-game value
        store.set_global("volume", false);
        assert_eq!(store.get_value("volume", false), Some(SettingValue::Byte(20)));
    }

    #[test]
    fn non_switchable_stays_global() {
        let store = store();
        store.set_global("device_name", false);
        assert!(store.using_global("device_name"));
        assert!(!store.set_local_value("device_name", SettingValue::String("x".into())));
    }

    #[test]
    fn wrong_kind_is_ignored() {
        let store = store();
        store.set_value("volume", SettingValue::Int(5));
        assert_eq!(store.get_value("volume", false), Some(SettingValue::Byte(100)));
        assert!(!store.set_global_value("volume", SettingValue::Bool(false)));
    }

    #[test]
    fn clear_local_returns_to_global() {
        let store = store();
        assert!(store.set_local_value("speed_limit", SettingValue::Short(200)));
        assert_eq!(
            store.local_values(),
            vec![("speed_limit".to_string(), SettingValue::Short(200))]
        );
        store.clear_local();
        assert!(store.using_global("speed_limit"));
        assert!(store.local_values().is_empty());
        assert_eq!(store.get_value("speed_limit", false), Some(SettingValue::Short(100)));
    }

    #[test]
    fn unbound_stick_is_empty() {
        let store = store();
        assert!(store.stick_param(0, NativeAnalog::LStick).is_empty());
        assert!(store.button_param(3, NativeButton::Home).is_empty());
    }

    #[test]
    fn bindings_listing_skips_empty_packages() {
        let store = store();
        store.set_stick_param(1, NativeAnalog::RStick, ParamPackage::parse("engine:sdl"));
        store.set_stick_param(0, NativeAnalog::LStick, ParamPackage::new());
        store.set_button_param(0, NativeButton::B, ParamPackage::parse("engine:sdl,button:1"));
        store.set_button_param(0, NativeButton::A, ParamPackage::parse("engine:sdl,button:0"));

        let sticks = store.stick_bindings();
        assert_eq!(sticks.len(), 1);
        assert_eq!(sticks[0].0, 1);

        let buttons: Vec<_> = store.button_bindings().into_iter().map(|(_, b, _)| b).collect();
        assert_eq!(buttons, vec![NativeButton::A, NativeButton::B]);
    }
}
