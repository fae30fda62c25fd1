//! Built-in setting catalogue.

use crate::memory::{MemoryStore, SettingDescriptor};
use crate::store::SettingValue;

/// Table of setting descriptors known to the front-end.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    descriptors: Vec<SettingDescriptor>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The emulator's built-in settings.
    pub fn builtin() -> Self {
        use SettingValue::*;

        let descriptors = vec![
            // System
            SettingDescriptor::new("use_docked_mode", Bool(true)).runtime_modifiable(true),
            SettingDescriptor::new("language_index", Int(1)),
            SettingDescriptor::new("region_index", Int(-1)),
            SettingDescriptor::new("device_name", String("Emulator".into())).switchable(false),
            SettingDescriptor::new("custom_rtc_enabled", Bool(false)).paired_with("custom_rtc"),
            SettingDescriptor::new("custom_rtc", Long(0)),
            // CPU
            SettingDescriptor::new("cpu_accuracy", Int(0)),
            SettingDescriptor::new("use_speed_limit", Bool(true))
                .runtime_modifiable(true)
                .paired_with("speed_limit"),
            SettingDescriptor::new("speed_limit", Short(100)).runtime_modifiable(true),
            // Renderer
            SettingDescriptor::new("renderer_backend", Int(1)),
            SettingDescriptor::new("resolution_setup", Int(2)),
            SettingDescriptor::new("fsr_sharpening_slider", Int(25)).runtime_modifiable(true),
            SettingDescriptor::new("renderer_scaling_filter", Int(1)).runtime_modifiable(true),
            SettingDescriptor::new("use_disk_shader_cache", Bool(true)),
            SettingDescriptor::new("show_performance_overlay", Bool(false))
                .runtime_modifiable(true)
                .switchable(false)
                .saveable(false),
            // Audio
            SettingDescriptor::new("audio_output_engine", Int(0)),
            SettingDescriptor::new("audio_volume", Byte(100)).runtime_modifiable(true),
            // Input
            SettingDescriptor::new("touchscreen_opacity", Float(0.5))
                .runtime_modifiable(true)
                .switchable(false),
        ];

        Self { descriptors }
    }

    pub fn add(&mut self, descriptor: SettingDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn get(&self, key: &str) -> Option<&SettingDescriptor> {
        self.descriptors.iter().find(|d| d.key == key)
    }

    pub fn descriptors(&self) -> &[SettingDescriptor] {
        &self.descriptors
    }

    /// Register every descriptor in `store` at its default value.
    pub fn register_into(&self, store: &MemoryStore) {
        for descriptor in &self.descriptors {
            store.register(descriptor.clone());
        }
        tracing::debug!("Registered {} settings", self.descriptors.len());
    }
}

impl MemoryStore {
    /// A store pre-populated with the built-in settings.
    pub fn with_defaults() -> Self {
        let store = Self::new();
        SettingsRegistry::builtin().register_into(&store);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn builtin_keys_are_unique() {
        let registry = SettingsRegistry::builtin();
        let mut seen = HashSet::new();
        for d in registry.descriptors() {
            assert!(seen.insert(d.key.as_str()), "duplicate key {}", d.key);
        }
    }

    #[test]
    fn paired_keys_exist() {
        let registry = SettingsRegistry::builtin();
        for d in registry.descriptors() {
            if let Some(paired) = &d.paired_key {
                assert!(registry.get(paired).is_some(), "{} pairs with missing {}", d.key, paired);
            }
        }
    }

    #[test]
    fn with_defaults_registers_everything() {
        let store = MemoryStore::with_defaults();
        assert_eq!(store.keys().len(), SettingsRegistry::builtin().descriptors().len());
        assert!(store.contains("speed_limit"));
    }

    #[test]
    fn add_extends_catalogue() {
        let mut registry = SettingsRegistry::new();
        registry.add(SettingDescriptor::new("extra", SettingValue::Bool(false)));
        assert!(registry.get("extra").is_some());
        assert!(registry.get("speed_limit").is_none());
    }
}
