//! Configuration persistence (`~/.config/emucfg/config.toml`)
//!
//! Handles loading and saving setting values and input bindings. Global
//! settings live in `config.toml`; per-game overrides live in
//! `custom/<game_id>.toml` beside it and use the same format.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use emucfg_shared::{NativeAnalog, NativeButton, ParamError, ParamPackage};
use serde::{Deserialize, Serialize};

use crate::memory::MemoryStore;
use crate::store::{ConfigStore, InputStore, SettingValue, ValueKind};

/// Errors raised while loading, saving or applying a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Stored value does not fit the setting's type
    #[error("setting '{key}' expects a {expected} value")]
    TypeMismatch { key: String, expected: ValueKind },

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    /// Input section names a control that does not exist
    #[error("unknown control '{0}'")]
    UnknownControl(String),

    /// Binding text is not a valid parameter package
    #[error("binding for '{control}' is malformed: {source}")]
    InvalidBinding {
        control: String,
        #[source]
        source: ParamError,
    },
}

/// Bindings of a single player.
///
/// Packages are kept in their serialized form so one bad entry does not
/// reject the whole file; they are parsed in [`ConfigFile::apply`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    pub player: usize,
    /// Stick packages keyed by [`NativeAnalog::name`]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sticks: BTreeMap<String, String>,
    /// Button packages keyed by [`NativeButton::name`]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub buttons: BTreeMap<String, String>,
}

/// On-disk configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub settings: BTreeMap<String, toml::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input: Vec<PlayerInput>,
}

impl ConfigFile {
    /// Global values of every saveable setting plus all input bindings.
    pub fn snapshot(store: &MemoryStore) -> Self {
        let mut settings = BTreeMap::new();
        for key in store.keys() {
            let Some(descriptor) = store.descriptor(&key) else {
                continue;
            };
            if !descriptor.saveable {
                continue;
            }
            if let Some(value) = store.get_value(&key, true) {
                settings.insert(key, value.to_toml());
            }
        }

        let mut players: BTreeMap<usize, PlayerInput> = BTreeMap::new();
        for (player, analog, param) in store.stick_bindings() {
            players
                .entry(player)
                .or_insert_with(|| PlayerInput {
                    player,
                    ..Default::default()
                })
                .sticks
                .insert(analog.name().to_string(), param.serialize());
        }
        for (player, button, param) in store.button_bindings() {
            players
                .entry(player)
                .or_insert_with(|| PlayerInput {
                    player,
                    ..Default::default()
                })
                .buttons
                .insert(button.name().to_string(), param.serialize());
        }

        Self {
            settings,
            input: players.into_values().collect(),
        }
    }

    /// Per-game values of settings currently in local scope.
    ///
    /// Input bindings are not part of per-game files.
    pub fn snapshot_local(store: &MemoryStore) -> Self {
        let settings = store
            .local_values()
            .into_iter()
            .filter(|(key, _)| {
                store
                    .descriptor(key)
                    .map(|d| d.saveable)
                    .unwrap_or(false)
            })
            .map(|(key, value)| (key, value.to_toml()))
            .collect();
        Self {
            settings,
            input: Vec::new(),
        }
    }

    /// Load this file's values into the store's global scope.
    ///
    /// Entries that cannot be applied are skipped; the returned list
    /// describes each of them.
    pub fn apply(&self, store: &MemoryStore) -> Vec<ConfigError> {
        let mut skipped = self.apply_settings(store, |key, value| {
            store.set_global_value(key, value);
        });

        for player in &self.input {
            for (name, text) in &player.sticks {
                let Some(analog) = NativeAnalog::from_name(name) else {
                    skipped.push(ConfigError::UnknownControl(name.clone()));
                    continue;
                };
                match parse_binding(name, text) {
                    Ok(param) => store.set_stick_param(player.player, analog, param),
                    Err(err) => skipped.push(err),
                }
            }
            for (name, text) in &player.buttons {
                let Some(button) = NativeButton::from_name(name) else {
                    skipped.push(ConfigError::UnknownControl(name.clone()));
                    continue;
                };
                match parse_binding(name, text) {
                    Ok(param) => store.set_button_param(player.player, button, param),
                    Err(err) => skipped.push(err),
                }
            }
        }

        for err in &skipped {
            tracing::warn!("Skipping config entry: {}", err);
        }
        skipped
    }

    /// Load this file's values as per-game overrides.
    ///
    /// Non-switchable settings are skipped and stay global.
    pub fn apply_local(&self, store: &MemoryStore) -> Vec<ConfigError> {
        let skipped = self.apply_settings(store, |key, value| {
            store.set_local_value(key, value);
        });
        for err in &skipped {
            tracing::warn!("Skipping per-game entry: {}", err);
        }
        skipped
    }

    fn apply_settings(
        &self,
        store: &MemoryStore,
        mut write: impl FnMut(&str, SettingValue),
    ) -> Vec<ConfigError> {
        let mut skipped = Vec::new();
        for (key, raw) in &self.settings {
            let Some(descriptor) = store.descriptor(key) else {
                skipped.push(ConfigError::UnknownSetting(key.clone()));
                continue;
            };
            let expected = descriptor.default.kind();
            match SettingValue::from_toml(expected, raw) {
                Some(value) => write(key, value),
                None => skipped.push(ConfigError::TypeMismatch {
                    key: key.clone(),
                    expected,
                }),
            }
        }
        skipped
    }
}

fn parse_binding(control: &str, text: &str) -> Result<ParamPackage, ConfigError> {
    text.parse().map_err(|source| ConfigError::InvalidBinding {
        control: control.to_string(),
        source,
    })
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\emucfg\emucfg\config`
/// On macOS: `~/Library/Application Support/io.emucfg.emucfg`
/// On Linux: `~/.config/emucfg`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "emucfg", "emucfg")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of the global config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Location of the per-game override file for `game_id`.
///
/// Returns `None` if the id is not a safe single path component.
pub fn game_config_path(game_id: &str) -> Option<PathBuf> {
    game_config_path_in(&config_dir()?, game_id)
}

/// Location of the per-game override file for `game_id` under `dir`.
pub fn game_config_path_in(dir: &Path, game_id: &str) -> Option<PathBuf> {
    if !is_safe_game_id(game_id) {
        return None;
    }
    Some(dir.join("custom").join(format!("{game_id}.toml")))
}

/// Returns true if a game id is safe to use as a single path component.
pub fn is_safe_game_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.ends_with('.')
        && !id.ends_with(' ')
        && !id.chars().any(|c| {
            c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
        })
}

/// Load a config file.
///
/// A missing file yields an empty document.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(ConfigFile::default());
        }
        Err(e) => return Err(e.into()),
    };
    Ok(toml::from_str(&content)?)
}

/// Save a config file, creating parent directories as needed.
///
/// The file is written to a temporary sibling and renamed into place so a
/// crash never leaves a truncated config behind.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub fn save(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = match path.file_name() {
        Some(name) => {
            let mut tmp_name = OsString::from(name);
            tmp_name.push(".tmp");
            path.with_file_name(tmp_name)
        }
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "config path has no file name",
            )
            .into());
        }
    };

    let content = toml::to_string_pretty(config)?;
    fs::write(&tmp_path, content)?;

    #[cfg(windows)]
    {
        if path.exists() {
            // Windows rename fails if destination exists.
            fs::remove_file(path)?;
        }
    }

    fs::rename(&tmp_path, path)?;
    tracing::info!("Saved config to {}", path.display());
    Ok(())
}
