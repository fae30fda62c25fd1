//! Loading and saving the store around a single command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use emucfg_core::{ConfigFile, MemoryStore, persist};

/// A store populated from the global config and, optionally, one game's overrides.
pub struct Session {
    pub store: Arc<MemoryStore>,
    config_path: PathBuf,
    game_path: Option<PathBuf>,
}

impl Session {
    /// Load the store from `config` (or the default location) and the
    /// per-game file for `game`, if given.
    pub fn open(config: Option<PathBuf>, game: Option<&str>) -> Result<Self> {
        let config_path = match config {
            Some(path) => path,
            None => persist::config_path().context("Could not determine config directory")?,
        };

        let game_path = match game {
            Some(id) => {
                let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
                Some(
                    persist::game_config_path_in(dir, id)
                        .with_context(|| format!("Invalid game id '{id}'"))?,
                )
            }
            None => None,
        };

        let store = Arc::new(MemoryStore::with_defaults());

        let global = persist::load(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;
        global.apply(&store);

        if let Some(path) = &game_path {
            let local = persist::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            local.apply_local(&store);
        }

        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(Self {
            store,
            config_path,
            game_path,
        })
    }

    pub fn is_game(&self) -> bool {
        self.game_path.is_some()
    }

    /// Write the global config and, in a game session, the per-game file.
    pub fn save(&self) -> Result<()> {
        persist::save(&self.config_path, &ConfigFile::snapshot(&self.store))
            .with_context(|| format!("Failed to save {}", self.config_path.display()))?;

        if let Some(path) = &self.game_path {
            persist::save(path, &ConfigFile::snapshot_local(&self.store))
                .with_context(|| format!("Failed to save {}", path.display()))?;
        }
        Ok(())
    }
}
