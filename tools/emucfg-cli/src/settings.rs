//! Setting commands: list, get, set, reset, scope

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use emucfg_core::{DynSetting, Setting};

use crate::session::Session;

#[derive(Args)]
pub struct KeyArgs {
    /// Setting key
    pub key: String,
}

#[derive(Args)]
pub struct GetArgs {
    /// Setting key
    pub key: String,

    /// Print the global value even if a per-game value is active
    #[arg(long)]
    pub global: bool,
}

#[derive(Args)]
pub struct SetArgs {
    /// Setting key
    pub key: String,

    /// New value, parsed according to the setting's type
    pub value: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Scope {
    Global,
    Local,
}

#[derive(Args)]
pub struct ScopeArgs {
    /// Setting key
    pub key: String,

    /// Scope to switch to
    #[arg(value_enum)]
    pub scope: Scope,
}

fn lookup(session: &Session, key: &str) -> Result<DynSetting> {
    DynSetting::new(key, session.store.clone()).with_context(|| format!("Unknown setting '{key}'"))
}

/// Refuse to leave global scope outside of a game session.
fn require_game(session: &Session, action: &str) -> Result<()> {
    if !session.is_game() {
        bail!("{} needs --game <id>", action);
    }
    Ok(())
}

pub fn list(session: &Session) -> Result<()> {
    for key in session.store.keys() {
        let setting = lookup(session, &key)?;
        let mut flags = Vec::new();
        if setting.is_runtime_modifiable() {
            flags.push("runtime");
        }
        if !setting.is_switchable() {
            flags.push("global-only");
        }
        if !setting.is_saveable() {
            flags.push("unsaved");
        }
        if !setting.global() {
            flags.push("local");
        }

        let paired = setting.paired_setting_key();
        let mut line = format!(
            "{:<28} {:<7} {}",
            key,
            setting.kind(),
            setting.value_as_string(false)
        );
        if !flags.is_empty() {
            line.push_str(&format!("  [{}]", flags.join(", ")));
        }
        if !paired.is_empty() {
            line.push_str(&format!("  (paired: {paired})"));
        }
        println!("{line}");
    }
    Ok(())
}

pub fn get(session: &Session, args: GetArgs) -> Result<()> {
    let setting = lookup(session, &args.key)?;
    println!("{}", setting.value_as_string(args.global));
    Ok(())
}

pub fn set(session: &Session, args: SetArgs) -> Result<()> {
    let setting = lookup(session, &args.key)?;
    let value = setting.set_from_str(&args.value).with_context(|| {
        format!(
            "'{}' is not a valid {} value for '{}'",
            args.value,
            setting.kind(),
            args.key
        )
    })?;
    session.save()?;
    tracing::info!("{} = {}", args.key, value);
    Ok(())
}

pub fn reset(session: &Session, args: KeyArgs) -> Result<()> {
    let setting = lookup(session, &args.key)?;
    setting.reset();
    session.save()?;
    tracing::info!("{} reset to {}", args.key, setting.value_as_string(false));
    Ok(())
}

pub fn scope(session: &Session, args: ScopeArgs) -> Result<()> {
    let setting = lookup(session, &args.key)?;
    match args.scope {
        Scope::Global => setting.set_global(true),
        Scope::Local => {
            require_game(session, "Switching to per-game scope")?;
            if !setting.is_switchable() {
                bail!("Setting '{}' can only be set globally", args.key);
            }
            setting.set_global(false);
        }
    }
    session.save()?;
    tracing::info!(
        "{} now uses its {} value",
        args.key,
        if setting.global() { "global" } else { "per-game" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use emucfg_core::{ConfigStore, SettingValue};
    use std::path::Path;

    fn open(dir: &Path, game: Option<&str>) -> Session {
        Session::open(Some(dir.join("config.toml")), game).unwrap()
    }

    fn scope_args(key: &str, scope: Scope) -> ScopeArgs {
        ScopeArgs {
            key: key.to_string(),
            scope,
        }
    }

    #[test]
    fn set_persists_parsed_value() {
        let dir = tempfile::tempdir().unwrap();
        let session = open(dir.path(), None);
        set(
            &session,
            SetArgs {
                key: "speed_limit".into(),
                value: "250".into(),
            },
        )
        .unwrap();

        let reopened = open(dir.path(), None);
        assert_eq!(
            reopened.store.get_value("speed_limit", false),
            Some(SettingValue::Short(250))
        );
    }

    #[test]
    fn set_rejects_text_of_wrong_type() {
        let dir = tempfile::tempdir().unwrap();
        let session = open(dir.path(), None);
        let result = set(
            &session,
            SetArgs {
                key: "speed_limit".into(),
                value: "fast".into(),
            },
        );
        assert!(result.is_err());
        assert_eq!(
            session.store.get_value("speed_limit", false),
            Some(SettingValue::Short(100))
        );
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn set_rejects_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let session = open(dir.path(), None);
        let args = SetArgs {
            key: "no_such_setting".into(),
            value: "1".into(),
        };
        assert!(set(&session, args).is_err());
    }

    #[test]
    fn reset_restores_default() {
        let dir = tempfile::tempdir().unwrap();
        let session = open(dir.path(), None);
        session.store.set_value("audio_volume", SettingValue::Byte(20));
        reset(
            &session,
            KeyArgs {
                key: "audio_volume".into(),
            },
        )
        .unwrap();

        let reopened = open(dir.path(), None);
        assert_eq!(
            reopened.store.get_value("audio_volume", false),
            Some(SettingValue::Byte(100))
        );
    }

    #[test]
    fn local_scope_needs_game() {
        let dir = tempfile::tempdir().unwrap();
        let session = open(dir.path(), None);
        assert!(scope(&session, scope_args("speed_limit", Scope::Local)).is_err());
        assert!(session.store.using_global("speed_limit"));
    }

    #[test]
    fn local_scope_refused_for_global_only_setting() {
        let dir = tempfile::tempdir().unwrap();
        let session = open(dir.path(), Some("0100ABCD"));
        assert!(scope(&session, scope_args("device_name", Scope::Local)).is_err());
        assert!(session.store.using_global("device_name"));
    }

    #[test]
    fn local_scope_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let session = open(dir.path(), Some("0100ABCD"));
        scope(&session, scope_args("speed_limit", Scope::Local)).unwrap();
        assert!(!session.store.using_global("speed_limit"));

        let reopened = open(dir.path(), Some("0100ABCD"));
        assert!(!reopened.store.using_global("speed_limit"));
        assert!(open(dir.path(), None).store.using_global("speed_limit"));
    }
}
