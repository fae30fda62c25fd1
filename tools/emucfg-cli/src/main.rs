//! emucfg - Inspect and edit emulator settings
//!
//! # Commands
//!
//! - `emucfg list` - List every setting with its value and metadata
//! - `emucfg get <key>` - Print a setting's value
//! - `emucfg set <key> <value>` - Change a setting
//! - `emucfg reset <key>` - Restore a setting's default
//! - `emucfg scope <key> global|local` - Switch a setting's scope for a game
//! - `emucfg bind-stick` / `set-modifier` / `bind-button` - Edit input bindings
//! - `emucfg show-input <player>` - Describe a player's bindings
//!
//! # Usage
//!
//! ```bash
//! # Per-game override for one title
//! emucfg --game 0100ABCD scope speed_limit local
//! emucfg --game 0100ABCD set speed_limit 200
//!
//! # Bind the left stick of player 1 to an SDL pad
//! emucfg bind-stick 0 lstick "axis_x:0,axis_y:1,display:Pad,engine:sdl,port:0"
//! ```

mod input;
mod session;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use session::Session;

/// emucfg - Inspect and edit emulator settings
#[derive(Parser)]
#[command(name = "emucfg")]
#[command(about = "Inspect and edit emulator settings and input bindings")]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Game id whose per-game overrides to load and edit
    #[arg(short, long, global = true)]
    game: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every setting with its value and metadata
    List,

    /// Print a setting's value
    Get(settings::GetArgs),

    /// Change a setting in its active scope
    Set(settings::SetArgs),

    /// Restore a setting's default in its active scope
    Reset(settings::KeyArgs),

    /// Switch a setting between global and per-game scope
    Scope(settings::ScopeArgs),

    /// Replace a stick binding
    BindStick(input::StickArgs),

    /// Replace only the modifier button of a stick binding
    SetModifier(input::StickArgs),

    /// Replace a button binding
    BindButton(input::ButtonArgs),

    /// Describe a player's bindings
    ShowInput(input::ShowArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = Session::open(cli.config, cli.game.as_deref())?;

    match cli.command {
        Commands::List => settings::list(&session),
        Commands::Get(args) => settings::get(&session, args),
        Commands::Set(args) => settings::set(&session, args),
        Commands::Reset(args) => settings::reset(&session, args),
        Commands::Scope(args) => settings::scope(&session, args),
        Commands::BindStick(args) => input::bind_stick(&session, args),
        Commands::SetModifier(args) => input::set_modifier(&session, args),
        Commands::BindButton(args) => input::bind_button(&session, args),
        Commands::ShowInput(args) => input::show(&session, args),
    }
}
