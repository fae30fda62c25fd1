//! Input binding commands

use anyhow::{Context, Result};
use clap::Args;
use emucfg_core::{
    AnalogDirection, AnalogInputSetting, ButtonInputSetting, InputSetting, ModifierInputSetting,
    NativeAnalog, NativeButton, ParamPackage,
};

use crate::session::Session;

#[derive(Args)]
pub struct StickArgs {
    /// Player index (0-based)
    pub player: usize,

    /// Stick name (lstick, rstick)
    pub analog: String,

    /// Serialized parameter package, e.g. "axis_x:0,axis_y:1,engine:sdl"
    pub package: String,
}

#[derive(Args)]
pub struct ButtonArgs {
    /// Player index (0-based)
    pub player: usize,

    /// Button name (a, b, zl, plus, dup, ...)
    pub button: String,

    /// Serialized parameter package, e.g. "button:0,engine:sdl"
    pub package: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Player index (0-based)
    pub player: usize,
}

fn parse_analog(name: &str) -> Result<NativeAnalog> {
    NativeAnalog::from_name(name).with_context(|| format!("Unknown stick '{name}'"))
}

fn parse_package(text: &str) -> Result<ParamPackage> {
    text.parse::<ParamPackage>()
        .with_context(|| format!("Malformed parameter package '{text}'"))
}

pub fn bind_stick(session: &Session, args: StickArgs) -> Result<()> {
    let analog = parse_analog(&args.analog)?;
    let param = parse_package(&args.package)?;
    // Any direction addresses the same package
    let setting =
        AnalogInputSetting::new(args.player, analog, AnalogDirection::Up, session.store.clone());
    setting.set_selected_value(param);
    session.save()
}

pub fn set_modifier(session: &Session, args: StickArgs) -> Result<()> {
    let analog = parse_analog(&args.analog)?;
    let param = parse_package(&args.package)?;
    let setting = ModifierInputSetting::new(args.player, analog, session.store.clone());
    setting.set_selected_value(param);
    tracing::info!("Modifier is now {}", setting.selected_value());
    session.save()
}

pub fn bind_button(session: &Session, args: ButtonArgs) -> Result<()> {
    let button = NativeButton::from_name(&args.button)
        .with_context(|| format!("Unknown button '{}'", args.button))?;
    let param = parse_package(&args.package)?;
    let setting = ButtonInputSetting::new(args.player, button, session.store.clone());
    setting.set_selected_value(param);
    tracing::info!("{} is now {}", button.name(), setting.selected_value());
    session.save()
}

pub fn show(session: &Session, args: ShowArgs) -> Result<()> {
    println!("Player {}", args.player);
    for analog in NativeAnalog::ALL {
        for direction in AnalogDirection::ALL {
            let setting =
                AnalogInputSetting::new(args.player, analog, direction, session.store.clone());
            println!(
                "  {:<8} {:<6} {}",
                analog.name(),
                direction.param(),
                setting.selected_value()
            );
        }
        let modifier = ModifierInputSetting::new(args.player, analog, session.store.clone());
        println!(
            "  {:<8} {:<6} {}",
            analog.name(),
            "mod",
            modifier.selected_value()
        );
    }
    for button in NativeButton::ALL {
        let setting = ButtonInputSetting::new(args.player, button, session.store.clone());
        println!("  {:<15} {}", button.name(), setting.selected_value());
    }
    Ok(())
}
