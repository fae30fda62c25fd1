//! Controller identifiers understood by the native input subsystem.

use serde::{Deserialize, Serialize};

/// Analog sticks on the emulated controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeAnalog {
    LStick,
    RStick,
}

impl NativeAnalog {
    pub const ALL: [NativeAnalog; 2] = [NativeAnalog::LStick, NativeAnalog::RStick];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable name used as a config file key.
    pub fn name(self) -> &'static str {
        match self {
            NativeAnalog::LStick => "lstick",
            NativeAnalog::RStick => "rstick",
        }
    }

    /// Parse a stable name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

/// One of the four directions of an analog stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalogDirection {
    Up,
    Down,
    Left,
    Right,
}

impl AnalogDirection {
    pub const ALL: [AnalogDirection; 4] = [
        AnalogDirection::Up,
        AnalogDirection::Down,
        AnalogDirection::Left,
        AnalogDirection::Right,
    ];

    /// Sub-parameter name inside a stick package.
    pub fn param(self) -> &'static str {
        match self {
            AnalogDirection::Up => "up",
            AnalogDirection::Down => "down",
            AnalogDirection::Left => "left",
            AnalogDirection::Right => "right",
        }
    }
}

/// Buttons on the emulated controller, in native index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeButton {
    A,
    B,
    X,
    Y,
    LStick,
    RStick,
    L,
    R,
    ZL,
    ZR,
    Plus,
    Minus,
    DLeft,
    DUp,
    DRight,
    DDown,
    SLLeft,
    SRLeft,
    Home,
    Capture,
    SLRight,
    SRRight,
}

impl NativeButton {
    pub const ALL: [NativeButton; 22] = [
        NativeButton::A,
        NativeButton::B,
        NativeButton::X,
        NativeButton::Y,
        NativeButton::LStick,
        NativeButton::RStick,
        NativeButton::L,
        NativeButton::R,
        NativeButton::ZL,
        NativeButton::ZR,
        NativeButton::Plus,
        NativeButton::Minus,
        NativeButton::DLeft,
        NativeButton::DUp,
        NativeButton::DRight,
        NativeButton::DDown,
        NativeButton::SLLeft,
        NativeButton::SRLeft,
        NativeButton::Home,
        NativeButton::Capture,
        NativeButton::SLRight,
        NativeButton::SRRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable name used as a config file key.
    pub fn name(self) -> &'static str {
        match self {
            NativeButton::A => "a",
            NativeButton::B => "b",
            NativeButton::X => "x",
            NativeButton::Y => "y",
            NativeButton::LStick => "lstick",
            NativeButton::RStick => "rstick",
            NativeButton::L => "l",
            NativeButton::R => "r",
            NativeButton::ZL => "zl",
            NativeButton::ZR => "zr",
            NativeButton::Plus => "plus",
            NativeButton::Minus => "minus",
            NativeButton::DLeft => "dleft",
            NativeButton::DUp => "dup",
            NativeButton::DRight => "dright",
            NativeButton::DDown => "ddown",
            NativeButton::SLLeft => "sl_left",
            NativeButton::SRLeft => "sr_left",
            NativeButton::Home => "home",
            NativeButton::Capture => "capture",
            NativeButton::SLRight => "sl_right",
            NativeButton::SRRight => "sr_right",
        }
    }

    /// Parse a stable name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }
}

/// What kind of physical input a setting expects to be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputType {
    #[default]
    None,
    Button,
    Stick,
    Motion,
}
