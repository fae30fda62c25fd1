//! Shared types for the emulator settings layer.
//!
//! These are the wire-level types exchanged with the native configuration
//! and input subsystems. They carry no store knowledge.

pub mod input;
pub mod param_package;

pub use input::{AnalogDirection, InputType, NativeAnalog, NativeButton};
pub use param_package::{ParamError, ParamPackage};
