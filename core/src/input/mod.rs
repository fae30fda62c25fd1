//! Input binding settings.
//!
//! Each setting addresses one control of one player in an [`InputStore`]
//! and translates between the UI-facing text and the native parameter
//! package.

mod binding;
pub mod display;

pub use binding::StickBinding;

use std::sync::Arc;

use emucfg_shared::{AnalogDirection, InputType, NativeAnalog, NativeButton, ParamPackage};

use crate::store::InputStore;

/// A setting bound to a physical input.
pub trait InputSetting {
    fn player_index(&self) -> usize;

    fn input_type(&self) -> InputType;

    /// Display text for the current binding.
    fn selected_value(&self) -> String;

    fn set_selected_value(&self, param: ParamPackage);

    /// Remove the binding.
    fn clear(&self);
}

/// One direction of an analog stick.
pub struct AnalogInputSetting {
    player: usize,
    analog: NativeAnalog,
    direction: AnalogDirection,
    store: Arc<dyn InputStore>,
}

impl AnalogInputSetting {
    pub fn new(
        player: usize,
        analog: NativeAnalog,
        direction: AnalogDirection,
        store: Arc<dyn InputStore>,
    ) -> Self {
        Self {
            player,
            analog,
            direction,
            store,
        }
    }

    pub fn analog(&self) -> NativeAnalog {
        self.analog
    }

    pub fn direction(&self) -> AnalogDirection {
        self.direction
    }
}

impl InputSetting for AnalogInputSetting {
    fn player_index(&self) -> usize {
        self.player
    }

    fn input_type(&self) -> InputType {
        InputType::Stick
    }

    fn selected_value(&self) -> String {
        let params = self.store.stick_param(self.player, self.analog);
        let analog = display::analog_to_text(&params, self.direction.param());
        display::display_string(&params, &analog)
    }

    /// Replaces the whole stick package; fields absent from `param` are lost.
    fn set_selected_value(&self, param: ParamPackage) {
        self.store.set_stick_param(self.player, self.analog, param);
    }

    fn clear(&self) {
        self.store
            .set_stick_param(self.player, self.analog, ParamPackage::new());
    }
}

/// The modifier button of an analog stick.
///
/// Writes touch only the nested `modifier` field; the rest of the stick
/// package is read back and preserved. The read and the write are separate
/// store calls, so a concurrent writer of the same stick can be overwritten.
pub struct ModifierInputSetting {
    player: usize,
    analog: NativeAnalog,
    store: Arc<dyn InputStore>,
}

impl ModifierInputSetting {
    pub fn new(player: usize, analog: NativeAnalog, store: Arc<dyn InputStore>) -> Self {
        Self {
            player,
            analog,
            store,
        }
    }

    pub fn analog(&self) -> NativeAnalog {
        self.analog
    }

    fn update(&self, modifier: Option<ParamPackage>) {
        let mut binding = StickBinding::from(self.store.stick_param(self.player, self.analog));
        binding.modifier = modifier;
        self.store
            .set_stick_param(self.player, self.analog, binding.into_package());
    }
}

impl InputSetting for ModifierInputSetting {
    fn player_index(&self) -> usize {
        self.player
    }

    fn input_type(&self) -> InputType {
        InputType::Button
    }

    fn selected_value(&self) -> String {
        let binding = StickBinding::from(self.store.stick_param(self.player, self.analog));
        display::button_to_text(&binding.modifier.unwrap_or_default())
    }

    fn set_selected_value(&self, param: ParamPackage) {
        self.update(Some(param));
    }

    fn clear(&self) {
        self.update(None);
    }
}

/// A single controller button.
pub struct ButtonInputSetting {
    player: usize,
    button: NativeButton,
    store: Arc<dyn InputStore>,
}

impl ButtonInputSetting {
    pub fn new(player: usize, button: NativeButton, store: Arc<dyn InputStore>) -> Self {
        Self {
            player,
            button,
            store,
        }
    }

    pub fn button(&self) -> NativeButton {
        self.button
    }
}

impl InputSetting for ButtonInputSetting {
    fn player_index(&self) -> usize {
        self.player
    }

    fn input_type(&self) -> InputType {
        InputType::Button
    }

    fn selected_value(&self) -> String {
        let params = self.store.button_param(self.player, self.button);
        let button = display::button_to_text(&params);
        display::display_string(&params, &button)
    }

    fn set_selected_value(&self, param: ParamPackage) {
        self.store.set_button_param(self.player, self.button, param);
    }

    fn clear(&self) {
        self.store
            .set_button_param(self.player, self.button, ParamPackage::new());
    }
}
