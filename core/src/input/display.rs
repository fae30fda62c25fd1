//! Human-readable rendering of input bindings.

use emucfg_shared::ParamPackage;

pub const NOT_SET: &str = "[not set]";
pub const UNKNOWN: &str = "[unknown]";
pub const UNUSED: &str = "[unused]";

fn direction_name(direction: &str) -> &str {
    match direction {
        "up" => "Up",
        "down" => "Down",
        "left" => "Left",
        "right" => "Right",
        other => other,
    }
}

/// Render a button binding, e.g. `"~Button 3"` for a toggled button.
pub fn button_to_text(param: &ParamPackage) -> String {
    if !param.has("engine") {
        return NOT_SET.to_string();
    }

    let mut prefix = String::new();
    if param.get_bool("toggle", false) {
        prefix.push('~');
    }
    if param.get_bool("inverted", false) {
        prefix.push('!');
    }
    if param.get("invert", "+") == "-" {
        prefix.push('-');
    }
    if param.get_bool("turbo", false) {
        prefix.push('$');
    }

    if param.get("engine", "") == "keyboard" && param.has("code") {
        return format!("{prefix}Key {}", param.get("code", ""));
    }
    if param.has("hat") {
        let direction = param.get("direction", "");
        return format!(
            "{prefix}Hat {} {}",
            param.get("hat", ""),
            direction_name(&direction)
        );
    }
    if param.has("axis") {
        return format!(
            "{prefix}Axis {}{}",
            param.get("axis", ""),
            param.get("direction", "")
        );
    }
    if param.has("button") {
        return format!("{prefix}Button {}", param.get("button", ""));
    }
    if param.has("motion") {
        return format!("{prefix}Motion {}", param.get("motion", ""));
    }

    UNKNOWN.to_string()
}

/// Render one direction (`"up"`, `"down"`, `"left"`, `"right"` or
/// `"modifier"`) of a stick binding.
pub fn analog_to_text(param: &ParamPackage, direction: &str) -> String {
    if !param.has("engine") {
        return NOT_SET.to_string();
    }

    if param.get("engine", "") == "analog_from_button" {
        return button_to_text(&ParamPackage::parse(&param.get(direction, "")));
    }

    if !param.has("axis_x") || !param.has("axis_y") {
        return UNKNOWN.to_string();
    }

    let x_axis = param.get("axis_x", "0");
    let y_axis = param.get("axis_y", "0");
    let invert_x = param.get("invert_x", "+") == "-";
    let invert_y = param.get("invert_y", "+") == "-";

    match direction {
        "modifier" => UNUSED.to_string(),
        "left" => format!("Axis {x_axis}{}", if invert_x { "+" } else { "-" }),
        "right" => format!("Axis {x_axis}{}", if invert_x { "-" } else { "+" }),
        "up" => format!("Axis {y_axis}{}", if invert_y { "-" } else { "+" }),
        "down" => format!("Axis {y_axis}{}", if invert_y { "+" } else { "-" }),
        _ => UNKNOWN.to_string(),
    }
}

/// Prefix `control` with the bound device's display name.
pub fn display_string(param: &ParamPackage, control: &str) -> String {
    let device = param.get("display", "");
    if device.is_empty() {
        return NOT_SET.to_string();
    }
    format!("{device}: {control}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_button_is_not_set() {
        assert_eq!(button_to_text(&ParamPackage::new()), NOT_SET);
    }

    #[test]
    fn button_prefixes() {
        let param = ParamPackage::parse("button:3,engine:sdl,toggle:1,turbo:1");
        assert_eq!(button_to_text(&param), "~$Button 3");

        let param = ParamPackage::parse("axis:2,direction:+,engine:sdl,invert:-,inverted:1");
        assert_eq!(button_to_text(&param), "!-Axis 2+");
    }

    #[test]
    fn hat_and_keyboard() {
        let param = ParamPackage::parse("direction:left,engine:sdl,hat:0");
        assert_eq!(button_to_text(&param), "Hat 0 Left");

        let param = ParamPackage::parse("code:44,engine:keyboard");
        assert_eq!(button_to_text(&param), "Key 44");
    }

    #[test]
    fn motion_and_unknown() {
        assert_eq!(
            button_to_text(&ParamPackage::parse("engine:sdl,motion:0")),
            "Motion 0"
        );
        assert_eq!(button_to_text(&ParamPackage::parse("engine:sdl")), UNKNOWN);
    }

    #[test]
    fn analog_axes() {
        let param = ParamPackage::parse("axis_x:0,axis_y:1,engine:sdl,invert_y:-");
        assert_eq!(analog_to_text(&param, "left"), "Axis 0-");
        assert_eq!(analog_to_text(&param, "right"), "Axis 0+");
        assert_eq!(analog_to_text(&param, "up"), "Axis 1-");
        assert_eq!(analog_to_text(&param, "down"), "Axis 1+");
        assert_eq!(analog_to_text(&param, "modifier"), UNUSED);
        assert_eq!(analog_to_text(&param, "sideways"), UNKNOWN);
    }

    #[test]
    fn analog_without_axes_is_unknown() {
        let param = ParamPackage::parse("axis_x:0,engine:sdl");
        assert_eq!(analog_to_text(&param, "up"), UNKNOWN);
        assert_eq!(analog_to_text(&ParamPackage::new(), "up"), NOT_SET);
    }

    #[test]
    fn analog_from_button_renders_nested() {
        let mut up = ParamPackage::new();
        up.set("engine", "keyboard");
        up.set("code", "17");
        let mut param = ParamPackage::new();
        param.set("engine", "analog_from_button");
        param.set("up", up.serialize());

        assert_eq!(analog_to_text(&param, "up"), "Key 17");
        assert_eq!(analog_to_text(&param, "down"), NOT_SET);
    }

    #[test]
    fn display_needs_device_name() {
        let param = ParamPackage::parse("display:Pro Controller,engine:sdl");
        assert_eq!(display_string(&param, "Axis 0-"), "Pro Controller: Axis 0-");
        assert_eq!(display_string(&ParamPackage::new(), "Axis 0-"), NOT_SET);
    }
}
