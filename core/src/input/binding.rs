//! Typed view of a stick parameter package.

use emucfg_shared::ParamPackage;

const MODIFIER_FIELD: &str = "modifier";

/// A stick package with its nested modifier lifted out.
///
/// `fields` holds every other field untouched (engine, axes, per-direction
/// packages); `modifier` is the button that scales the stick's range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickBinding {
    pub fields: ParamPackage,
    pub modifier: Option<ParamPackage>,
}

impl StickBinding {
    /// Rebuild the wire package. A `None` modifier omits the field.
    pub fn into_package(self) -> ParamPackage {
        let mut package = self.fields;
        if let Some(modifier) = self.modifier {
            package.set(MODIFIER_FIELD, modifier.serialize());
        }
        package
    }
}

impl From<ParamPackage> for StickBinding {
    fn from(mut fields: ParamPackage) -> Self {
        let modifier = fields
            .erase(MODIFIER_FIELD)
            .map(|raw| ParamPackage::parse(&raw));
        Self { fields, modifier }
    }
}

impl From<StickBinding> for ParamPackage {
    fn from(binding: StickBinding) -> Self {
        binding.into_package()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_is_lifted_out() {
        let binding = StickBinding::from(ParamPackage::parse(
            "axis_x:0,axis_y:1,engine:sdl,modifier:button$04$1engine$0sdl",
        ));
        assert!(!binding.fields.has("modifier"));
        assert_eq!(binding.fields.get("engine", ""), "sdl");
        let modifier = binding.modifier.unwrap();
        assert_eq!(modifier.get("button", ""), "4");
    }

    #[test]
    fn missing_modifier_is_none() {
        let binding = StickBinding::from(ParamPackage::parse("engine:sdl"));
        assert_eq!(binding.modifier, None);
        assert_eq!(binding.into_package(), ParamPackage::parse("engine:sdl"));
    }

    #[test]
    fn roundtrip_preserves_package() {
        let original = ParamPackage::parse(
            "axis_x:2,axis_y:3,engine:sdl,modifier:code$025$1engine$0keyboard,port:0",
        );
        let back: ParamPackage = StickBinding::from(original.clone()).into();
        assert_eq!(back, original);
    }

    #[test]
    fn empty_modifier_field_survives() {
        let original = ParamPackage::parse("engine:sdl,modifier:");
        let binding = StickBinding::from(original.clone());
        assert_eq!(binding.modifier, Some(ParamPackage::new()));
        assert_eq!(binding.into_package(), original);
    }
}
