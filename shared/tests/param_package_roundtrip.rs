use std::collections::BTreeMap;

use emucfg_shared::ParamPackage;
use proptest::prelude::*;

fn field() -> impl Strategy<Value = String> {
    // Bias toward the characters the escaping scheme cares about.
    prop_oneof![
        "[a-z_]{0,8}",
        "[a-z:,$0-2]{0,12}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn parse_serialize_roundtrip(map in prop::collection::btree_map(field(), field(), 0..8)) {
        let package = ParamPackage::from(map.clone());
        let parsed: ParamPackage = package.serialize().parse().unwrap();
        let back: BTreeMap<String, String> = parsed.into();
        prop_assert_eq!(back, map);
    }

    #[test]
    fn nested_package_survives_as_field(
        inner in prop::collection::btree_map(field(), field(), 0..6),
        outer in prop::collection::btree_map("[a-z]{1,6}", field(), 0..6),
    ) {
        let inner = ParamPackage::from(inner);
        let mut package = ParamPackage::from(outer);
        package.set("modifier", inner.serialize());

        let parsed = ParamPackage::parse(&package.serialize());
        prop_assert_eq!(&parsed, &package);
        prop_assert_eq!(ParamPackage::parse(&parsed.get("modifier", "")), inner);
    }

    #[test]
    fn parse_never_panics(s in any::<String>()) {
        let _ = ParamPackage::parse(&s);
    }
}

#[test]
fn toml_table_of_packages_roundtrips() {
    let mut sticks = BTreeMap::new();
    sticks.insert(
        "lstick".to_string(),
        ParamPackage::parse("axis_x:0,axis_y:1,engine:sdl,modifier:code$025$1engine$0keyboard"),
    );

    let text = toml::to_string(&sticks).unwrap();
    let back: BTreeMap<String, ParamPackage> = toml::from_str(&text).unwrap();
    assert_eq!(back, sticks);
}
