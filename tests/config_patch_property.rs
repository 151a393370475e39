// tests/config_patch_property.rs

use std::path::PathBuf;

use proptest::prelude::*;
use toml::Table;

use influxdb_fixture::config::{ServerSettings, patch_config};

// Roots made of plain path segments, so the expected strings are easy to
// compute.
fn root_strategy() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec("[a-z0-9_-]{1,8}", 1..4).prop_map(|segments| {
        let mut root = PathBuf::from("/");
        for segment in segments {
            root.push(segment);
        }
        root
    })
}

proptest! {
    #[test]
    fn patched_config_always_carries_the_instance_settings(
        root in root_strategy(),
        port in 1u16..=u16::MAX,
        admin_port in any::<u16>(),
    ) {
        let original = format!("[admin]\nport = {admin_port}\n\n[api]\nport = 8086\n");
        let settings = ServerSettings::for_root(&root, port);

        let patched: Table = toml::from_str(&patch_config(&original, &settings).unwrap()).unwrap();

        prop_assert_eq!(patched["api"]["port"].as_integer(), Some(i64::from(port)));
        prop_assert_eq!(patched["admin"]["port"].as_integer(), Some(i64::from(admin_port)));
        let expected_log = root.join("data").join("log.txt").display().to_string();
        let expected_db = root.join("data").join("db").display().to_string();
        prop_assert_eq!(patched["logging"]["file"].as_str(), Some(expected_log.as_str()));
        prop_assert_eq!(patched["storage"]["dir"].as_str(), Some(expected_db.as_str()));
    }

    #[test]
    fn patching_twice_is_stable(root in root_strategy(), port in 1u16..=u16::MAX) {
        let settings = ServerSettings::for_root(&root, port);
        let once = patch_config("[api]\nport = 1\n", &settings).unwrap();
        let twice = patch_config(&once, &settings).unwrap();
        prop_assert_eq!(once, twice);
    }
}
