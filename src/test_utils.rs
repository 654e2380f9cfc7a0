//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid environment variable name
    pub fn env_name() -> impl Strategy<Value = String> {
        "[A-Za-z_][A-Za-z0-9_]{0,20}"
    }

    /// Generate a printable environment variable value, quotes included
    pub fn env_value() -> impl Strategy<Value = String> {
        "[ -~]{0,40}"
    }

    /// Generate an ESP-IDF release tag such as `v5.1.2`
    pub fn version_tag() -> impl Strategy<Value = String> {
        (1u32..10, 0u32..10, 0u32..10)
            .prop_map(|(major, minor, patch)| format!("v{major}.{minor}.{patch}"))
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_env_name_generator(name in env_name()) {
            prop_assert!(crate::core::environment::is_valid_name(&name));
        }

        #[test]
        fn test_env_value_generator(value in env_value()) {
            prop_assert!(!value.contains('\n'));
            prop_assert!(value.len() <= 40);
        }

        #[test]
        fn test_version_tag_generator(tag in version_tag()) {
            let parts: Vec<&str> = tag.trim_start_matches('v').split('.').collect();
            prop_assert!(tag.starts_with('v'));
            prop_assert_eq!(parts.len(), 3);
            for part in parts {
                prop_assert!(part.parse::<u32>().is_ok());
            }
        }
    }
}
