//! Forward dispatch renderer (protocol → platform).
//!
//! One match arm per key:
//!
//! ```text
//!               msg::KeyCode::Controlleft => Some(rdev::Key::ControlLeft),
//! ```
//!
//! The sentinel is never emitted; the hand-written function around these
//! arms supplies its own fallback for `UNKNOWN_KEY`.

use super::TargetNames;
use crate::keyset::{KeyForms, KeySet};

/// Left margin of every forward arm, in spaces.
pub const FORWARD_MARGIN: usize = 14;

/// Builds the arm for one key, without margin or trailing comma.
pub fn forward_arm(names: &TargetNames, key: &KeyForms<'_>) -> String {
    let target = format!(
        "{}::{}::{}",
        names.platform_namespace, names.platform_enum, key.platform
    );
    let expr = match &names.forward_wrapper {
        Some(wrapper) => format!("{wrapper}({target})"),
        None => target,
    };
    format!(
        "{}::{}::{} => {}",
        names.protocol_namespace, names.protocol_enum, key.variant_form, expr
    )
}

/// Renders every forward arm for `keys`, one per line, in list order.
pub fn render_forward(keys: &KeySet, names: &TargetNames) -> String {
    let margin = " ".repeat(FORWARD_MARGIN);
    keys.iter()
        .map(|key| format!("{margin}{},\n", forward_arm(names, &key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_key_list_renders_expected_arms() {
        // Arrange
        let keys = KeySet::parse("Escape, KeyA, Space").unwrap();

        // Act
        let out = render_forward(&keys, &TargetNames::default());

        // Assert
        let expected = [
            "              msg::KeyCode::Escape => Some(rdev::Key::Escape),",
            "              msg::KeyCode::Keya => Some(rdev::Key::KeyA),",
            "              msg::KeyCode::Space => Some(rdev::Key::Space),",
        ];
        assert_eq!(out.lines().collect::<Vec<_>>(), expected);
        assert!(out.ends_with(",\n"));
    }

    #[test]
    fn test_wrapper_can_be_disabled() {
        let keys = KeySet::parse("Escape").unwrap();
        let names = TargetNames {
            forward_wrapper: None,
            ..TargetNames::default()
        };

        let out = render_forward(&keys, &names);

        assert_eq!(out, "              msg::KeyCode::Escape => rdev::Key::Escape,\n");
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let keys = KeySet::parse("").unwrap();
        assert_eq!(render_forward(&keys, &TargetNames::default()), "");
    }

    #[test]
    fn test_sentinel_is_never_emitted() {
        let out = render_forward(&KeySet::builtin(), &TargetNames::default());
        assert!(!out.contains("Unknown"), "sentinel leaked into forward arms");
    }

    #[test]
    fn test_override_replaces_platform_side_only() {
        // Arrange
        let overrides =
            std::collections::BTreeMap::from([("KpReturn".to_string(), "KpEnter".to_string())]);
        let keys = KeySet::with_overrides(["KpReturn"], &overrides).unwrap();

        // Act
        let out = render_forward(&keys, &TargetNames::default());

        // Assert
        assert_eq!(
            out.trim_start(),
            "msg::KeyCode::Kpreturn => Some(rdev::Key::KpEnter),\n"
        );
    }
}
