//! Backward dispatch renderer (platform → protocol).
//!
//! One match arm per key, wrapping the protocol tag in the tagged payload
//! carried on the wire:
//!
//! ```text
//!         rdev::Key::ControlLeft => msg::key::Key::Code(msg::KeyCode::Controlleft as i32),
//! ```
//!
//! Generated from the same list as the forward arms, so the two blocks are
//! exact inverses over every key present.

use super::TargetNames;
use crate::keyset::{KeyForms, KeySet};

/// Left margin of every backward arm, in spaces.
pub const BACKWARD_MARGIN: usize = 8;

/// Builds the arm for one key, without margin or trailing comma.
pub fn backward_arm(names: &TargetNames, key: &KeyForms<'_>) -> String {
    let ns = &names.protocol_namespace;
    format!(
        "{}::{}::{} => {ns}::{}({ns}::{}::{} as {})",
        names.platform_namespace,
        names.platform_enum,
        key.platform,
        names.payload_path,
        names.protocol_enum,
        key.variant_form,
        names.cast_type,
    )
}

/// Renders every backward arm for `keys`, one per line, in list order.
pub fn render_backward(keys: &KeySet, names: &TargetNames) -> String {
    let margin = " ".repeat(BACKWARD_MARGIN);
    keys.iter()
        .map(|key| format!("{margin}{},\n", backward_arm(names, &key)))
        .collect()
}
