//! Protocol enum renderer.
//!
//! Emits the schema-side enum block:
//!
//! ```text
//! enum KeyCode {
//! 	UNKNOWN_KEY = 0;
//! 	ESCAPE = 1;
//! 	KEYA = 2;
//! }
//! ```
//!
//! Body lines are tab-indented and `;`-terminated.  The sentinel is always the
//! first body line; every key follows with tags `1..=len` in list order.

use super::TargetNames;
use crate::keyset::KeySet;

/// Name of the reserved tag-0 entry.
pub const SENTINEL: &str = "UNKNOWN_KEY";

/// Renders the protocol enum definition for `keys`.
pub fn render_proto_enum(keys: &KeySet, names: &TargetNames) -> String {
    let mut out = format!("enum {} {{\n\t{SENTINEL} = 0;\n", names.protocol_enum);
    for key in keys.iter() {
        out.push_str(&format!("\t{} = {};\n", key.enum_form, key.tag));
    }
    out.push_str("}\n");
    out
}
