//! Naming transforms shared by every renderer.
//!
//! A key identifier is authored once, in its canonical mixed-case form
//! (`ControlLeft`).  The two protocol-side spellings are pure functions of it:
//!
//! | Form             | `ControlLeft`  | Used for                              |
//! |------------------|----------------|---------------------------------------|
//! | canonical        | `ControlLeft`  | platform enum variant                 |
//! | protocol enum    | `CONTROLLEFT`  | tag name in the schema enum           |
//! | protocol variant | `Controlleft`  | variant name the schema compiler emits |
//!
//! These are the only two places the spellings are computed.  A collision
//! introduced here would silently duplicate match arms, so `KeySet`
//! validation calls these same functions when it checks uniqueness.

/// Returns the protocol-enum form: the identifier upper-cased.
pub fn enum_form(canonical: &str) -> String {
    canonical.to_ascii_uppercase()
}

/// Returns the protocol-variant form: first character upper-cased, the rest
/// lower-cased.
pub fn variant_form(canonical: &str) -> String {
    let mut chars = canonical.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(canonical.len());
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_form_upper_cases_mixed_case_identifier() {
        assert_eq!(enum_form("ControlLeft"), "CONTROLLEFT");
        assert_eq!(enum_form("Kp0"), "KP0");
        assert_eq!(enum_form("F12"), "F12");
    }

    #[test]
    fn test_variant_form_collapses_internal_casing() {
        assert_eq!(variant_form("ControlLeft"), "Controlleft");
        assert_eq!(variant_form("KeyA"), "Keya");
        assert_eq!(variant_form("IntlBackslash"), "Intlbackslash");
        assert_eq!(variant_form("Escape"), "Escape");
    }

    #[test]
    fn test_variant_form_upper_cases_lower_case_first_letter() {
        assert_eq!(variant_form("escape"), "Escape");
    }

    #[test]
    fn test_forms_of_empty_string_are_empty() {
        assert_eq!(enum_form(""), "");
        assert_eq!(variant_form(""), "");
    }

    #[test]
    fn test_variant_form_matches_enum_form_case_insensitively() {
        // The schema compiler derives the variant name from the enum tag, so
        // both spellings must agree once case is ignored.
        for name in ["AltGr", "BackQuote", "KpDelete", "Num1", "PrintScreen"] {
            assert!(
                enum_form(name).eq_ignore_ascii_case(&variant_form(name)),
                "{name}: forms disagree"
            );
        }
    }

    #[test]
    fn test_forms_are_idempotent_on_their_own_output() {
        for name in ["ControlLeft", "Kp9", "SemiColon"] {
            let e = enum_form(name);
            let v = variant_form(name);
            assert_eq!(enum_form(&e), e);
            assert_eq!(variant_form(&v), v);
        }
    }

    #[test]
    fn test_identifiers_differing_only_in_case_collide() {
        // This is the collision class `KeySet` validation has to reject.
        assert_eq!(enum_form("KeyA"), enum_form("Keya"));
        assert_eq!(variant_form("KeyA"), variant_form("Keya"));
    }
}
