//! The canonical key list and the rules that keep it collision-free.
//!
//! A [`KeySet`] is the single source of truth consumed by every renderer.
//! It can only be built through validating constructors, so once a value
//! exists the following hold for every pair of distinct entries:
//!
//! - their protocol-enum forms differ,
//! - their protocol-variant forms differ,
//! - their platform names differ.
//!
//! Position in the list is significant: entry `i` (zero-based) carries
//! protocol tag `i + 1`.  Tag 0 is reserved for the `UNKNOWN_KEY` sentinel.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::debug;

pub mod builtin;
pub mod naming;

pub use builtin::BUILTIN_KEYS;

/// Errors raised while building a [`KeySet`].
///
/// Every variant is a configuration defect in the authored list.  They are
/// detected before any output is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeySetError {
    /// An entry cannot be used as an identifier on both sides.
    #[error("invalid key identifier {name:?} at entry {position}: {reason}")]
    InvalidIdentifier {
        name: String,
        /// One-based position among the non-empty entries.
        position: usize,
        reason: &'static str,
    },

    /// Two entries upper-case to the same protocol enum tag name.
    #[error("keys {first:?} and {second:?} both map to protocol enum name {form}")]
    EnumFormCollision {
        first: String,
        second: String,
        form: String,
    },

    /// Two entries normalize to the same protocol variant name.
    #[error("keys {first:?} and {second:?} both map to protocol variant {form}")]
    VariantFormCollision {
        first: String,
        second: String,
        form: String,
    },

    /// Two entries resolve to the same platform key (after overrides).
    #[error("keys {first:?} and {second:?} both map to platform key {platform}")]
    PlatformNameCollision {
        first: String,
        second: String,
        platform: String,
    },

    /// A platform override was given for a key that is not in the list.
    #[error("platform override given for {0:?}, which is not in the key list")]
    UnknownOverride(String),

    /// A platform override value is not a usable identifier.
    #[error("invalid platform override {platform:?} for key {key:?}: {reason}")]
    InvalidOverride {
        key: String,
        platform: String,
        reason: &'static str,
    },
}

/// One authored key identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    canonical: String,
    platform: Option<String>,
}

impl KeyEntry {
    /// Creates an entry whose platform name equals its canonical form.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            platform: None,
        }
    }

    /// The identifier exactly as authored.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The platform library's variant name for this key.
    pub fn platform_name(&self) -> &str {
        self.platform.as_deref().unwrap_or(&self.canonical)
    }

    /// Returns `true` if the platform name was set explicitly.
    pub fn has_override(&self) -> bool {
        self.platform.is_some()
    }
}

/// All textual renderings of one entry, as handed to the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyForms<'a> {
    /// Protocol tag, starting at 1.
    pub tag: usize,
    pub canonical: &'a str,
    pub enum_form: String,
    pub variant_form: String,
    pub platform: &'a str,
}

/// Validated, ordered list of key identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    entries: Vec<KeyEntry>,
}

/// Splits an authored comma-separated list.
///
/// Whitespace around each entry is stripped and empty entries are skipped,
/// so trailing separators and line breaks are harmless.  Relative order of the
/// remaining entries is preserved.
pub fn split_authored(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

impl KeySet {
    /// Builds a key set from identifiers in tag order.
    ///
    /// Entries are trimmed and blank entries skipped before validation.
    ///
    /// # Errors
    ///
    /// Returns a [`KeySetError`] describing the first invalid entry or the
    /// first colliding pair.
    pub fn new<I, S>(names: I) -> Result<Self, KeySetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_overrides(names, &BTreeMap::new())
    }

    /// Builds a key set with an explicit canonical → platform name table.
    ///
    /// Keys absent from `overrides` use their canonical form on the platform
    /// side.  The protocol-side forms are always derived from the canonical
    /// form.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`KeySet::new`], returns
    /// [`KeySetError::UnknownOverride`] for an override naming a key that is
    /// not in the list and [`KeySetError::InvalidOverride`] for an override
    /// value that is not a valid identifier.
    pub fn with_overrides<I, S>(
        names: I,
        overrides: &BTreeMap<String, String>,
    ) -> Result<Self, KeySetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<KeyEntry> = names
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .map(KeyEntry::new)
            .collect();

        for (key, platform) in overrides {
            let entry = entries
                .iter_mut()
                .find(|e| e.canonical == *key)
                .ok_or_else(|| KeySetError::UnknownOverride(key.clone()))?;
            let platform = platform.trim();
            check_identifier(platform).map_err(|reason| KeySetError::InvalidOverride {
                key: key.clone(),
                platform: platform.to_string(),
                reason,
            })?;
            entry.platform = Some(platform.to_string());
        }

        validate(&entries)?;
        debug!(
            keys = entries.len(),
            overrides = overrides.len(),
            "key set validated"
        );
        Ok(Self { entries })
    }

    /// Parses an authored comma-separated list (see [`split_authored`]).
    ///
    /// # Errors
    ///
    /// Same as [`KeySet::new`].
    pub fn parse(text: &str) -> Result<Self, KeySetError> {
        Self::new(split_authored(text))
    }

    /// The key set shipped with keysync ([`BUILTIN_KEYS`]).
    pub fn builtin() -> Self {
        let entries: Vec<KeyEntry> = BUILTIN_KEYS.iter().map(|&k| KeyEntry::new(k)).collect();
        debug_assert!(validate(&entries).is_ok(), "built-in key list must validate");
        Self { entries }
    }

    /// Number of keys, excluding the sentinel.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no keys (only the sentinel will be
    /// rendered).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw entries in tag order.
    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    /// Returns the protocol tag of `canonical`, or `None` if it is not in the
    /// set.
    pub fn tag_of(&self, canonical: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.canonical == canonical)
            .map(|i| i + 1)
    }

    /// Iterates every entry with its derived forms, in tag order.
    pub fn iter(&self) -> impl Iterator<Item = KeyForms<'_>> + '_ {
        self.entries.iter().enumerate().map(|(i, e)| KeyForms {
            tag: i + 1,
            canonical: &e.canonical,
            enum_form: naming::enum_form(&e.canonical),
            variant_form: naming::variant_form(&e.canonical),
            platform: e.platform_name(),
        })
    }
}

/// Checks that `name` survives both casing transforms as an identifier.
fn check_identifier(name: &str) -> Result<(), &'static str> {
    let Some(first) = name.chars().next() else {
        return Err("identifier is empty");
    };
    if !first.is_ascii_alphabetic() {
        return Err("identifier must start with an ASCII letter");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("identifier may only contain ASCII letters and digits");
    }
    Ok(())
}

/// Records `owner` as the holder of `form`; on a clash returns the previous
/// holder.
fn claim<'a>(
    seen: &mut HashMap<String, &'a str>,
    form: String,
    owner: &'a str,
) -> Result<(), (String, String)> {
    match seen.entry(form) {
        Entry::Occupied(o) => Err((o.get().to_string(), o.key().clone())),
        Entry::Vacant(v) => {
            v.insert(owner);
            Ok(())
        }
    }
}

fn validate(entries: &[KeyEntry]) -> Result<(), KeySetError> {
    let mut enum_seen = HashMap::with_capacity(entries.len());
    let mut variant_seen = HashMap::with_capacity(entries.len());
    let mut platform_seen = HashMap::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let canonical = entry.canonical.as_str();
        check_identifier(canonical).map_err(|reason| KeySetError::InvalidIdentifier {
            name: canonical.to_string(),
            position: i + 1,
            reason,
        })?;

        claim(&mut enum_seen, naming::enum_form(canonical), canonical).map_err(
            |(first, form)| KeySetError::EnumFormCollision {
                first,
                second: canonical.to_string(),
                form,
            },
        )?;
        claim(&mut variant_seen, naming::variant_form(canonical), canonical).map_err(
            |(first, form)| KeySetError::VariantFormCollision {
                first,
                second: canonical.to_string(),
                form,
            },
        )?;
        claim(&mut platform_seen, entry.platform_name().to_string(), canonical).map_err(
            |(first, platform)| KeySetError::PlatformNameCollision {
                first,
                second: canonical.to_string(),
                platform,
            },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicals(set: &KeySet) -> Vec<&str> {
        set.entries().iter().map(KeyEntry::canonical).collect()
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_split_authored_strips_whitespace_and_skips_blanks() {
        // Arrange
        let text = "\n      Alt,\n    AltGr,\n  ,  \n    Function,\n    ";

        // Act
        let parts = split_authored(text);

        // Assert
        assert_eq!(parts, vec!["Alt", "AltGr", "Function"]);
    }

    #[test]
    fn test_messy_list_normalizes_like_clean_list() {
        // Arrange
        let messy = KeySet::parse("  Escape,\n,KeyA ,\t Space,,").expect("messy list");
        let clean = KeySet::parse("Escape,KeyA,Space").expect("clean list");

        // Assert
        assert_eq!(messy, clean);
    }

    #[test]
    fn test_new_trims_and_skips_blank_entries() {
        let set = KeySet::new(["  Escape", "", "   ", "KeyA\n"]).expect("valid");
        assert_eq!(canonicals(&set), vec!["Escape", "KeyA"]);
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let set = KeySet::parse(" ,\n, ").expect("empty list is valid");
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
    }

    // ── Tags and forms ────────────────────────────────────────────────────────

    #[test]
    fn test_iter_assigns_tags_from_one_in_list_order() {
        // Arrange
        let set = KeySet::parse("Escape, KeyA, Space").unwrap();

        // Act
        let forms: Vec<_> = set.iter().collect();

        // Assert
        assert_eq!(forms.len(), 3);
        assert_eq!(forms[0].tag, 1);
        assert_eq!(forms[0].enum_form, "ESCAPE");
        assert_eq!(forms[1].tag, 2);
        assert_eq!(forms[1].canonical, "KeyA");
        assert_eq!(forms[1].enum_form, "KEYA");
        assert_eq!(forms[1].variant_form, "Keya");
        assert_eq!(forms[1].platform, "KeyA");
        assert_eq!(forms[2].tag, 3);
    }

    #[test]
    fn test_tag_of_returns_one_based_position() {
        let set = KeySet::parse("Escape,KeyA,Space").unwrap();
        assert_eq!(set.tag_of("Escape"), Some(1));
        assert_eq!(set.tag_of("Space"), Some(3));
        assert_eq!(set.tag_of("Keya"), None);
    }

    #[test]
    fn test_builtin_set_validates_and_ends_with_function() {
        // Arrange
        let builtin = KeySet::builtin();

        // Act
        let rebuilt = KeySet::new(BUILTIN_KEYS.iter().copied());

        // Assert
        assert_eq!(rebuilt.as_ref(), Ok(&builtin));
        assert_eq!(builtin.tag_of("Alt"), Some(1));
        assert_eq!(builtin.tag_of("Function"), Some(builtin.len()));
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_case_only_difference_is_rejected_naming_both_keys() {
        // Act
        let err = KeySet::parse("Escape, KeyA, Keya").unwrap_err();

        // Assert
        assert_eq!(
            err,
            KeySetError::EnumFormCollision {
                first: "KeyA".to_string(),
                second: "Keya".to_string(),
                form: "KEYA".to_string(),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("KeyA") && msg.contains("Keya"), "{msg}");
    }

    #[test]
    fn test_exact_duplicate_is_rejected() {
        let err = KeySet::parse("Tab, Space, Tab").unwrap_err();
        assert!(matches!(err, KeySetError::EnumFormCollision { ref form, .. } if form == "TAB"));
    }

    #[test]
    fn test_identifier_with_inner_whitespace_is_rejected() {
        let err = KeySet::parse("Escape, Page Up").unwrap_err();
        assert!(matches!(
            err,
            KeySetError::InvalidIdentifier { ref name, position: 2, .. } if name == "Page Up"
        ));
    }

    #[test]
    fn test_identifier_starting_with_digit_is_rejected() {
        let err = KeySet::parse("1Key").unwrap_err();
        assert!(matches!(err, KeySetError::InvalidIdentifier { position: 1, .. }));
    }

    #[test]
    fn test_identifier_with_underscore_is_rejected() {
        // Underscores would let a key upper-case onto the UNKNOWN_KEY sentinel.
        let err = KeySet::parse("Unknown_Key").unwrap_err();
        assert!(matches!(err, KeySetError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_non_ascii_identifier_is_rejected() {
        let err = KeySet::parse("Ключ").unwrap_err();
        assert!(matches!(err, KeySetError::InvalidIdentifier { .. }));
    }

    // ── Overrides ─────────────────────────────────────────────────────────────

    #[test]
    fn test_override_changes_platform_name_only() {
        // Arrange
        let overrides = BTreeMap::from([("KpReturn".to_string(), "KpEnter".to_string())]);

        // Act
        let set = KeySet::with_overrides(["Escape", "KpReturn"], &overrides).unwrap();
        let forms: Vec<_> = set.iter().collect();

        // Assert
        assert_eq!(forms[1].platform, "KpEnter");
        assert_eq!(forms[1].enum_form, "KPRETURN");
        assert_eq!(forms[1].variant_form, "Kpreturn");
        assert!(set.entries()[1].has_override());
        assert!(!set.entries()[0].has_override());
    }

    #[test]
    fn test_override_for_missing_key_is_rejected() {
        let overrides = BTreeMap::from([("Menu".to_string(), "Apps".to_string())]);
        let err = KeySet::with_overrides(["Escape"], &overrides).unwrap_err();
        assert_eq!(err, KeySetError::UnknownOverride("Menu".to_string()));
    }

    #[test]
    fn test_invalid_override_value_is_rejected() {
        let overrides = BTreeMap::from([("Escape".to_string(), "Esc ape".to_string())]);
        let err = KeySet::with_overrides(["Escape"], &overrides).unwrap_err();
        assert!(matches!(err, KeySetError::InvalidOverride { ref key, .. } if key == "Escape"));
    }

    #[test]
    fn test_override_onto_existing_platform_name_is_rejected() {
        // Arrange: KpReturn would dispatch to the same platform key as Return.
        let overrides = BTreeMap::from([("KpReturn".to_string(), "Return".to_string())]);

        // Act
        let err = KeySet::with_overrides(["Return", "KpReturn"], &overrides).unwrap_err();

        // Assert
        assert_eq!(
            err,
            KeySetError::PlatformNameCollision {
                first: "Return".to_string(),
                second: "KpReturn".to_string(),
                platform: "Return".to_string(),
            }
        );
    }

    #[test]
    fn test_versioned_sets_coexist() {
        // Two generations of the list, built side by side without shared state.
        let v1 = KeySet::parse("Escape, KeyA").unwrap();
        let v2 = KeySet::parse("Escape, KeyA, Function").unwrap();

        assert_eq!(v1.tag_of("KeyA"), v2.tag_of("KeyA"));
        assert_eq!(v1.tag_of("Function"), None);
        assert_eq!(v2.tag_of("Function"), Some(3));
    }
}
