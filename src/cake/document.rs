//! The in-memory model of one INI document, and of a merged cake.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::constants::DEFAULT_SECTION;

/// Ordered `key -> value` pairs of one section.
pub type Section = IndexMap<String, String>;

/// An INI document: the default section plus named sections, in file order.
///
/// Section names and keys are case-sensitive and stored exactly as written.
/// The default section is addressed as [`DEFAULT_SECTION`] and is not listed
/// by [`Document::sections`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of the default section.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Names of the named sections, in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Returns a section's own keys. [`DEFAULT_SECTION`] yields the defaults.
    pub fn section(&self, name: &str) -> Option<&Section> {
        if name == DEFAULT_SECTION {
            Some(&self.defaults)
        } else {
            self.sections.get(name)
        }
    }

    /// Returns the section, creating it empty if needed.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        if name == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections.entry(name.to_string()).or_default()
        }
    }

    /// Removes a named section. The default section cannot be removed.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Looks up `key` in `section`, falling back to the default section.
    ///
    /// Returns `None` for a section that does not exist, even when the
    /// defaults hold the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let own = self.section(section)?;
        own.get(key)
            .or_else(|| self.defaults.get(key))
            .map(String::as_str)
    }

    /// Sets `key` in `section`, creating the section if needed.
    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.section_mut(section).insert(key.into(), value.into());
    }

    /// Sets a default-section key only if it is not already present.
    ///
    /// Returns whether the value was written.
    pub fn set_default_if_absent(&mut self, key: &str, value: &str) -> bool {
        if self.defaults.contains_key(key) {
            return false;
        }
        self.defaults.insert(key.to_string(), value.to_string());
        true
    }

    /// A section's own keys followed by the default keys it does not shadow.
    pub fn effective_keys(&self, section: &str) -> Vec<&str> {
        let Some(own) = self.section(section) else {
            return Vec::new();
        };
        let mut keys: Vec<&str> = own.keys().map(String::as_str).collect();
        if section != DEFAULT_SECTION {
            keys.extend(
                self.defaults
                    .keys()
                    .filter(|k| !own.contains_key(*k))
                    .map(String::as_str),
            );
        }
        keys
    }

    /// Every `(section, key)` pair present, default section first.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let defaults = self
            .defaults
            .keys()
            .map(|k| (DEFAULT_SECTION.to_string(), k.clone()));
        let named = self
            .sections
            .iter()
            .flat_map(|(name, keys)| keys.keys().map(move |k| (name.clone(), k.clone())));
        defaults.chain(named).collect()
    }

    /// Merges `layer` on top of `self`.
    ///
    /// Sections missing here are created; every key of `layer` overwrites
    /// the value already present. Nothing is ever removed.
    pub fn merge(&mut self, layer: Document) {
        self.merge_section(DEFAULT_SECTION, layer.defaults);
        for (name, keys) in layer.sections {
            self.merge_section(&name, keys);
        }
    }

    /// Merges the keys of one section on top of `self`'s section of the same name.
    pub fn merge_section(&mut self, name: &str, keys: Section) {
        let target = self.section_mut(name);
        for (key, value) in keys {
            target.insert(key, value);
        }
    }

    /// True when no section holds any key and no named section exists.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.sections.is_empty()
    }
}

impl Serialize for Document {
    /// Serializes as a map of section name to key/value map, defaults first.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let with_defaults = !self.defaults.is_empty();
        let len = self.sections.len() + usize::from(with_defaults);
        let mut map = serializer.serialize_map(Some(len))?;
        if with_defaults {
            map.serialize_entry(DEFAULT_SECTION, &self.defaults)?;
        }
        for (name, keys) in &self.sections {
            map.serialize_entry(name, keys)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: &[(&str, &str, &str)]) -> Document {
        let mut d = Document::new();
        for (section, key, value) in pairs {
            d.set(section, *key, *value);
        }
        d
    }

    #[test]
    fn test_default_section_is_not_listed() {
        let d = doc(&[("DEFAULT", "a", "1"), ("one", "b", "2")]);
        assert_eq!(d.sections().collect::<Vec<_>>(), vec!["one"]);
        assert_eq!(d.defaults().get("a").map(String::as_str), Some("1"));
        assert!(!d.has_section(DEFAULT_SECTION));
    }

    #[test]
    fn test_get_falls_back_to_defaults() {
        let d = doc(&[("DEFAULT", "shared", "x"), ("one", "own", "y")]);
        assert_eq!(d.get("one", "shared"), Some("x"));
        assert_eq!(d.get("one", "own"), Some("y"));
        assert_eq!(d.get("missing", "shared"), None);
    }

    #[test]
    fn test_merge_later_wins_and_keeps_untouched() {
        let mut base = doc(&[("s", "k1", "base"), ("s", "k2", "base"), ("only", "k", "v")]);
        let layer = doc(&[("s", "k2", "layer"), ("new", "k", "v")]);
        base.merge(layer);

        assert_eq!(base.get("s", "k1"), Some("base"));
        assert_eq!(base.get("s", "k2"), Some("layer"));
        assert_eq!(base.get("only", "k"), Some("v"));
        assert_eq!(base.get("new", "k"), Some("v"));
    }

    #[test]
    fn test_set_default_if_absent() {
        let mut d = doc(&[("DEFAULT", "name", "layered")]);
        assert!(!d.set_default_if_absent("name", "extra"));
        assert!(d.set_default_if_absent("other", "extra"));
        assert_eq!(d.get(DEFAULT_SECTION, "name"), Some("layered"));
        assert_eq!(d.get(DEFAULT_SECTION, "other"), Some("extra"));
    }

    #[test]
    fn test_effective_keys_order() {
        let d = doc(&[("DEFAULT", "common", "c"), ("DEFAULT", "layers", "x"), ("cake", "layers", "y")]);
        assert_eq!(d.effective_keys("cake"), vec!["layers", "common"]);
        assert!(d.effective_keys("nope").is_empty());
    }

    #[test]
    fn test_serialize_defaults_first() {
        let d = doc(&[("s", "k", "v"), ("DEFAULT", "d", "1")]);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"DEFAULT":{"d":"1"},"s":{"k":"v"}}"#);
    }
}
