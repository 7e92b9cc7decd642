//! Parsed healer configuration, handed to a healer's `configure` hook.
//!
//! Kept as a plain section/key/value map rather than re-exporting `ini::Ini`
//! directly, so the plugin trait in this crate doesn't pull in a parsing
//! dependency it never uses itself — `healer-registry` owns the `rust-ini`
//! parse and converts into this shape.

use indexmap::IndexMap;

/// INI-style configuration loaded on a healer's behalf by the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealerConfig {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl HealerConfig {
    pub fn new(sections: IndexMap<String, IndexMap<String, String>>) -> Self {
        Self { sections }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    pub fn section(&self, section: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(section)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
