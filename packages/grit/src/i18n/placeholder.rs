//! Placeholder name registry
//!
//! Keeps the placeholder names of one entry unique.

use std::collections::{HashMap, HashSet};

/// Tracks the names emitted for a single entry
#[derive(Debug, Default)]
pub struct PlaceholderRegistry {
    used: HashSet<String>,
    public_to_next_id: HashMap<String, usize>,
}

impl PlaceholderRegistry {
    pub fn new() -> Self {
        PlaceholderRegistry::default()
    }

    /// Claims an authored placeholder name, suffixed only when already taken
    pub fn claim_name(&mut self, name: &str) -> String {
        if self.used.insert(name.to_string()) {
            self.public_to_next_id.entry(name.to_string()).or_insert(1);
            return name.to_string();
        }
        self.claim_suffixed(name)
    }

    /// Claims a name for a resolved reference; these always carry a suffix
    pub fn claim_reference_name(&mut self, id: &str) -> String {
        self.claim_suffixed(&to_public_name(id))
    }

    fn claim_suffixed(&mut self, base: &str) -> String {
        let mut next_id = self.public_to_next_id.get(base).copied().unwrap_or(1);
        let mut name = format!("{}_{}", base, next_id);
        while self.used.contains(&name) {
            next_id += 1;
            name = format!("{}_{}", base, next_id);
        }
        self.public_to_next_id.insert(base.to_string(), next_id + 1);
        self.used.insert(name.clone());
        name
    }
}

/// Convert an identifier to a placeholder name.
/// Placeholder names can only contain A-Z, 0-9 and _
pub fn to_public_name(internal_name: &str) -> String {
    internal_name
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
