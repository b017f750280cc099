use std::collections::HashSet;

use folio_protocol::SectionId;

use crate::error::ConfigError;

/// Section ids of the stock page, top to bottom.
pub const DEFAULT_SECTIONS: [&str; 6] = ["hero", "about", "skills", "projects", "resume", "contact"];

/// Ordered, duplicate-free list of page sections, fixed at startup.
///
/// Order is document order; the tracker relies on it for its first-match
/// tie-break.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRegistry {
    ids: Vec<SectionId>,
}

impl SectionRegistry {
    pub fn new<I, S>(ids: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if !seen.insert(id.to_owned()) {
                return Err(ConfigError::DuplicateSection(id.to_owned()));
            }
            out.push(SectionId::new(id));
        }
        if out.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        Ok(Self { ids: out })
    }

    /// The section that is active before any scroll event.
    pub fn first(&self) -> &SectionId {
        // Non-empty by construction.
        &self.ids[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[SectionId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Look up the registered id for `id`, sharing its allocation.
    pub fn get(&self, id: &str) -> Option<&SectionId> {
        self.ids.iter().find(|s| *s == id)
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self {
            ids: DEFAULT_SECTIONS.iter().map(|s| SectionId::new(s)).collect(),
        }
    }
}
