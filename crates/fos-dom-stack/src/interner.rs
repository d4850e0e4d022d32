//! String Interner - Deduplicate node names
//!
//! Tag and attribute names repeat constantly in a document, so every node
//! name is stored once and referenced by a 4-byte id.

use std::collections::HashMap;

/// Interned string ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// Names of node types that have no name of their own
pub(crate) const DOCUMENT_NAME: &str = "#document";
pub(crate) const FRAGMENT_NAME: &str = "#document-fragment";
pub(crate) const TEXT_NAME: &str = "#text";
pub(crate) const CDATA_NAME: &str = "#cdata-section";
pub(crate) const COMMENT_NAME: &str = "#comment";

/// String interner for node names
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create an interner with the synthetic node names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(64),
            map: HashMap::with_capacity(64),
        };

        // Index 0 is always the empty string
        interner.intern("");

        for name in [DOCUMENT_NAME, FRAGMENT_NAME, TEXT_NAME, CDATA_NAME, COMMENT_NAME] {
            interner.intern(name);
        }

        interner
    }

    /// Intern a string, returning the existing ID if already present
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&id) = self.map.get(s) {
            return InternedString(id);
        }

        let id = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), id);
        InternedString(id)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&id| InternedString(id))
    }

    /// Get the string for an interned ID
    ///
    /// Unknown ids resolve to the empty string.
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
