/// A note as read from an ENEX export, before any normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub title: Option<String>,
    /// Raw `created` text, parsed only at export time
    pub created: String,
    /// Raw `updated` text, parsed only at export time
    pub updated: String,
    /// Tags in document order
    pub tags: Vec<String>,
    /// Value of `note-attributes/source-url`, empty when absent
    pub url: String,
}

impl Note {
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}
