use std::collections::HashMap;

use crate::evernote::Note;

/// Anomaly counts accumulated over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Every note handed to `merge`
    pub notes_seen: usize,
    /// Notes dropped for lacking a source URL
    pub empty_urls: usize,
    /// Notes whose URL was already stored
    pub duplicates: usize,
}

/// What `merge` decided for a candidate note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    EmptyUrl,
    /// The candidate had more tags and replaced the stored note
    Overridden { previous_tags: usize, candidate_tags: usize },
    /// The stored note had at least as many tags; the candidate was dropped
    Dropped { stored_tags: usize, candidate_tags: usize },
}

/// URL-keyed note collection applying the "richer tag set wins" policy.
///
/// Iteration order is the order in which each URL was first inserted.
/// Replacing a note keeps its original position.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Note>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a candidate note into the store, updating `counters` and
    /// logging every anomaly as it happens.
    pub fn merge(&mut self, candidate: Note, counters: &mut Counters) -> MergeOutcome {
        counters.notes_seen += 1;

        if !candidate.has_url() {
            counters.empty_urls += 1;
            log::warn!(
                "Skipping note without source URL: {}",
                candidate.title.as_deref().unwrap_or("(untitled)")
            );
            return MergeOutcome::EmptyUrl;
        }

        let Some(&position) = self.index.get(&candidate.url) else {
            self.index.insert(candidate.url.clone(), self.records.len());
            self.records.push(candidate);
            return MergeOutcome::Inserted;
        };

        counters.duplicates += 1;
        let stored = &mut self.records[position];
        let stored_tags = stored.tag_count();
        let candidate_tags = candidate.tag_count();

        if candidate_tags > stored_tags {
            log::warn!(
                "Duplicate found for {}: overriding ({} tags replaces {} tags)",
                candidate.url,
                candidate_tags,
                stored_tags
            );
            *stored = candidate;
            MergeOutcome::Overridden {
                previous_tags: stored_tags,
                candidate_tags,
            }
        } else {
            log::warn!(
                "Duplicate found for {}: dropping ({} tags, keeping {} tags)",
                candidate.url,
                candidate_tags,
                stored_tags
            );
            MergeOutcome::Dropped {
                stored_tags,
                candidate_tags,
            }
        }
    }

    pub fn get(&self, url: &str) -> Option<&Note> {
        self.index.get(url).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored notes in first-insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(url: &str, tags: &[&str]) -> Note {
        Note {
            title: Some(format!("{} ({} tags)", url, tags.len())),
            created: "20230115T120000Z".to_string(),
            updated: "20230115T120000Z".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_insert_new_urls() {
        let mut store = RecordStore::new();
        let mut counters = Counters::default();

        assert_eq!(store.merge(note("https://a.test", &["x"]), &mut counters), MergeOutcome::Inserted);
        assert_eq!(store.merge(note("https://b.test", &[]), &mut counters), MergeOutcome::Inserted);

        assert_eq!(store.len(), 2);
        assert_eq!(counters, Counters { notes_seen: 2, empty_urls: 0, duplicates: 0 });
    }

    #[test]
    fn test_empty_url_is_counted_and_dropped() {
        let mut store = RecordStore::new();
        let mut counters = Counters::default();

        let outcome = store.merge(note("", &["x"]), &mut counters);

        assert_eq!(outcome, MergeOutcome::EmptyUrl);
        assert!(store.is_empty());
        assert_eq!(counters.empty_urls, 1);
        assert_eq!(counters.duplicates, 0);
    }

    #[test]
    fn test_richer_duplicate_overrides() {
        let mut store = RecordStore::new();
        let mut counters = Counters::default();

        store.merge(note("https://y.test", &["a"]), &mut counters);
        let outcome = store.merge(note("https://y.test", &["a", "b", "c"]), &mut counters);

        assert_eq!(
            outcome,
            MergeOutcome::Overridden { previous_tags: 1, candidate_tags: 3 }
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("https://y.test").unwrap().tag_count(), 3);
        assert_eq!(counters.duplicates, 1);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let mut store = RecordStore::new();
        let mut counters = Counters::default();

        let mut first = note("https://t.test", &["a", "b"]);
        first.title = Some("first".to_string());
        let mut second = note("https://t.test", &["c", "d"]);
        second.title = Some("second".to_string());

        store.merge(first, &mut counters);
        let outcome = store.merge(second, &mut counters);

        assert_eq!(outcome, MergeOutcome::Dropped { stored_tags: 2, candidate_tags: 2 });
        assert_eq!(store.get("https://t.test").unwrap().title.as_deref(), Some("first"));
    }

    #[test]
    fn test_poorer_duplicate_is_dropped() {
        let mut store = RecordStore::new();
        let mut counters = Counters::default();

        store.merge(note("https://p.test", &["a", "b"]), &mut counters);
        store.merge(note("https://p.test", &[]), &mut counters);

        assert_eq!(store.get("https://p.test").unwrap().tag_count(), 2);
        assert_eq!(counters.duplicates, 1);
    }

    #[test]
    fn test_override_keeps_first_insertion_position() {
        let mut store = RecordStore::new();
        let mut counters = Counters::default();

        store.merge(note("https://1.test", &[]), &mut counters);
        store.merge(note("https://2.test", &[]), &mut counters);
        store.merge(note("https://1.test", &["richer"]), &mut counters);

        let urls: Vec<&str> = store.iter().map(|n| n.url.as_str()).collect();
        assert_eq!(urls, vec!["https://1.test", "https://2.test"]);
        assert_eq!(store.iter().next().unwrap().tags, vec!["richer".to_string()]);
    }

    #[test]
    fn test_stored_tag_count_dominates_candidates() {
        let mut store = RecordStore::new();
        let mut counters = Counters::default();
        let tag_counts = [2usize, 0, 5, 3, 5, 1];

        for count in tag_counts {
            let tags: Vec<String> = (0..count).map(|i| format!("t{}", i)).collect();
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            store.merge(note("https://same.test", &tag_refs), &mut counters);
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("https://same.test").unwrap().tag_count(), 5);
        assert_eq!(counters.duplicates, tag_counts.len() - 1);
    }
}
