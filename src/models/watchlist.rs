use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MediaKind;

/// A title saved by the user
///
/// Field names on the wire match the stored collection format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: u64,
    #[serde(rename = "media_type")]
    pub kind: MediaKind,
    #[serde(rename = "title")]
    pub display_name: String,
    #[serde(rename = "added_date")]
    pub added_at: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn is(&self, id: u64, kind: MediaKind) -> bool {
        self.id == id && self.kind == kind
    }
}

/// The user's saved titles, in the order they were added
///
/// No two entries share the same `(id, kind)` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a watchlist from stored entries, dropping duplicate pairs
    pub fn from_entries(entries: Vec<WatchlistEntry>) -> Self {
        let mut watchlist = Self::new();
        for entry in entries {
            if !watchlist.contains(entry.id, entry.kind) {
                watchlist.entries.push(entry);
            }
        }
        watchlist
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: u64, kind: MediaKind) -> bool {
        self.entries.iter().any(|e| e.is(id, kind))
    }

    /// Adds the title if absent, removes it if present
    ///
    /// Returns `true` when the title is on the watchlist afterwards.
    pub fn toggle(
        &mut self,
        id: u64,
        kind: MediaKind,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.contains(id, kind) {
            self.entries.retain(|e| !e.is(id, kind));
            false
        } else {
            self.entries.push(WatchlistEntry {
                id,
                kind,
                display_name: display_name.into(),
                added_at: now,
            });
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn sample() -> Watchlist {
        let mut watchlist = Watchlist::new();
        watchlist.toggle(1, MediaKind::Movie, "Heat", at(10));
        watchlist.toggle(1, MediaKind::Show, "Heat: The Series", at(20));
        watchlist
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let original = sample();
        let mut watchlist = original.clone();

        assert!(watchlist.toggle(9, MediaKind::Movie, "Alien", at(30)));
        assert_eq!(watchlist.len(), 3);
        assert!(!watchlist.toggle(9, MediaKind::Movie, "Alien", at(40)));

        assert_eq!(watchlist, original);
        assert_eq!(watchlist.len(), original.len());
    }

    #[test]
    fn test_same_id_different_kind_are_distinct() {
        let watchlist = sample();
        assert_eq!(watchlist.len(), 2);
        assert!(watchlist.contains(1, MediaKind::Movie));
        assert!(watchlist.contains(1, MediaKind::Show));
        assert!(!watchlist.contains(2, MediaKind::Movie));
    }

    #[test]
    fn test_toggle_removes_only_matching_pair() {
        let mut watchlist = sample();
        watchlist.toggle(1, MediaKind::Movie, "Heat", at(50));
        assert_eq!(watchlist.len(), 1);
        assert!(watchlist.contains(1, MediaKind::Show));
    }

    #[test]
    fn test_from_entries_drops_duplicates() {
        let entries = vec![
            WatchlistEntry {
                id: 5,
                kind: MediaKind::Movie,
                display_name: "First".to_string(),
                added_at: at(1),
            },
            WatchlistEntry {
                id: 5,
                kind: MediaKind::Movie,
                display_name: "Again".to_string(),
                added_at: at(2),
            },
        ];
        let watchlist = Watchlist::from_entries(entries);
        assert_eq!(watchlist.len(), 1);
        assert_eq!(watchlist.entries()[0].display_name, "First");
    }

    #[test]
    fn test_stored_format() {
        let json = r#"[{
            "id": 27205,
            "media_type": "movie",
            "title": "Inception",
            "added_date": "2024-05-01T12:00:00Z"
        }]"#;

        let watchlist: Watchlist = serde_json::from_str(json).unwrap();
        assert_eq!(watchlist.len(), 1);
        let entry = &watchlist.entries()[0];
        assert_eq!(entry.id, 27205);
        assert_eq!(entry.kind, MediaKind::Movie);
        assert_eq!(entry.display_name, "Inception");

        let back = serde_json::to_value(&watchlist).unwrap();
        assert_eq!(back[0]["media_type"], "movie");
        assert_eq!(back[0]["title"], "Inception");
    }
}
