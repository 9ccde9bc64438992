use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::LEADERBOARD_KEY;
use crate::store::{KeyValueStore, StoreError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub score: u32,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        PlayerRecord {
            name: name.into(),
            score,
        }
    }
}

/// Top scores, highest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard {
    entries: Vec<PlayerRecord>,
    capacity: usize,
}

impl Leaderboard {
    pub fn entries(&self) -> &[PlayerRecord] {
        &self.entries
    }

    /// Reads the stored list. Absent or unparseable data yields an empty board.
    pub fn load(store: &impl KeyValueStore, capacity: usize) -> Self {
        let entries = match store.get(LEADERBOARD_KEY) {
            None => Vec::new(),
            Some(raw) if raw.trim().is_empty() => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<PlayerRecord>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring malformed leaderboard data: {}", e);
                    Vec::new()
                }
            },
        };

        let mut board = Leaderboard { entries, capacity };
        board.rank();
        board
    }

    /// Read-modify-write of the stored list with one new record.
    ///
    /// On failure the in-memory view is left as it was.
    pub fn save(
        &mut self,
        store: &mut impl KeyValueStore,
        record: PlayerRecord,
    ) -> Result<(), StoreError> {
        let mut updated = Self::load(&*store, self.capacity);
        info!("Recording score {} for {}", record.score, record.name);
        updated.entries.push(record);
        updated.rank();

        let encoded = serde_json::to_string(&updated.entries)?;
        store.set(LEADERBOARD_KEY, &encoded)?;

        *self = updated;
        Ok(())
    }

    fn rank(&mut self) {
        // Stable, so earlier entries win ties.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct ReadOnlyStore(Option<String>);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            self.0.clone()
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only"),
            })
        }
    }

    fn is_sorted_descending(entries: &[PlayerRecord]) -> bool {
        entries.windows(2).all(|w| w[0].score >= w[1].score)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = MemoryStore::default();
        let board = Leaderboard::load(&store, 10);
        assert!(board.entries().is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut store = MemoryStore::default();
        store.set(LEADERBOARD_KEY, "{not json").unwrap();
        assert!(Leaderboard::load(&store, 10).entries().is_empty());

        store.set(LEADERBOARD_KEY, "[{\"name\":\"A\"}]").unwrap();
        assert!(Leaderboard::load(&store, 10).entries().is_empty());
    }

    #[test]
    fn test_load_sorts_and_truncates() {
        let stored: Vec<PlayerRecord> = (0..15)
            .map(|i| PlayerRecord::new(format!("p{i}"), i))
            .collect();
        let mut store = MemoryStore::default();
        store
            .set(LEADERBOARD_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let board = Leaderboard::load(&store, 10);

        assert_eq!(board.entries().len(), 10);
        assert!(is_sorted_descending(board.entries()));
        assert_eq!(board.entries()[0], PlayerRecord::new("p14", 14));
        assert_eq!(board.entries()[9], PlayerRecord::new("p5", 5));
    }

    #[test]
    fn test_save_into_empty_store() {
        let mut store = MemoryStore::default();
        let mut board = Leaderboard::load(&store, 10);

        board.save(&mut store, PlayerRecord::new("A", 3)).unwrap();

        assert_eq!(board.entries(), &[PlayerRecord::new("A", 3)]);
        assert_eq!(
            store.get(LEADERBOARD_KEY).as_deref(),
            Some("[{\"name\":\"A\",\"score\":3}]")
        );
    }

    #[test]
    fn test_save_keeps_top_ten_sorted() {
        let mut store = MemoryStore::default();
        let mut board = Leaderboard::load(&store, 10);

        for score in [4, 12, 0, 7, 7, 30, 1, 9, 2, 15, 3, 8] {
            board
                .save(&mut store, PlayerRecord::new(format!("s{score}"), score))
                .unwrap();
            assert!(board.entries().len() <= 10);
            assert!(is_sorted_descending(board.entries()));
        }

        let scores: Vec<u32> = board.entries().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![30, 15, 12, 9, 8, 7, 7, 4, 3, 2]);
        assert_eq!(Leaderboard::load(&store, 10), board);
    }

    #[test]
    fn test_save_merges_with_stored_data() {
        let mut store = MemoryStore::default();
        let mut stale = Leaderboard::load(&store, 10);

        // Someone else wrote to the store after we loaded.
        let mut other = Leaderboard::load(&store, 10);
        other.save(&mut store, PlayerRecord::new("B", 9)).unwrap();

        stale.save(&mut store, PlayerRecord::new("A", 3)).unwrap();
        assert_eq!(
            stale.entries(),
            &[PlayerRecord::new("B", 9), PlayerRecord::new("A", 3)]
        );
    }

    #[test]
    fn test_ties_keep_earlier_entry_first() {
        let mut store = MemoryStore::default();
        let mut board = Leaderboard::load(&store, 10);

        board.save(&mut store, PlayerRecord::new("first", 5)).unwrap();
        board.save(&mut store, PlayerRecord::new("second", 5)).unwrap();

        assert_eq!(board.entries()[0].name, "first");
        assert_eq!(board.entries()[1].name, "second");
    }

    #[test]
    fn test_failed_save_leaves_view_unchanged() {
        let stored = serde_json::to_string(&vec![PlayerRecord::new("B", 9)]).unwrap();
        let mut store = ReadOnlyStore(Some(stored));
        let mut board = Leaderboard::load(&store, 10);

        let result = board.save(&mut store, PlayerRecord::new("A", 3));

        assert!(result.is_err());
        assert_eq!(board.entries(), &[PlayerRecord::new("B", 9)]);
    }
}
