use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long a cached learnings payload stays usable.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<String>,
    inserted_at: Instant,
}

/// Process-wide memo of derived learnings text per (student, week). Nothing
/// persists across restarts; expiry is checked lazily at read time and by
/// the opportunistic purge at the start of each summarize call.
#[derive(Debug, Default)]
pub struct LearningCache {
    entries: Mutex<HashMap<(String, i32), CacheEntry>>,
}

impl LearningCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the payload for a live entry; expired entries count as absent.
    pub fn get(&self, student_no: &str, week: i32) -> Option<Vec<String>> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get(&(student_no.to_string(), week))?;
        if entry.inserted_at.elapsed() >= CACHE_TTL {
            return None;
        }
        Some(entry.payload.clone())
    }

    pub fn put(&self, student_no: &str, week: i32, payload: Vec<String>) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            (student_no.to_string(), week),
            CacheEntry {
                payload,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn purge_expired(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.retain(|_, entry| entry.inserted_at.elapsed() < CACHE_TTL);
    }

    /// Rewinds an entry's insertion time, as if it had been cached `age` ago.
    #[cfg(test)]
    pub fn backdate(&self, student_no: &str, week: i32, age: Duration) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if let Some(entry) = entries.get_mut(&(student_no.to_string(), week)) {
            entry.inserted_at = Instant::now() - age;
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }
}
