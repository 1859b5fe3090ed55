//! The bounded history store

use crate::backend::HistoryBackend;
use chrono::{SecondsFormat, Utc};
use credence_domain::{EvaluationResult, HistoryEntry, Submission};
use tracing::{debug, warn};
use uuid::Uuid;

/// Key under which the history is persisted
pub const HISTORY_KEY: &str = "evaluation_history";

/// Maximum number of retained entries
pub const MAX_ENTRIES: usize = 50;

/// Newest-first evaluation history, capped at [`MAX_ENTRIES`]
///
/// Persistence is best effort: a store that cannot read or write its
/// backend keeps working in memory and logs a warning.
pub struct HistoryStore {
    backend: Box<dyn HistoryBackend>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the store, loading whatever the backend holds
    ///
    /// Missing or unreadable history yields an empty store. Oversized
    /// history is truncated to the newest [`MAX_ENTRIES`] entries.
    pub fn open<B: HistoryBackend + 'static>(backend: B) -> Self {
        let entries = load_entries(&backend);
        Self {
            backend: Box::new(backend),
            entries,
        }
    }

    /// Record a submission and its optional result as the newest entry
    ///
    /// The oldest entry is evicted once the cap is exceeded.
    pub fn append(&mut self, input: Submission, result: Option<EvaluationResult>) -> HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::now_v7().to_string(),
            input,
            result,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.entries.insert(0, entry.clone());
        self.entries.truncate(MAX_ENTRIES);
        self.persist();

        entry
    }

    /// All entries, newest first
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.entries) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to encode evaluation history: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.save(HISTORY_KEY, &encoded) {
            warn!("Failed to persist evaluation history: {}", e);
        }
    }
}

fn load_entries(backend: &dyn HistoryBackend) -> Vec<HistoryEntry> {
    let raw = match backend.load(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read evaluation history: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
        Ok(mut entries) => {
            entries.truncate(MAX_ENTRIES);
            debug!("Loaded {} history entries", entries.len());
            entries
        }
        Err(e) => {
            warn!("Discarding unreadable evaluation history: {}", e);
            Vec::new()
        }
    }
}
