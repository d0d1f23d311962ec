use crate::error::PersistenceError;
use crate::session::SessionSnapshot;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

pub const SAVE_KEY: &str = "examiai_quiz_progress";

/// Snapshots older than this are discarded at read time.
pub fn freshness_window() -> Duration {
    Duration::hours(24)
}

/// Durable key/value storage for serialized blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses eframe's per-app storage directory, or the working directory
    /// when the platform has none.
    pub fn for_app(app_id: &str) -> Self {
        let dir = eframe::storage_dir(app_id).unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store. Clones share the same contents, so a test can keep a
/// handle and inspect what the app wrote.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.put_raw(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Saves, loads and clears the in-progress quiz under [`SAVE_KEY`].
/// Malformed or stale data is discarded wholesale and reported as absent.
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn save(&mut self, snapshot: &SessionSnapshot) {
        let result = serde_json::to_string(snapshot)
            .map_err(PersistenceError::from)
            .and_then(|json| self.backend.set(SAVE_KEY, &json));
        if let Err(err) = result {
            warn!("could not save quiz progress: {err}");
        }
    }

    pub fn load(&mut self) -> Option<SessionSnapshot> {
        self.load_at(Utc::now())
    }

    pub fn load_at(&mut self, now: DateTime<Utc>) -> Option<SessionSnapshot> {
        let text = match self.backend.get(SAVE_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                warn!("could not read quiz progress: {err}");
                return None;
            }
        };

        let snapshot = match parse_snapshot(&text) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                info!("discarding saved quiz progress: {err}");
                self.clear();
                return None;
            }
        };

        // A timestamp ahead of the clock cannot be aged; treat it as stale.
        let age = now.timestamp_millis() - snapshot.timestamp;
        if age < 0 || age >= freshness_window().num_milliseconds() {
            info!("discarding saved quiz progress outside the 24h window");
            self.clear();
            return None;
        }
        debug!(
            "found saved quiz progress for {} ({}s left)",
            snapshot.student_name, snapshot.seconds_remaining
        );
        Some(snapshot)
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.backend.remove(SAVE_KEY) {
            warn!("could not clear quiz progress: {err}");
        }
    }
}

fn parse_snapshot(text: &str) -> Result<SessionSnapshot, PersistenceError> {
    let snapshot: SessionSnapshot = serde_json::from_str(text)?;
    snapshot.validate().map_err(PersistenceError::Inconsistent)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionKind, ResourceKind, Selection};
    use crate::session::QuizSession;

    fn snapshot_at(timestamp: i64) -> SessionSnapshot {
        let questions = vec![Question {
            id: 1,
            text: "Capital of Egypt?".into(),
            kind: QuestionKind::MultipleChoice,
            options: vec!["Cairo".into(), "Giza".into()],
            correct_answer_index: Some(0),
        }];
        QuizSession::new("mona", questions, Selection::default(), ResourceKind::Quiz)
            .unwrap()
            .to_snapshot(timestamp)
    }

    fn store() -> (MemoryStore, ProgressStore) {
        let memory = MemoryStore::default();
        (memory.clone(), ProgressStore::new(memory))
    }

    #[test]
    fn save_then_load_returns_the_snapshot() {
        let (_, mut store) = store();
        let now = Utc::now();
        let snapshot = snapshot_at(now.timestamp_millis());
        store.save(&snapshot);
        assert_eq!(store.load_at(now), Some(snapshot));
    }

    #[test]
    fn missing_value_is_absent() {
        let (_, mut store) = store();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn expired_snapshot_is_cleared() {
        let (memory, mut store) = store();
        let now = Utc::now();
        let saved_at = now - Duration::hours(24) - Duration::seconds(1);
        store.save(&snapshot_at(saved_at.timestamp_millis()));
        assert_eq!(store.load_at(now), None);
        assert_eq!(memory.raw(SAVE_KEY), None);
    }

    #[test]
    fn snapshot_just_inside_window_is_kept() {
        let (_, mut store) = store();
        let now = Utc::now();
        let saved_at = now - Duration::hours(23);
        store.save(&snapshot_at(saved_at.timestamp_millis()));
        assert!(store.load_at(now).is_some());
    }

    #[test]
    fn snapshot_from_the_future_is_cleared() {
        let (memory, mut store) = store();
        let now = Utc::now();
        let saved_at = now + Duration::minutes(5);
        store.save(&snapshot_at(saved_at.timestamp_millis()));
        assert_eq!(store.load_at(now), None);
        assert_eq!(memory.raw(SAVE_KEY), None);
    }

    #[test]
    fn corrupt_snapshot_is_cleared() {
        let (memory, mut store) = store();
        memory.put_raw(SAVE_KEY, "{not json");
        assert_eq!(store.load(), None);
        assert_eq!(memory.raw(SAVE_KEY), None);
    }

    #[test]
    fn inconsistent_snapshot_is_cleared() {
        let (memory, mut store) = store();
        let mut snapshot = snapshot_at(Utc::now().timestamp_millis());
        snapshot.current_question_index = 5;
        memory.put_raw(SAVE_KEY, &serde_json::to_string(&snapshot).unwrap());
        assert_eq!(store.load(), None);
        assert_eq!(memory.raw(SAVE_KEY), None);
    }

    #[test]
    fn clear_removes_the_value() {
        let (memory, mut store) = store();
        store.save(&snapshot_at(Utc::now().timestamp_millis()));
        store.clear();
        assert_eq!(memory.raw(SAVE_KEY), None);
        store.clear();
    }

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = std::env::temp_dir().join(format!("examiai-test-{}", uuid::Uuid::new_v4()));
        let mut files = FileStore::new(&dir);
        assert_eq!(files.get("k").unwrap(), None);
        files.set("k", "value").unwrap();
        assert_eq!(files.get("k").unwrap().as_deref(), Some("value"));
        files.remove("k").unwrap();
        assert_eq!(files.get("k").unwrap(), None);
        files.remove("k").unwrap();
        let _ = std::fs::remove_dir_all(dir);
    }
}
