//! Debounced autosave of the in-progress form to a local draft store.
//!
//! Single-threaded, cooperative: every field change restarts the debounce
//! window, and once it expires the whole form record is written under a
//! fixed key. Last write wins; a superseded save is simply overwritten.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::form::FormState;

/// The fixed draft key. One in-progress profile per client.
pub const DRAFT_KEY: &str = "viit-member-profile-v1";

/// How long after the last edit the draft is written.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(1);

/// Local key-value storage for draft records.
pub trait DraftStore {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Draft store backed by JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

/// In-memory draft store for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDraftStore {
    records: HashMap<String, String>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for InMemoryDraftStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.records.remove(key);
        Ok(())
    }
}

/// Persists the form state on a debounce timer and restores it on mount.
pub struct AutosaveBridge<S: DraftStore> {
    store: S,
    debounce: Duration,
    pending_since: Option<Instant>,
    last_saved: Option<DateTime<Utc>>,
}

impl<S: DraftStore> AutosaveBridge<S> {
    pub fn new(store: S) -> Self {
        Self::with_debounce(store, AUTOSAVE_DEBOUNCE)
    }

    pub fn with_debounce(store: S, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            pending_since: None,
            last_saved: None,
        }
    }

    /// A field changed; restart the debounce window.
    pub fn note_change(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    /// Drives the debounce clock. Writes the draft once the window has
    /// expired with no further edits; returns whether a save happened.
    pub fn tick(&mut self, now: Instant, form: &FormState) -> io::Result<bool> {
        let Some(pending_since) = self.pending_since else {
            return Ok(false);
        };
        if now.duration_since(pending_since) < self.debounce {
            return Ok(false);
        }

        let record = serde_json::to_string(form)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.store.write(DRAFT_KEY, &record)?;
        self.pending_since = None;
        self.last_saved = Some(Utc::now());
        Ok(true)
    }

    /// Reads any existing draft and merges it into `form`.
    ///
    /// A draft that fails to parse is logged and ignored; restore is a
    /// recovery aid, never a reason to block the form.
    pub fn restore(&mut self, form: &mut FormState) -> bool {
        let contents = match self.store.read(DRAFT_KEY) {
            Ok(Some(contents)) => contents,
            Ok(None) => return false,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read autosaved draft");
                return false;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&contents) {
            Ok(record) => {
                form.merge_draft(&record);
                self.last_saved = Some(Utc::now());
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to parse autosaved draft");
                false
            }
        }
    }

    /// Deletes the draft after a confirmed successful submission.
    pub fn clear(&mut self) -> io::Result<()> {
        self.store.remove(DRAFT_KEY)?;
        self.pending_since = None;
        self.last_saved = None;
        Ok(())
    }

    /// When the draft was last written (or restored), if ever.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> FormState {
        let mut form = FormState::default();
        form.set_field("name", "Rahul Kumar");
        form.set_field("regNumber", "25BCE0001");
        form.set_field("domain", "Tech");
        form.set_field("subDomain", "Web Development");
        form
    }

    #[test]
    fn test_save_waits_for_debounce_window() {
        let mut bridge =
            AutosaveBridge::with_debounce(InMemoryDraftStore::new(), Duration::from_secs(1));
        let form = sample_form();
        let t0 = Instant::now();

        bridge.note_change(t0);
        assert!(!bridge.tick(t0 + Duration::from_millis(500), &form).unwrap());
        assert!(bridge.last_saved().is_none());

        assert!(bridge.tick(t0 + Duration::from_secs(1), &form).unwrap());
        assert!(bridge.last_saved().is_some());
        assert!(bridge.store().read(DRAFT_KEY).unwrap().is_some());
    }

    #[test]
    fn test_edit_restarts_debounce_window() {
        let mut bridge =
            AutosaveBridge::with_debounce(InMemoryDraftStore::new(), Duration::from_secs(1));
        let form = sample_form();
        let t0 = Instant::now();

        bridge.note_change(t0);
        // Another keystroke 800ms in pushes the save out.
        bridge.note_change(t0 + Duration::from_millis(800));
        assert!(!bridge.tick(t0 + Duration::from_millis(1200), &form).unwrap());
        assert!(bridge.tick(t0 + Duration::from_millis(1800), &form).unwrap());
    }

    #[test]
    fn test_no_pending_change_no_save() {
        let mut bridge = AutosaveBridge::new(InMemoryDraftStore::new());
        let form = sample_form();
        assert!(!bridge.tick(Instant::now(), &form).unwrap());
    }

    #[test]
    fn test_autosave_round_trip() {
        let mut bridge =
            AutosaveBridge::with_debounce(InMemoryDraftStore::new(), Duration::from_secs(1));
        let form = sample_form();
        let t0 = Instant::now();
        bridge.note_change(t0);
        bridge.tick(t0 + Duration::from_secs(2), &form).unwrap();

        // "Reload": fresh form, same store.
        let mut restored = FormState::default();
        assert!(bridge.restore(&mut restored));
        assert_eq!(restored.name, "Rahul Kumar");
        assert_eq!(restored.reg_number, "25BCE0001");
        assert_eq!(restored.sub_domain, "Web Development");
    }

    #[test]
    fn test_restore_with_no_draft() {
        let mut bridge = AutosaveBridge::new(InMemoryDraftStore::new());
        let mut form = FormState::default();
        assert!(!bridge.restore(&mut form));
        assert_eq!(form, FormState::default());
    }

    #[test]
    fn test_restore_with_corrupt_draft_is_not_fatal() {
        let mut store = InMemoryDraftStore::new();
        store.write(DRAFT_KEY, "{not json").unwrap();
        let mut bridge = AutosaveBridge::new(store);

        let mut form = FormState::default();
        assert!(!bridge.restore(&mut form));
        assert_eq!(form, FormState::default());
        assert!(bridge.last_saved().is_none());
    }

    #[test]
    fn test_clear_removes_draft_after_submission() {
        let mut bridge =
            AutosaveBridge::with_debounce(InMemoryDraftStore::new(), Duration::from_secs(1));
        let form = sample_form();
        let t0 = Instant::now();
        bridge.note_change(t0);
        bridge.tick(t0 + Duration::from_secs(2), &form).unwrap();
        assert!(bridge.store().read(DRAFT_KEY).unwrap().is_some());

        bridge.clear().unwrap();
        assert!(bridge.store().read(DRAFT_KEY).unwrap().is_none());
        assert!(bridge.last_saved().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("draft-store-test-{}", std::process::id()));
        let mut store = FileDraftStore::new(&dir);

        assert!(store.read(DRAFT_KEY).unwrap().is_none());
        store.write(DRAFT_KEY, "{\"name\":\"x\"}").unwrap();
        assert_eq!(store.read(DRAFT_KEY).unwrap().unwrap(), "{\"name\":\"x\"}");
        store.remove(DRAFT_KEY).unwrap();
        assert!(store.read(DRAFT_KEY).unwrap().is_none());
        // Removing an absent draft is fine.
        store.remove(DRAFT_KEY).unwrap();

        let _ = fs::remove_dir_all(&dir);
    }
}
