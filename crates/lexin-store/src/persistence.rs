//! Persistence through an opaque byte store
//!
//! Each entity family is one JSON array under its configured key. Loading
//! tolerates records written before versioning existed: missing fields take
//! their defaults, and an entity without versions gets a synthesized first
//! version.

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::entity::{Governed, Project};
use crate::error::{StorageError, StoreError};
use crate::refresher::initial_summary;
use crate::version_store::VersionStore;
use crate::workspace::Workspace;
use chrono::NaiveDate;
use lexin_governance::{ChangeRequest, ChangeRequestLedger, GovernanceState, GovernanceStatus};
use lexin_version::{
    EntityId, ProjectSnapshot, RevisionMeta, Snapshot, VersionHistory, VersionId, VersionRecord,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key-value store of whole byte blobs
#[cfg_attr(test, mockall::automock)]
pub trait ByteStore {
    /// Read a value; `None` if the key was never written
    ///
    /// # Errors
    /// Returns error on backend failure
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    /// Returns error on backend failure
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete a value; deleting a missing key succeeds
    ///
    /// # Errors
    /// Returns error on backend failure
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory byte store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryByteStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryByteStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ByteStore for MemoryByteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Byte store keeping one `{key}.json` file per key under a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileByteStore {
    root: PathBuf,
}

impl FileByteStore {
    /// Store rooted at `root`; the directory is created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl ByteStore for FileByteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match std::fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root).map_err(|e| io_error(key, e))?;
        std::fs::write(self.path(key), bytes).map_err(|e| io_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

/// Entity record as found in storage, every envelope field optional
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "S: DeserializeOwned"))]
struct StoredEntity<S> {
    id: EntityId,
    #[serde(flatten)]
    fields: S,
    #[serde(default)]
    created_at: Option<NaiveDate>,
    #[serde(default)]
    updated_at: Option<NaiveDate>,
    #[serde(default)]
    current_version_id: Option<VersionId>,
    #[serde(default)]
    versions: Option<Vec<VersionRecord<S>>>,
    #[serde(default)]
    governance_status: Option<GovernanceStatus>,
    #[serde(default)]
    frozen_at: Option<NaiveDate>,
    #[serde(default)]
    change_requests: Vec<ChangeRequest>,
    #[serde(default)]
    members: Vec<String>,
}

struct Normalizer<'a> {
    today: NaiveDate,
    config: &'a StoreConfig,
}

impl Normalizer<'_> {
    fn history<S: Snapshot>(
        &self,
        raw: &mut StoredEntity<S>,
        created_at: NaiveDate,
    ) -> Result<VersionHistory<S>, StoreError> {
        match raw.versions.take() {
            Some(versions) if !versions.is_empty() => {
                VersionHistory::from_parts(raw.current_version_id.take(), versions).map_err(|source| {
                    StoreError::History {
                        kind: S::KIND,
                        id: raw.id.clone(),
                        source,
                    }
                })
            }
            _ => {
                tracing::debug!(kind = %S::KIND, id = %raw.id, "synthesizing first version");
                let meta = RevisionMeta::new(
                    created_at,
                    self.config.default_actor.clone(),
                    initial_summary(S::KIND, self.config.summary_locale),
                );
                let id = raw
                    .current_version_id
                    .take()
                    .unwrap_or_else(|| VersionId::legacy_initial(&raw.id));
                Ok(VersionHistory::start_with_id(
                    id,
                    raw.fields.clone(),
                    meta,
                ))
            }
        }
    }

    fn governed<S: Snapshot>(&self, mut raw: StoredEntity<S>) -> Result<Governed<S>, StoreError> {
        let created_at = raw.created_at.unwrap_or(self.today);
        let history = self.history(&mut raw, created_at)?;
        let governance = GovernanceState::from_parts(
            raw.governance_status.unwrap_or_default(),
            raw.frozen_at,
            raw.updated_at.unwrap_or(created_at),
        );
        let ledger = ChangeRequestLedger::from_entries(S::KIND, &raw.id, raw.change_requests)?;
        Ok(Governed::from_parts(
            raw.id,
            raw.fields,
            created_at,
            raw.updated_at,
            history,
            governance,
            ledger,
        ))
    }

    fn project(&self, mut raw: StoredEntity<ProjectSnapshot>) -> Result<Project, StoreError> {
        let created_at = raw.created_at.unwrap_or(self.today);
        let history = self.history(&mut raw, created_at)?;
        Ok(Project::from_parts(
            raw.id,
            raw.fields,
            raw.members,
            created_at,
            raw.updated_at,
            history,
            ChangeRequestLedger::new(),
        ))
    }
}

fn read_collection<B, S>(store: &B, key: &str) -> Result<Vec<StoredEntity<S>>, StoreError>
where
    B: ByteStore + ?Sized,
    S: Snapshot + DeserializeOwned,
{
    match store.get(key)? {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => Ok(Vec::new()),
    }
}

fn write_collection<B, T>(store: &mut B, key: &str, value: &T) -> Result<(), StoreError>
where
    B: ByteStore + ?Sized,
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(value)?;
    store.put(key, &bytes)?;
    Ok(())
}

impl Workspace {
    /// Load all three collections from `store` using the system clock
    ///
    /// Missing keys load as empty collections.
    ///
    /// # Errors
    /// Returns error on storage failure, malformed JSON, or records whose
    /// history or change-request links are broken
    pub fn load<B: ByteStore + ?Sized>(store: &B, config: StoreConfig) -> Result<Self, StoreError> {
        Self::load_with_clock(store, config, SystemClock)
    }

    /// Load as [`load`](Self::load) does with an explicit date source
    ///
    /// Versions synthesized for legacy records are dated by `clock` when the
    /// record has no creation date.
    ///
    /// # Errors
    /// Same as [`load`](Self::load)
    pub fn load_with_clock<B: ByteStore + ?Sized>(
        store: &B,
        config: StoreConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self, StoreError> {
        let today = clock.today();
        config.validate()?;
        let keys = &config.storage_keys;
        let normalizer = Normalizer {
            today,
            config: &config,
        };

        let documents = read_collection(store, &keys.documents)?
            .into_iter()
            .map(|raw| normalizer.governed(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let designs = read_collection(store, &keys.designs)?
            .into_iter()
            .map(|raw| normalizer.governed(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let projects = read_collection(store, &keys.projects)?
            .into_iter()
            .map(|raw| normalizer.project(raw))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            documents = documents.len(),
            designs = designs.len(),
            projects = projects.len(),
            "workspace loaded"
        );
        let workspace = Self::from_stores(
            config.clone(),
            VersionStore::from_entities(documents),
            VersionStore::from_entities(designs),
            VersionStore::from_entities(projects),
        )
        .with_clock(clock);
        workspace.verify_integrity()?;
        Ok(workspace)
    }

    /// Write all three collections to `store`
    ///
    /// # Errors
    /// Returns error on storage or encoding failure
    pub fn save<B: ByteStore + ?Sized>(&self, store: &mut B) -> Result<(), StoreError> {
        let keys = &self.config().storage_keys;
        write_collection(store, &keys.documents, self.documents())?;
        write_collection(store, &keys.designs, self.designs())?;
        write_collection(store, &keys.projects, self.projects())?;
        tracing::info!(
            documents = self.documents().len(),
            designs = self.designs().len(),
            projects = self.projects().len(),
            "workspace saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use lexin_version::DocumentSnapshot;

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
    }

    #[test]
    fn missing_keys_load_empty() {
        let mut store = MockByteStore::new();
        store.expect_get().times(3).returning(|_| Ok(None));
        let ws = Workspace::load_with_clock(&store, StoreConfig::default(), clock()).unwrap();
        assert!(ws.documents().is_empty() && ws.designs().is_empty() && ws.projects().is_empty());
    }

    #[test]
    fn backend_failure_surfaces_as_storage_error() {
        let mut store = MockByteStore::new();
        store
            .expect_get()
            .returning(|_| Err(StorageError::Backend("disk on fire".into())));
        let err = Workspace::load_with_clock(&store, StoreConfig::default(), clock()).unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::Backend(_))));
    }

    #[test]
    fn save_writes_each_collection_key() {
        let mut store = MockByteStore::new();
        for key in ["lexin_prd_list", "lexin_ui_design_list", "lexin_project_list"] {
            store
                .expect_put()
                .withf(move |k, _| k == key)
                .times(1)
                .returning(|_, _| Ok(()));
        }
        let mut ws = Workspace::new(StoreConfig::default());
        ws.add_document(DocumentSnapshot::new("Login", ""));
        ws.save(&mut store).unwrap();
    }

    #[test]
    fn legacy_document_gets_synthesized_version() {
        let mut store = MemoryByteStore::new();
        store
            .put(
                "lexin_prd_list",
                br###"[{"id":"1700","content":"## A\nfoo","createdAt":"2024-01-05"}]"###,
            )
            .unwrap();
        let ws = Workspace::load_with_clock(&store, StoreConfig::default(), clock()).unwrap();
        let doc = ws.document(&EntityId::new("1700")).unwrap();
        assert_eq!(doc.fields().title, lexin_version::UNTITLED_DOCUMENT);
        assert_eq!(doc.history().len(), 1);
        let first = doc.current_version();
        assert_eq!(first.id().as_str(), "1700-v1");
        assert_eq!(first.summary(), "初始版本");
        assert_eq!(first.created_by(), "系统");
        assert_eq!(first.created_at(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(doc.governance_status(), GovernanceStatus::Draft);
    }

    #[test]
    fn dangling_change_request_link_is_rejected() {
        let mut store = MemoryByteStore::new();
        store
            .put(
                "lexin_prd_list",
                br#"[{"id":"d1","createdAt":"2024-01-05","currentVersionId":"v1","versions":[
                    {"id":"v1","version":1,"createdAt":"2024-01-05","createdBy":"a","summary":"s","changeRequestId":"cr-x"}
                ]}]"#,
            )
            .unwrap();
        let err = Workspace::load_with_clock(&store, StoreConfig::default(), clock()).unwrap_err();
        assert!(matches!(err, StoreError::ChangeRequestNotFound(_)));
    }
}
