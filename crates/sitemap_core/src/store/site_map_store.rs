//! Site map store implementation.
//!
//! # Invariants
//! - Mutations that name a missing note return `StoreError::NoteNotFound`
//!   and leave every list untouched.
//! - `delete_note` removes connections in the same call.
//! - Children linked by `parent_id` are kept when their parent is deleted.

use crate::config::SiteMapConfig;
use crate::geometry::Point;
use crate::import::slot::{ImportClaim, ImportSlot};
use crate::import::{
    parse_import_url, FetchedImport, ImportError, ImportMode, ImportSource, ImportSummary,
    PendingImport, SiteBatch,
};
use crate::model::color::pick_color;
use crate::model::note::{generate_note_id, Connection, Note, NoteId};
use crate::model::tree::{FlatRow, TreeNode};
use crate::store::sample::{sample_connections, sample_notes};
use crate::tree::forest::{build_forest, flatten, HierarchyMode};
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation errors. None leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced note does not exist.
    NoteNotFound(NoteId),
    /// A note cannot connect to itself.
    SelfConnection(NoteId),
    /// Seeded notes share an id.
    DuplicateNoteId(NoteId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::SelfConnection(id) => write!(f, "note cannot connect to itself: {id}"),
            Self::DuplicateNoteId(id) => write!(f, "duplicate note id: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Canonical notes + connections with an injectable import source.
pub struct SiteMapStore {
    config: SiteMapConfig,
    notes: Vec<Note>,
    connections: Vec<Connection>,
    import_source: Arc<dyn ImportSource>,
    import_slot: ImportSlot,
    next_ticket: u64,
}

impl SiteMapStore {
    /// Creates an empty store.
    pub fn new(config: SiteMapConfig, import_source: Arc<dyn ImportSource>) -> Self {
        Self {
            config,
            notes: Vec::new(),
            connections: Vec::new(),
            import_source,
            import_slot: ImportSlot::default(),
            next_ticket: 0,
        }
    }

    /// Creates a store holding the seed pages.
    pub fn with_sample_data(config: SiteMapConfig, import_source: Arc<dyn ImportSource>) -> Self {
        let mut store = Self::new(config, import_source);
        store.notes = sample_notes();
        store.connections = sample_connections();
        store
    }

    /// Creates a store from existing records.
    ///
    /// Rejects duplicate note ids; drops connections with a missing endpoint.
    pub fn from_parts(
        config: SiteMapConfig,
        import_source: Arc<dyn ImportSource>,
        notes: Vec<Note>,
        connections: Vec<Connection>,
    ) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(notes.len());
        for note in &notes {
            if !seen.insert(note.id.as_str()) {
                return Err(StoreError::DuplicateNoteId(note.id.clone()));
            }
        }
        let connections = connections
            .into_iter()
            .filter(|edge| seen.contains(edge.from.as_str()) && seen.contains(edge.to.as_str()))
            .collect();

        let mut store = Self::new(config, import_source);
        store.notes = notes;
        store.connections = connections;
        Ok(store)
    }

    pub fn config(&self) -> &SiteMapConfig {
        &self.config
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.note(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_importing(&self) -> bool {
        self.import_slot.is_busy()
    }

    /// Adds a toolbar note, optionally under `parent_id`.
    ///
    /// # Contract
    /// - Gets a fresh id, default texts, a palette color and the default position.
    /// - With a parent, `parent_id` is set; in connection mode an existing
    ///   parent also gets a `parent -> child` connection.
    pub fn add_note(&mut self, parent_id: Option<&str>) -> Note {
        let mut id = generate_note_id();
        while self.contains(&id) {
            id = generate_note_id();
        }

        let color = pick_color(&self.config.palette, &mut rand::thread_rng());
        let mut note = Note::with_id(id, color, self.config.default_position);
        note.parent_id = parent_id.map(str::to_string);

        if let Some(parent) = parent_id {
            if self.config.hierarchy == HierarchyMode::Connections && self.contains(parent) {
                self.connections.push(Connection::new(parent, note.id.as_str()));
            } else if !self.contains(parent) {
                warn!("event=note_add module=store status=dangling_parent");
            }
        }

        self.notes.push(note.clone());
        info!(
            "event=note_add module=store status=ok notes={} has_parent={}",
            self.notes.len(),
            parent_id.is_some()
        );
        note
    }

    /// Replaces the note with the same id by full value.
    pub fn update_note(&mut self, note: Note) -> StoreResult<()> {
        let slot = self.note_mut(&note.id)?;
        *slot = note;
        Ok(())
    }

    /// Replaces title and description only.
    pub fn update_content(
        &mut self,
        id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> StoreResult<()> {
        let note = self.note_mut(id)?;
        note.title = title.into();
        note.description = description.into();
        Ok(())
    }

    /// Updates only the position of one note.
    pub fn move_note(&mut self, id: &str, position: Point) -> StoreResult<()> {
        self.note_mut(id)?.position = position;
        Ok(())
    }

    /// Deletes one note and every connection touching it.
    pub fn delete_note(&mut self, id: &str) -> StoreResult<Note> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| not_found(id, "note_delete"))?;
        let removed = self.notes.remove(index);

        let before = self.connections.len();
        self.connections.retain(|edge| !edge.touches(id));
        info!(
            "event=note_delete module=store status=ok notes={} connections_removed={}",
            self.notes.len(),
            before - self.connections.len()
        );
        Ok(removed)
    }

    /// Appends a `from -> to` connection. Duplicates are allowed.
    pub fn connect(&mut self, from: &str, to: &str) -> StoreResult<()> {
        if from == to {
            warn!("event=note_connect module=store status=rejected reason=self_connection");
            return Err(StoreError::SelfConnection(from.to_string()));
        }
        for id in [from, to] {
            if !self.contains(id) {
                return Err(not_found(id, "note_connect"));
            }
        }

        self.connections.push(Connection::new(from, to));
        info!(
            "event=note_connect module=store status=ok connections={}",
            self.connections.len()
        );
        Ok(())
    }

    /// Removes every `from -> to` connection. Returns how many were removed.
    pub fn disconnect(&mut self, from: &str, to: &str) -> usize {
        let before = self.connections.len();
        self.connections.retain(|edge| !(edge.from == from && edge.to == to));
        before - self.connections.len()
    }

    /// Raises one note above all others. Returns its new `z_index`.
    pub fn bring_to_front(&mut self, id: &str) -> StoreResult<i64> {
        let top_other = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .map(|note| note.z_index)
            .max();
        let note = self.note_mut(id)?;
        if let Some(top) = top_other {
            if note.z_index <= top {
                note.z_index = top + 1;
            }
        }
        Ok(note.z_index)
    }

    /// Derived forest for the tree view.
    pub fn forest(&self) -> Vec<TreeNode> {
        build_forest(
            &self.notes,
            self.config.hierarchy.with_connections(&self.connections),
        )
    }

    /// Derived rows for the table view.
    pub fn table_rows(&self) -> Vec<FlatRow> {
        flatten(&self.forest())
    }

    /// Starts an import of `raw_url`.
    ///
    /// # Contract
    /// - Rejects while another import is in flight.
    /// - Rejects malformed URLs before `is_importing` changes.
    /// - On success `is_importing()` is `true` until `finish_import` or
    ///   `cancel_import` receives the returned handle, or until that handle
    ///   (or the `import_from` future holding it) is dropped.
    pub fn start_import(&mut self, raw_url: &str) -> Result<PendingImport, ImportError> {
        if self.is_importing() {
            return Err(reject_in_flight());
        }
        let url = match parse_import_url(raw_url) {
            Ok(url) => url,
            Err(err) => {
                warn!("event=import_start module=store status=rejected reason=invalid_url");
                return Err(err);
            }
        };

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let claim = self
            .import_slot
            .try_claim(ticket)
            .ok_or_else(reject_in_flight)?;
        info!("event=import_start module=store status=ok ticket={ticket}");

        let fetch = self.import_source.fetch_site_structure(url.clone());
        Ok(PendingImport::new(claim, url, fetch))
    }

    /// Applies a settled import and clears the in-flight flag.
    ///
    /// Failed fetches leave notes and connections untouched.
    pub fn finish_import(&mut self, fetched: FetchedImport) -> Result<ImportSummary, ImportError> {
        self.settle(&fetched.claim)?;
        let batch = match fetched.result {
            Ok(batch) => batch,
            Err(err) => {
                warn!("event=import_finish module=store status=error");
                return Err(err);
            }
        };

        let summary = self.apply_batch(batch, self.config.import_mode);
        info!(
            "event=import_finish module=store status=ok mode={} notes_added={} connections_added={} rekeyed={}",
            summary.mode.as_str(),
            summary.notes_added,
            summary.connections_added,
            summary.rekeyed
        );
        Ok(summary)
    }

    /// Abandons an in-flight import without mutating notes.
    pub fn cancel_import(&mut self, pending: PendingImport) -> Result<(), ImportError> {
        self.settle(&pending.claim)?;
        info!("event=import_cancel module=store status=ok");
        Ok(())
    }

    /// Starts, awaits and applies one import.
    ///
    /// Holds the store for the whole fetch; UI callers that must stay
    /// interactive use `start_import` + `PendingImport::fetch` instead.
    /// Dropping the returned future mid-fetch abandons the import.
    pub async fn import_from(&mut self, raw_url: &str) -> Result<ImportSummary, ImportError> {
        let pending = self.start_import(raw_url)?;
        let fetched = pending.fetch().await;
        self.finish_import(fetched)
    }

    fn settle(&mut self, claim: &ImportClaim) -> Result<(), ImportError> {
        if self.import_slot.settle(claim) {
            return Ok(());
        }
        warn!(
            "event=import_settle module=store status=rejected reason=stale_ticket ticket={}",
            claim.ticket()
        );
        Err(ImportError::StaleImport)
    }

    fn apply_batch(&mut self, batch: SiteBatch, mode: ImportMode) -> ImportSummary {
        if mode == ImportMode::Replace {
            self.notes.clear();
            self.connections.clear();
        }

        let existing: HashSet<NoteId> = self.notes.iter().map(|note| note.id.clone()).collect();
        let mut taken: HashSet<NoteId> = existing.clone();
        taken.extend(batch.notes.iter().map(|note| note.id.clone()));

        let mut seen = HashSet::with_capacity(batch.notes.len());
        let mut remap: HashMap<NoteId, NoteId> = HashMap::new();
        let mut incoming = Vec::with_capacity(batch.notes.len());
        let mut duplicates_dropped = 0;
        for mut note in batch.notes {
            if !seen.insert(note.id.clone()) {
                duplicates_dropped += 1;
                continue;
            }
            if existing.contains(&note.id) {
                let mut fresh = generate_note_id();
                while taken.contains(&fresh) {
                    fresh = generate_note_id();
                }
                taken.insert(fresh.clone());
                remap.insert(note.id.clone(), fresh.clone());
                note.id = fresh;
            }
            incoming.push(note);
        }
        if duplicates_dropped > 0 {
            warn!(
                "event=import_apply module=store status=duplicates_dropped count={duplicates_dropped}"
            );
        }

        let rekeyed = remap.len();
        let resolve = |id: &NoteId| remap.get(id).cloned().unwrap_or_else(|| id.clone());
        for note in &mut incoming {
            if let Some(parent) = note.parent_id.take() {
                note.parent_id = Some(resolve(&parent));
            }
        }
        let present: HashSet<&str> = existing
            .iter()
            .map(String::as_str)
            .chain(incoming.iter().map(|note| note.id.as_str()))
            .collect();
        let incoming_connections: Vec<Connection> = batch
            .connections
            .iter()
            .map(|edge| Connection::new(resolve(&edge.from), resolve(&edge.to)))
            .filter(|edge| {
                edge.from != edge.to
                    && present.contains(edge.from.as_str())
                    && present.contains(edge.to.as_str())
            })
            .collect();

        let summary = ImportSummary {
            mode,
            notes_added: incoming.len(),
            connections_added: incoming_connections.len(),
            rekeyed,
            duplicates_dropped,
        };
        self.notes.extend(incoming);
        self.connections.extend(incoming_connections);
        summary
    }

    fn note_mut(&mut self, id: &str) -> StoreResult<&mut Note> {
        self.notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| not_found(id, "note_lookup"))
    }
}

fn reject_in_flight() -> ImportError {
    warn!("event=import_start module=store status=rejected reason=in_flight");
    ImportError::AlreadyImporting
}

fn not_found(id: &str, event: &str) -> StoreError {
    warn!("event={event} module=store status=not_found");
    StoreError::NoteNotFound(id.to_string())
}
