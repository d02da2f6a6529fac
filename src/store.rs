//! Project persistence: the storage collaborator contract and the two
//! provided backends.
//!
//! Bodies and the lightweight metadata index are persisted separately:
//! listing reads only the index record, never a full timeline. Projects
//! live in a flat key space keyed by id.
//!
//! Timestamps serialize as ISO-8601 via chrono; `Scene.bookmarks`
//! defaults to empty when absent so older records keep loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{Project, ProjectMetadata};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("project {0} not found")]
    NotFound(Uuid),
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Storage collaborator consumed by `ProjectManager`.
///
/// `delete_project` tolerates missing ids; only `load_project` signals
/// NotFound. Implementations do not retry - retry/backoff policy
/// belongs behind this seam, not in the session core.
pub trait ProjectStore {
    fn save_project(&mut self, project: &Project) -> Result<(), StoreError>;
    fn load_project(&self, id: Uuid) -> Result<Project, StoreError>;
    /// Metadata of every known project. Order unspecified; callers sort.
    fn load_all_metadata(&self) -> Result<Vec<ProjectMetadata>, StoreError>;
    fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError>;
}

/// In-memory store, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bodies: HashMap<Uuid, Project>,
    index: Vec<ProjectMetadata>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl ProjectStore for MemoryStore {
    fn save_project(&mut self, project: &Project) -> Result<(), StoreError> {
        let meta = project.metadata.clone();
        match self.index.iter_mut().find(|m| m.id == meta.id) {
            Some(entry) => *entry = meta,
            None => self.index.insert(0, meta),
        }
        self.bodies.insert(project.id(), project.clone());
        Ok(())
    }

    fn load_project(&self, id: Uuid) -> Result<Project, StoreError> {
        self.bodies.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn load_all_metadata(&self) -> Result<Vec<ProjectMetadata>, StoreError> {
        Ok(self.index.clone())
    }

    fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.bodies.remove(&id);
        self.index.retain(|m| m.id != id);
        Ok(())
    }
}

/// Directory-backed JSON store: one `<id>.json` body per project plus
/// an `index.json` with the ordered metadata list.
#[derive(Debug)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        info!("Project store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn body_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("index.json")
    }

    fn read_index(&self) -> Result<Vec<ProjectMetadata>, StoreError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    fn write_index(&self, index: &[ProjectMetadata]) -> Result<(), StoreError> {
        fs::write(self.index_path(), serde_json::to_string_pretty(index)?)?;
        Ok(())
    }
}

impl ProjectStore for JsonDirStore {
    fn save_project(&mut self, project: &Project) -> Result<(), StoreError> {
        fs::write(self.body_path(project.id()), serde_json::to_string_pretty(project)?)?;

        let mut index = self.read_index()?;
        let meta = project.metadata.clone();
        match index.iter_mut().find(|m| m.id == meta.id) {
            Some(entry) => *entry = meta,
            None => index.insert(0, meta),
        }
        self.write_index(&index)?;
        debug!("Saved project {} ({})", project.metadata.name, project.id());
        Ok(())
    }

    fn load_project(&self, id: Uuid) -> Result<Project, StoreError> {
        let path = self.body_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    fn load_all_metadata(&self) -> Result<Vec<ProjectMetadata>, StoreError> {
        self.read_index()
    }

    fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError> {
        let path = self.body_path(id);
        if path.exists() {
            fs::remove_file(path)?;
        } else {
            trace!("Delete of unknown project {}", id);
        }
        let mut index = self.read_index()?;
        index.retain(|m| m.id != id);
        self.write_index(&index)?;
        Ok(())
    }
}
