//! Project lifecycle manager: create/load/save/delete/rename/list.
//!
//! **Architecture**: the manager does NOT own the scene registry or the
//! media pool. It receives them by reference, the same seam the
//! timeline engine uses, and owns only the project envelope, the
//! lifecycle state and the metadata index cache.
//!
//! Ownership split: the registry holds the live scene list while a
//! project is active; the manager's `Project` keeps the envelope
//! (metadata + settings). Saving re-derives `Project.scenes` from the
//! registry, loading pushes loaded scenes into it. Loads clear scenes
//! and media BEFORE the store call, so a slow or failed load never
//! shows stale content from the previous project.

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::entities::{Project, ProjectMetadata};
use crate::store::{ProjectStore, StoreError};

use super::events::{SessionEvent, SessionEventEmitter};
use super::media_pool::MediaPool;
use super::scenes::SceneRegistry;

/// Lifecycle state. `Loading` is observable between the registry clears
/// and the store call resolving.
#[derive(Debug, Default)]
pub enum ProjectState {
    #[default]
    Idle,
    Loading,
    Active(Project),
}

impl ProjectState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProjectState::Loading)
    }
}

/// Sort orders for the saved-projects listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOption {
    NameAsc,
    NameDesc,
    DurationAsc,
    DurationDesc,
    CreatedAsc,
    CreatedDesc,
    UpdatedAsc,
    #[default]
    UpdatedDesc,
}

impl SortOption {
    /// Parse UI keys like "name-asc" / "updatedAt-desc".
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name-asc" => Some(SortOption::NameAsc),
            "name-desc" => Some(SortOption::NameDesc),
            "duration-asc" => Some(SortOption::DurationAsc),
            "duration-desc" => Some(SortOption::DurationDesc),
            "createdAt-asc" => Some(SortOption::CreatedAsc),
            "createdAt-desc" => Some(SortOption::CreatedDesc),
            "updatedAt-asc" => Some(SortOption::UpdatedAsc),
            "updatedAt-desc" => Some(SortOption::UpdatedDesc),
            _ => None,
        }
    }
}

pub struct ProjectManager {
    store: Box<dyn ProjectStore>,
    state: ProjectState,
    /// Cached metadata index, newest first on insert.
    saved_projects: Vec<ProjectMetadata>,
    /// Whether the index has been loaded from the store at least once.
    metadata_loaded: bool,
    events: SessionEventEmitter,
}

impl ProjectManager {
    pub fn new(store: Box<dyn ProjectStore>, events: SessionEventEmitter) -> Self {
        Self {
            store,
            state: ProjectState::Idle,
            saved_projects: Vec::new(),
            metadata_loaded: false,
            events,
        }
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn active_project(&self) -> Option<&Project> {
        match &self.state {
            ProjectState::Active(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn metadata_loaded(&self) -> bool {
        self.metadata_loaded
    }

    /// Create a project with one main scene and one main video track,
    /// activate it, persist it and index its metadata (new entries go
    /// to the front). Returns the new project id.
    pub fn create_project(
        &mut self,
        name: &str,
        scenes: &mut SceneRegistry,
        media: &mut MediaPool,
    ) -> Result<Uuid, StoreError> {
        let project = Project::new(name);
        let id = project.id();
        info!("Creating project '{}' ({})", name, id);

        media.clear();
        scenes.initialize(project.scenes.clone(), Some(project.current_scene_id));

        let meta = project.metadata.clone();
        self.state = ProjectState::Active(project);
        if let ProjectState::Active(p) = &self.state {
            self.store.save_project(p)?;
        }
        self.upsert_metadata(meta);

        self.events.emit(SessionEvent::ProjectChanged);
        self.events.emit(SessionEvent::ProjectListChanged);
        Ok(id)
    }

    /// Load a project by id through the `Loading` state.
    ///
    /// Scenes and media are cleared before the store call. An unknown
    /// id fails with NotFound and leaves no active project; a loaded
    /// project with zero scenes leaves the registry cleared (the scene
    /// list is authoritative only for non-empty projects).
    pub fn load_project(
        &mut self,
        id: Uuid,
        scenes: &mut SceneRegistry,
        media: &mut MediaPool,
    ) -> Result<(), StoreError> {
        info!("Loading project {}", id);
        self.state = ProjectState::Loading;
        self.events.emit(SessionEvent::ProjectChanged);

        media.clear();
        scenes.clear();

        match self.store.load_project(id) {
            Ok(project) => {
                if !project.scenes.is_empty() {
                    scenes.initialize(project.scenes.clone(), Some(project.current_scene_id));
                }
                info!("Loaded project '{}' ({} scene(s))", project.metadata.name, project.scenes.len());
                self.state = ProjectState::Active(project);
                self.events.emit(SessionEvent::ProjectChanged);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load project {}: {}", id, e);
                self.state = ProjectState::Idle;
                self.events.emit(SessionEvent::ProjectChanged);
                Err(e)
            }
        }
    }

    /// Persist the active project. No-op without one.
    ///
    /// Re-derives the scene list from the registry (the live, possibly
    /// mutated copy), recomputes duration, stamps `updated_at`, and
    /// refreshes the index entry.
    pub fn save_active(&mut self, scenes: &SceneRegistry) -> Result<(), StoreError> {
        let meta = {
            let ProjectState::Active(project) = &mut self.state else {
                return Ok(());
            };
            project.scenes = scenes.all().to_vec();
            if let Some(active) = scenes.active_scene_id() {
                project.current_scene_id = active;
            }
            project.metadata.duration = project.total_duration();
            project.metadata.updated_at = Utc::now();
            self.store.save_project(project)?;
            info!("Saved project '{}'", project.metadata.name);
            project.metadata.clone()
        };
        self.upsert_metadata(meta);
        self.events.emit(SessionEvent::ProjectChanged);
        self.events.emit(SessionEvent::ProjectListChanged);
        Ok(())
    }

    /// Refresh the metadata index from the store.
    pub fn load_all_metadata(&mut self) -> Result<&[ProjectMetadata], StoreError> {
        self.saved_projects = self.store.load_all_metadata()?;
        self.metadata_loaded = true;
        self.events.emit(SessionEvent::ProjectListChanged);
        Ok(&self.saved_projects)
    }

    /// Cached metadata index (call `load_all_metadata` to refresh).
    pub fn saved_projects(&self) -> &[ProjectMetadata] {
        &self.saved_projects
    }

    /// Case-insensitive substring filter by name, then sort. Never
    /// mutates the underlying cache.
    pub fn filtered_sorted(&self, query: &str, sort: SortOption) -> Vec<ProjectMetadata> {
        let q = query.to_lowercase();
        let mut list: Vec<ProjectMetadata> = self
            .saved_projects
            .iter()
            .filter(|m| q.is_empty() || m.name.to_lowercase().contains(&q))
            .cloned()
            .collect();
        list.sort_by(|a, b| match sort {
            SortOption::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            SortOption::DurationAsc => {
                a.duration.partial_cmp(&b.duration).unwrap_or(std::cmp::Ordering::Equal)
            }
            SortOption::DurationDesc => {
                b.duration.partial_cmp(&a.duration).unwrap_or(std::cmp::Ordering::Equal)
            }
            SortOption::CreatedAsc => a.created_at.cmp(&b.created_at),
            SortOption::CreatedDesc => b.created_at.cmp(&a.created_at),
            SortOption::UpdatedAsc => a.updated_at.cmp(&b.updated_at),
            SortOption::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
        });
        list
    }

    /// Delete projects from storage (missing ids tolerated) and the
    /// index cache. Deleting the active project clears the active
    /// state, scenes and media.
    pub fn delete_projects(
        &mut self,
        ids: &[Uuid],
        scenes: &mut SceneRegistry,
        media: &mut MediaPool,
    ) -> Result<(), StoreError> {
        for &id in ids {
            self.store.delete_project(id)?;
        }
        self.saved_projects.retain(|m| !ids.contains(&m.id));
        info!("Deleted {} project(s)", ids.len());

        let active_deleted =
            matches!(&self.state, ProjectState::Active(p) if ids.contains(&p.id()));
        if active_deleted {
            self.state = ProjectState::Idle;
            media.clear();
            scenes.clear();
            self.events.emit(SessionEvent::ProjectChanged);
        }
        self.events.emit(SessionEvent::ProjectListChanged);
        Ok(())
    }

    /// Rename a project, active or not.
    ///
    /// Loads the body fresh from storage, renames, persists, refreshes
    /// the index entry, and refreshes the in-memory copy only when the
    /// renamed project happens to be the active one.
    pub fn rename_project(&mut self, id: Uuid, name: &str) -> Result<(), StoreError> {
        let mut project = self.store.load_project(id)?;
        project.metadata.name = name.to_string();
        project.metadata.updated_at = Utc::now();
        self.store.save_project(&project)?;
        info!("Renamed project {} to '{}'", id, name);

        self.upsert_metadata(project.metadata.clone());
        if let ProjectState::Active(active) = &mut self.state {
            if active.id() == id {
                active.metadata.name = project.metadata.name.clone();
                active.metadata.updated_at = project.metadata.updated_at;
                self.events.emit(SessionEvent::ProjectChanged);
            }
        }
        self.events.emit(SessionEvent::ProjectListChanged);
        Ok(())
    }

    /// Drop the active project, scenes and media without touching
    /// storage.
    pub fn close_project(&mut self, scenes: &mut SceneRegistry, media: &mut MediaPool) {
        info!("Closing project");
        self.state = ProjectState::Idle;
        media.clear();
        scenes.clear();
        self.events.emit(SessionEvent::ProjectChanged);
    }

    fn upsert_metadata(&mut self, meta: ProjectMetadata) {
        match self.saved_projects.iter_mut().find(|m| m.id == meta.id) {
            Some(entry) => *entry = meta,
            None => self.saved_projects.insert(0, meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn manager() -> (ProjectManager, SceneRegistry, MediaPool) {
        (
            ProjectManager::new(Box::new(MemoryStore::new()), SessionEventEmitter::dummy()),
            SceneRegistry::new(SessionEventEmitter::dummy()),
            MediaPool::new(SessionEventEmitter::dummy()),
        )
    }

    #[test]
    fn test_create_project_activates_and_persists() {
        let (mut man, mut scenes, mut media) = manager();
        let id = man.create_project("Demo", &mut scenes, &mut media).unwrap();

        let active = man.active_project().unwrap();
        assert_eq!(active.id(), id);
        assert_eq!(active.metadata.name, "Demo");

        // Registry holds the live copy of the single main scene.
        assert_eq!(scenes.all().len(), 1);
        assert_eq!(scenes.active_scene().unwrap().id, active.current_scene_id);

        // Metadata index has the new entry at the front.
        assert_eq!(man.saved_projects()[0].id, id);
    }

    #[test]
    fn test_load_unknown_project_leaves_idle() {
        let (mut man, mut scenes, mut media) = manager();
        man.create_project("Old", &mut scenes, &mut media).unwrap();

        let err = man.load_project(Uuid::new_v4(), &mut scenes, &mut media).unwrap_err();
        assert!(err.is_not_found());
        assert!(man.active_project().is_none());
        assert!(!man.is_loading());
        // Stale content from the previous project was cleared up front.
        assert!(scenes.all().is_empty());
        assert!(media.is_empty());
    }

    #[test]
    fn test_create_then_load_round_trips() {
        let (mut man, mut scenes, mut media) = manager();
        let id = man.create_project("Demo", &mut scenes, &mut media).unwrap();

        man.load_project(id, &mut scenes, &mut media).unwrap();
        let project = man.active_project().unwrap();
        assert_eq!(project.scenes.len(), 1);
        assert_eq!(project.scenes[0].tracks.len(), 1);
        assert!(project.scenes[0].tracks[0].elements().is_empty());
        assert_eq!(project.metadata.duration, 0.0);
        assert_eq!(scenes.all().len(), 1);
    }

    #[test]
    fn test_load_zero_scene_project_leaves_registry_cleared() {
        let (mut man, mut scenes, mut media) = manager();
        let mut project = Project::new("Empty");
        project.scenes.clear();
        let id = project.id();
        man.store.save_project(&project).unwrap();

        man.create_project("Other", &mut scenes, &mut media).unwrap();
        man.load_project(id, &mut scenes, &mut media).unwrap();

        assert!(man.active_project().is_some());
        // The pre-load clear ran and no initialization followed.
        assert!(scenes.all().is_empty());
        assert!(scenes.active_scene().is_none());
    }

    #[test]
    fn test_save_recomputes_duration_from_live_scenes() {
        use crate::core::timeline::{Placement, TimelineEngine};
        use crate::entities::VideoElement;

        let (mut man, mut scenes, mut media) = manager();
        let id = man.create_project("Cut", &mut scenes, &mut media).unwrap();

        let engine = TimelineEngine::new(SessionEventEmitter::dummy());
        let mut el: crate::entities::TimelineElement =
            VideoElement::new("clip", Uuid::new_v4(), 8.0).into();
        el.set_start_time(2.0);
        engine.insert_element(&mut scenes, el, Placement::Auto);

        let before = man.active_project().unwrap().metadata.updated_at;
        man.save_active(&scenes).unwrap();

        let saved = man.store.load_project(id).unwrap();
        assert_eq!(saved.metadata.duration, 10.0);
        assert_eq!(saved.scenes[0].tracks[0].elements().len(), 1);
        assert!(saved.metadata.updated_at >= before);
        assert_eq!(man.saved_projects()[0].duration, 10.0);
    }

    #[test]
    fn test_save_without_active_project_is_noop() {
        let (mut man, scenes, _media) = manager();
        man.save_active(&scenes).unwrap();
        assert!(man.saved_projects().is_empty());
    }

    #[test]
    fn test_delete_active_project_clears_everything() {
        let (mut man, mut scenes, mut media) = manager();
        let keep = man.create_project("Keep", &mut scenes, &mut media).unwrap();
        let gone = man.create_project("Gone", &mut scenes, &mut media).unwrap();

        man.delete_projects(&[gone], &mut scenes, &mut media).unwrap();
        assert!(man.active_project().is_none());
        assert!(scenes.all().is_empty());
        assert!(media.is_empty());
        assert!(man.saved_projects().iter().all(|m| m.id != gone));
        assert!(man.saved_projects().iter().any(|m| m.id == keep));
        assert!(man.store.load_project(gone).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_inactive_project_keeps_active() {
        let (mut man, mut scenes, mut media) = manager();
        let old = man.create_project("Old", &mut scenes, &mut media).unwrap();
        let current = man.create_project("Current", &mut scenes, &mut media).unwrap();

        man.delete_projects(&[old], &mut scenes, &mut media).unwrap();
        assert_eq!(man.active_project().unwrap().id(), current);
        assert_eq!(scenes.all().len(), 1);
    }

    #[test]
    fn test_rename_refreshes_index_and_active_copy() {
        let (mut man, mut scenes, mut media) = manager();
        let id = man.create_project("Draft", &mut scenes, &mut media).unwrap();

        man.rename_project(id, "Final").unwrap();
        assert_eq!(man.active_project().unwrap().metadata.name, "Final");
        assert_eq!(man.saved_projects()[0].name, "Final");
        assert_eq!(man.store.load_project(id).unwrap().metadata.name, "Final");

        // Renaming a non-active project leaves the active copy alone.
        let other = man.create_project("Other", &mut scenes, &mut media).unwrap();
        man.rename_project(id, "Final v2").unwrap();
        assert_eq!(man.active_project().unwrap().id(), other);
        assert_eq!(man.active_project().unwrap().metadata.name, "Other");
        let entry = man.saved_projects().iter().find(|m| m.id == id).unwrap();
        assert_eq!(entry.name, "Final v2");
    }

    #[test]
    fn test_close_project_does_not_touch_storage() {
        let (mut man, mut scenes, mut media) = manager();
        let id = man.create_project("Kept", &mut scenes, &mut media).unwrap();

        man.close_project(&mut scenes, &mut media);
        assert!(man.active_project().is_none());
        assert!(scenes.all().is_empty());
        assert!(man.store.load_project(id).is_ok());
    }

    #[test]
    fn test_load_all_metadata_sets_flag() {
        let (mut man, mut scenes, mut media) = manager();
        assert!(!man.metadata_loaded());
        man.create_project("One", &mut scenes, &mut media).unwrap();

        let metas = man.load_all_metadata().unwrap().to_vec();
        assert_eq!(metas.len(), 1);
        assert!(man.metadata_loaded());
    }

    #[test]
    fn test_filtered_sorted_by_name() {
        let (mut man, mut scenes, mut media) = manager();
        for name in ["banana", "Apple", "cherry"] {
            man.create_project(name, &mut scenes, &mut media).unwrap();
        }

        let by_name = man.filtered_sorted("", SortOption::NameAsc);
        let names: Vec<&str> = by_name.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);

        // Empty query returns everything; cache order untouched.
        assert_eq!(man.filtered_sorted("", SortOption::default()).len(), 3);
        assert_eq!(man.saved_projects()[0].name, "cherry");

        let filtered = man.filtered_sorted("AN", SortOption::NameAsc);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "banana");
    }

    #[test]
    fn test_default_sort_is_updated_desc() {
        let (mut man, mut scenes, mut media) = manager();
        man.create_project("first", &mut scenes, &mut media).unwrap();
        man.create_project("second", &mut scenes, &mut media).unwrap();

        let list = man.filtered_sorted("", SortOption::default());
        assert_eq!(list[0].name, "second");
        assert_eq!(SortOption::from_key("name-asc"), Some(SortOption::NameAsc));
        assert_eq!(SortOption::from_key("bogus"), None);
    }
}
