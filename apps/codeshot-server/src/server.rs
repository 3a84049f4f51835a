//! The API server: ownership-checked CRUD over presets and projects.
//!
//! Handlers stay thin; the resource semantics live here. Every read or write
//! of a preset/project goes through the owned-resource lookup, which folds
//! "id does not exist" and "id belongs to someone else" into the same
//! not-found error so existence never leaks across ownership boundaries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use codeshot_storage::{
    CreatePresetParams, CreateProjectParams, EditorOptions, EditorTab, Frame, Preset, PresetId,
    Project, ProjectId, Store, StoreError, TabId, Terminal, User, UserId,
};

use crate::error::ApiError;

#[derive(Clone)]
pub struct ApiServer {
    pub store: Arc<dyn Store>,
}

/// Partial update to a preset. Omitted fields keep their stored values;
/// `data` is replaced wholesale, never deep-merged.
#[derive(Clone, Debug, Default)]
pub struct PresetPatch {
    pub name: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// Partial update to a project. Each provided group replaces the stored
/// group wholesale. `name` is not part of the patch and never changes.
#[derive(Clone, Debug, Default)]
pub struct ProjectPatch {
    pub frame: Option<Frame>,
    pub editors: Option<Vec<TabPatch>>,
    pub editor_options: Option<EditorOptions>,
    pub terminal: Option<Terminal>,
}

/// One incoming tab. An id matching an existing tab updates it in place;
/// any other id (the `"temp"` sentinel included) requests a new tab.
#[derive(Clone, Debug)]
pub struct TabPatch {
    pub id: TabId,
    pub code: String,
    pub language_id: String,
    pub tab_name: String,
}

/// A timestamp for the update being applied: the current time, unless that
/// would not be strictly greater than `prev` at the stored (millisecond)
/// precision.
fn next_timestamp(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now.timestamp_millis() > prev.timestamp_millis() {
        now
    } else {
        prev + Duration::milliseconds(1)
    }
}

/// Reconcile a project's tab list against the incoming one.
///
/// Matching is by id, never by position: the result follows the *input*
/// order, existing ids keep their tab, unmatched ids get a fresh tab, and
/// stored tabs absent from the input are dropped.
fn reconcile_tabs(existing: Vec<EditorTab>, incoming: Vec<TabPatch>) -> Vec<EditorTab> {
    let mut by_id: HashMap<TabId, EditorTab> =
        existing.into_iter().map(|t| (t.id.clone(), t)).collect();

    incoming
        .into_iter()
        .map(|patch| match by_id.remove(&patch.id) {
            Some(mut tab) => {
                tab.code = patch.code;
                tab.language_id = patch.language_id;
                tab.tab_name = patch.tab_name;
                tab
            }
            None => EditorTab {
                id: TabId::generate(),
                code: patch.code,
                language_id: patch.language_id,
                tab_name: patch.tab_name,
            },
        })
        .collect()
}

impl ApiServer {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    // ───────────────────────────────── Users ──────────────────────────────

    pub async fn current_user(&self, caller: &UserId) -> Result<User, ApiError> {
        self.store.get_user_by_id(caller).await.map_err(|e| match e {
            StoreError::NotFound => {
                ApiError::Unauthenticated(format!("unknown user {caller}"))
            }
            e => e.into(),
        })
    }

    // ──────────────────────────────── Presets ─────────────────────────────

    /// Look up a preset the caller owns. Absence and foreign ownership are
    /// the same error, on purpose.
    async fn owned_preset(&self, caller: &UserId, id: &PresetId) -> Result<Preset, ApiError> {
        match self.store.find_preset(id).await {
            Ok(preset) if preset.owner_id == *caller => Ok(preset),
            Ok(_) | Err(StoreError::NotFound) => Err(ApiError::PresetNotFound {
                id: id.clone(),
                user_id: caller.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create_preset(
        &self,
        caller: &UserId,
        name: String,
        data: serde_json::Value,
    ) -> Result<Preset, ApiError> {
        let preset = self
            .store
            .create_preset(&CreatePresetParams {
                owner_id: caller.clone(),
                name,
                data,
            })
            .await?;
        tracing::info!(preset_id = %preset.id, user_id = %caller, "preset created");
        Ok(preset)
    }

    pub async fn list_presets(&self, caller: &UserId) -> Result<Vec<Preset>, ApiError> {
        Ok(self.store.list_presets(caller).await?)
    }

    pub async fn get_preset(&self, caller: &UserId, id: &PresetId) -> Result<Preset, ApiError> {
        self.owned_preset(caller, id).await
    }

    pub async fn update_preset(
        &self,
        caller: &UserId,
        id: &PresetId,
        patch: PresetPatch,
    ) -> Result<Preset, ApiError> {
        let mut preset = self.owned_preset(caller, id).await?;

        if let Some(name) = patch.name {
            preset.name = name;
        }
        if let Some(data) = patch.data {
            preset.data = data;
        }
        preset.updated_at = next_timestamp(preset.updated_at);

        self.store.save_preset(&preset).await?;
        Ok(preset)
    }

    pub async fn delete_preset(&self, caller: &UserId, id: &PresetId) -> Result<(), ApiError> {
        self.owned_preset(caller, id).await?;
        self.store.delete_preset(id).await?;
        tracing::info!(preset_id = %id, user_id = %caller, "preset deleted");
        Ok(())
    }

    // ─────────────────────────────── Projects ─────────────────────────────

    async fn owned_project(&self, caller: &UserId, id: &ProjectId) -> Result<Project, ApiError> {
        match self.store.find_project(id).await {
            Ok(project) if project.owner_id == *caller => Ok(project),
            Ok(_) | Err(StoreError::NotFound) => Err(ApiError::ProjectNotFound {
                id: id.clone(),
                user_id: caller.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create_project(
        &self,
        params: CreateProjectParams,
    ) -> Result<Project, ApiError> {
        let project = self.store.create_project(&params).await?;
        tracing::info!(project_id = %project.id, user_id = %project.owner_id, "project created");
        Ok(project)
    }

    pub async fn list_projects(&self, caller: &UserId) -> Result<Vec<Project>, ApiError> {
        Ok(self.store.list_projects(caller).await?)
    }

    pub async fn get_project(&self, caller: &UserId, id: &ProjectId) -> Result<Project, ApiError> {
        self.owned_project(caller, id).await
    }

    /// Apply a partial update: replace provided groups, reconcile tabs,
    /// refresh `updated_at`. The project name is preserved unconditionally.
    pub async fn update_project(
        &self,
        caller: &UserId,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, ApiError> {
        let mut project = self.owned_project(caller, id).await?;

        if let Some(frame) = patch.frame {
            project.frame = frame;
        }
        if let Some(editor_options) = patch.editor_options {
            project.editor_options = editor_options;
        }
        if let Some(terminal) = patch.terminal {
            project.terminal = terminal;
        }
        if let Some(editors) = patch.editors {
            project.editor_tabs = reconcile_tabs(std::mem::take(&mut project.editor_tabs), editors);
        }
        project.updated_at = next_timestamp(project.updated_at);

        self.store.save_project(&project).await?;
        Ok(project)
    }

    pub async fn delete_project(&self, caller: &UserId, id: &ProjectId) -> Result<(), ApiError> {
        self.owned_project(caller, id).await?;
        self.store.delete_project(id).await?;
        tracing::info!(project_id = %id, user_id = %caller, "project deleted");
        Ok(())
    }
}
