//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the server depends on.
///
/// Lookups are by id only; ownership is the caller's concern (the service
/// layer conflates "absent" and "not owned" into one not-found condition, so
/// backends must not leak ownership through distinct errors).
///
/// `save_*` methods persist the full entity state. `save_project` replaces
/// the tab list atomically: either the whole reconciled state lands or
/// nothing does.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────── Users ──────────────────────────────

    /// Create a new user.
    async fn create_user(&self, params: &CreateUserParams) -> Result<User, StoreError>;

    /// Get user by ID.
    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError>;

    /// Get user by email.
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    // ──────────────────────────────── Presets ─────────────────────────────

    /// Create a preset (id and timestamps assigned by the backend).
    async fn create_preset(&self, params: &CreatePresetParams) -> Result<Preset, StoreError>;

    /// Find a preset by id.
    async fn find_preset(&self, preset_id: &PresetId) -> Result<Preset, StoreError>;

    /// List all presets owned by a user, most recently updated first.
    async fn list_presets(&self, owner_id: &UserId) -> Result<Vec<Preset>, StoreError>;

    /// Persist the full state of an existing preset.
    async fn save_preset(&self, preset: &Preset) -> Result<(), StoreError>;

    /// Delete a preset.
    async fn delete_preset(&self, preset_id: &PresetId) -> Result<(), StoreError>;

    // ─────────────────────────────── Projects ─────────────────────────────

    /// Create a project with its initial tabs.
    async fn create_project(&self, params: &CreateProjectParams) -> Result<Project, StoreError>;

    /// Find a project (including its ordered tabs) by id.
    async fn find_project(&self, project_id: &ProjectId) -> Result<Project, StoreError>;

    /// List all projects owned by a user, most recently updated first.
    async fn list_projects(&self, owner_id: &UserId) -> Result<Vec<Project>, StoreError>;

    /// Persist the full state of an existing project, replacing its tab list.
    async fn save_project(&self, project: &Project) -> Result<(), StoreError>;

    /// Delete a project and its tabs.
    async fn delete_project(&self, project_id: &ProjectId) -> Result<(), StoreError>;
}
