//! Project types.

use chrono::{DateTime, Utc};

use super::{ProjectId, TabId, UserId};

/// Project record: a composition of editor tabs plus visual settings.
///
/// `name` is set at creation and never changed by the update flow.
#[derive(Clone, Debug)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub name: String,
    pub frame: Frame,
    pub editor_options: EditorOptions,
    pub terminal: Terminal,
    /// Ordered; position in this vec is the display order.
    pub editor_tabs: Vec<EditorTab>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Frame settings (the window drawn around the editor).
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub background: String,
    pub opacity: f64,
    pub visible: bool,
    pub radius: i32,
    pub padding: i32,
}

/// Editor rendering options.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorOptions {
    pub font_weight: i32,
    pub show_line_numbers: bool,
    pub font_id: String,
    pub theme_id: String,
    pub enable_ligatures: bool,
}

/// Terminal chrome settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Terminal {
    pub opacity: f64,
    pub background: String,
    pub text_color: String,
    pub show_watermark: bool,
    pub show_header: bool,
    pub show_glass_reflection: bool,
    pub shadow: Option<String>,
    pub alternative_theme: bool,
    pub accent_visible: bool,
    /// Window chrome style ("macOs", "windows", ...). Free-form.
    pub kind: String,
}

/// One code buffer within a project.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorTab {
    pub id: TabId,
    pub code: String,
    pub language_id: String,
    pub tab_name: String,
}

/// Parameters for creating a project
#[derive(Clone, Debug)]
pub struct CreateProjectParams {
    pub owner_id: UserId,
    pub name: String,
    pub frame: Frame,
    pub editor_options: EditorOptions,
    pub terminal: Terminal,
    /// Initial tabs, in display order. Ids are assigned by the service.
    pub editor_tabs: Vec<CreateTabParams>,
}

/// Tab content for project creation (no id yet).
#[derive(Clone, Debug)]
pub struct CreateTabParams {
    pub code: String,
    pub language_id: String,
    pub tab_name: String,
}
