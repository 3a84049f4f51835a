//! Project handlers: create, list, get, update, delete.
//!
//! The wire format is camelCase JSON; the terminal chrome style is `type` on
//! the wire (a reserved word here, so it maps to `kind` internally).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use codeshot_storage::{
    CreateProjectParams, CreateTabParams, EditorOptions, EditorTab, Frame, Project, ProjectId,
    TabId, Terminal,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::server::{ApiServer, ProjectPatch, TabPatch};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameDto {
    pub background: String,
    pub opacity: f64,
    pub visible: bool,
    pub radius: i32,
    pub padding: i32,
}

impl From<Frame> for FrameDto {
    fn from(f: Frame) -> Self {
        Self {
            background: f.background,
            opacity: f.opacity,
            visible: f.visible,
            radius: f.radius,
            padding: f.padding,
        }
    }
}

impl From<FrameDto> for Frame {
    fn from(f: FrameDto) -> Self {
        Self {
            background: f.background,
            opacity: f.opacity,
            visible: f.visible,
            radius: f.radius,
            padding: f.padding,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptionsDto {
    pub font_weight: i32,
    pub show_line_numbers: bool,
    pub font_id: String,
    pub theme_id: String,
    pub enable_ligatures: bool,
}

impl From<EditorOptions> for EditorOptionsDto {
    fn from(o: EditorOptions) -> Self {
        Self {
            font_weight: o.font_weight,
            show_line_numbers: o.show_line_numbers,
            font_id: o.font_id,
            theme_id: o.theme_id,
            enable_ligatures: o.enable_ligatures,
        }
    }
}

impl From<EditorOptionsDto> for EditorOptions {
    fn from(o: EditorOptionsDto) -> Self {
        Self {
            font_weight: o.font_weight,
            show_line_numbers: o.show_line_numbers,
            font_id: o.font_id,
            theme_id: o.theme_id,
            enable_ligatures: o.enable_ligatures,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminalDto {
    pub opacity: f64,
    pub background: String,
    pub text_color: String,
    pub show_watermark: bool,
    pub show_header: bool,
    pub show_glass_reflection: bool,
    pub shadow: Option<String>,
    pub alternative_theme: bool,
    pub accent_visible: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Terminal> for TerminalDto {
    fn from(t: Terminal) -> Self {
        Self {
            opacity: t.opacity,
            background: t.background,
            text_color: t.text_color,
            show_watermark: t.show_watermark,
            show_header: t.show_header,
            show_glass_reflection: t.show_glass_reflection,
            shadow: t.shadow,
            alternative_theme: t.alternative_theme,
            accent_visible: t.accent_visible,
            kind: t.kind,
        }
    }
}

impl From<TerminalDto> for Terminal {
    fn from(t: TerminalDto) -> Self {
        Self {
            opacity: t.opacity,
            background: t.background,
            text_color: t.text_color,
            show_watermark: t.show_watermark,
            show_header: t.show_header,
            show_glass_reflection: t.show_glass_reflection,
            shadow: t.shadow,
            alternative_theme: t.alternative_theme,
            accent_visible: t.accent_visible,
            kind: t.kind,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabDto {
    pub id: String,
    pub code: String,
    pub language_id: String,
    pub tab_name: String,
}

impl From<EditorTab> for TabDto {
    fn from(t: EditorTab) -> Self {
        Self {
            id: t.id.0,
            code: t.code,
            language_id: t.language_id,
            tab_name: t.tab_name,
        }
    }
}

/// Tab content for project creation; ids are assigned server-side.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCreateDto {
    pub code: String,
    pub language_id: String,
    pub tab_name: String,
}

/// One incoming tab on update. An unknown id (the `"temp"` sentinel
/// included) requests creation of a new tab.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabUpdateDto {
    pub id: String,
    pub code: String,
    pub language_id: String,
    pub tab_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub frame: FrameDto,
    pub editor_options: EditorOptionsDto,
    pub terminal: TerminalDto,
    pub editor_tabs: Vec<TabDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id.0,
            owner_id: p.owner_id.0,
            name: p.name,
            frame: p.frame.into(),
            editor_options: p.editor_options.into(),
            terminal: p.terminal.into(),
            editor_tabs: p.editor_tabs.into_iter().map(TabDto::from).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateRequest {
    pub name: String,
    pub frame: FrameDto,
    pub editors: Vec<TabCreateDto>,
    pub editor_options: EditorOptionsDto,
    pub terminal: TerminalDto,
}

/// Partial update. `name` is deliberately absent: the update flow never
/// renames a project.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdateRequest {
    pub frame: Option<FrameDto>,
    pub editors: Option<Vec<TabUpdateDto>>,
    pub editor_options: Option<EditorOptionsDto>,
    pub terminal: Option<TerminalDto>,
}

pub async fn create_project(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Json(req): Json<ProjectCreateRequest>,
) -> Result<(StatusCode, Json<ProjectDto>), ApiError> {
    let params = CreateProjectParams {
        owner_id: caller,
        name: req.name,
        frame: req.frame.into(),
        editor_options: req.editor_options.into(),
        terminal: req.terminal.into(),
        editor_tabs: req
            .editors
            .into_iter()
            .map(|t| CreateTabParams {
                code: t.code,
                language_id: t.language_id,
                tab_name: t.tab_name,
            })
            .collect(),
    };
    let project = server.create_project(params).await?;
    Ok((StatusCode::CREATED, Json(project.into())))
}

pub async fn list_projects(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<ProjectDto>>, ApiError> {
    let projects = server.list_projects(&caller).await?;
    Ok(Json(projects.into_iter().map(ProjectDto::from).collect()))
}

pub async fn get_project(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = server.get_project(&caller, &ProjectId(id)).await?;
    Ok(Json(project.into()))
}

pub async fn update_project(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<ProjectUpdateRequest>,
) -> Result<Json<ProjectDto>, ApiError> {
    let patch = ProjectPatch {
        frame: req.frame.map(Frame::from),
        editors: req.editors.map(|tabs| {
            tabs.into_iter()
                .map(|t| TabPatch {
                    id: TabId(t.id),
                    code: t.code,
                    language_id: t.language_id,
                    tab_name: t.tab_name,
                })
                .collect()
        }),
        editor_options: req.editor_options.map(EditorOptions::from),
        terminal: req.terminal.map(Terminal::from),
    };
    let project = server.update_project(&caller, &ProjectId(id), patch).await?;
    Ok(Json(project.into()))
}

pub async fn delete_project(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    server.delete_project(&caller, &ProjectId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
