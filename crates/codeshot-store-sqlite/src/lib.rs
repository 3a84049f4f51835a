//! SQLite backend for codeshot storage.
//!
//! Schema lives in `./migrations` and is embedded at compile time. Timestamps
//! are stored as unix epoch milliseconds so the strictly-increasing
//! `updated_at` guarantee survives the round trip through the database.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use codeshot_storage::{
    CreatePresetParams, CreateProjectParams, CreateUserParams, EditorOptions, EditorTab, Frame,
    Preset, PresetId, Project, ProjectId, Store, StoreError, TabId, Terminal, User, UserId,
};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open("sqlite::memory:").await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { pool })
    }
}

/// Decode an epoch-milliseconds column.
fn ts(ms: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| StoreError::Backend(format!("bad timestamp {ms}")))
}

/// Current time truncated to millisecond precision (the stored precision).
fn now_ms() -> Result<DateTime<Utc>, StoreError> {
    ts(Utc::now().timestamp_millis())
}

#[derive(sqlx::FromRow)]
struct PresetRow {
    id: String,
    owner_id: String,
    name: String,
    data: String,
    created_at: i64,
    updated_at: i64,
}

impl PresetRow {
    fn into_preset(self) -> Result<Preset, StoreError> {
        Ok(Preset {
            id: PresetId(self.id),
            owner_id: UserId(self.owner_id),
            name: self.name,
            data: serde_json::from_str(&self.data)
                .map_err(|e| StoreError::Backend(e.to_string()))?,
            created_at: ts(self.created_at)?,
            updated_at: ts(self.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: String,
    owner_id: String,
    name: String,
    frame_background: String,
    frame_opacity: f64,
    frame_visible: bool,
    frame_radius: i32,
    frame_padding: i32,
    editor_font_weight: i32,
    editor_show_line_numbers: bool,
    editor_font_id: String,
    editor_theme_id: String,
    editor_enable_ligatures: bool,
    terminal_opacity: f64,
    terminal_background: String,
    terminal_text_color: String,
    terminal_show_watermark: bool,
    terminal_show_header: bool,
    terminal_show_glass_reflection: bool,
    terminal_shadow: Option<String>,
    terminal_alternative_theme: bool,
    terminal_accent_visible: bool,
    terminal_kind: String,
    created_at: i64,
    updated_at: i64,
}

impl ProjectRow {
    fn into_project(self, editor_tabs: Vec<EditorTab>) -> Result<Project, StoreError> {
        Ok(Project {
            id: ProjectId(self.id),
            owner_id: UserId(self.owner_id),
            name: self.name,
            frame: Frame {
                background: self.frame_background,
                opacity: self.frame_opacity,
                visible: self.frame_visible,
                radius: self.frame_radius,
                padding: self.frame_padding,
            },
            editor_options: EditorOptions {
                font_weight: self.editor_font_weight,
                show_line_numbers: self.editor_show_line_numbers,
                font_id: self.editor_font_id,
                theme_id: self.editor_theme_id,
                enable_ligatures: self.editor_enable_ligatures,
            },
            terminal: Terminal {
                opacity: self.terminal_opacity,
                background: self.terminal_background,
                text_color: self.terminal_text_color,
                show_watermark: self.terminal_show_watermark,
                show_header: self.terminal_show_header,
                show_glass_reflection: self.terminal_show_glass_reflection,
                shadow: self.terminal_shadow,
                alternative_theme: self.terminal_alternative_theme,
                accent_visible: self.terminal_accent_visible,
                kind: self.terminal_kind,
            },
            editor_tabs,
            created_at: ts(self.created_at)?,
            updated_at: ts(self.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TabRow {
    id: String,
    code: String,
    language_id: String,
    tab_name: String,
}

impl SqliteStore {
    async fn fetch_tabs(&self, project_id: &str) -> Result<Vec<EditorTab>, StoreError> {
        let rows = sqlx::query_as::<_, TabRow>(
            "SELECT id,code,language_id,tab_name FROM editor_tabs
             WHERE project_id=? ORDER BY position",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| EditorTab {
                id: TabId(r.id),
                code: r.code,
                language_id: r.language_id,
                tab_name: r.tab_name,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // ───────────────────────────────── Users ──────────────────────────────

    async fn create_user(&self, params: &CreateUserParams) -> Result<User, StoreError> {
        let id = UserId::generate();
        let now = now_ms()?;
        sqlx::query("INSERT INTO users(id,email,created_at) VALUES(?,?,?)")
            .bind(&id.0)
            .bind(&params.email)
            .bind(now.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let s = e.to_string();
                if s.contains("UNIQUE") {
                    StoreError::AlreadyExists
                } else {
                    StoreError::Backend(s)
                }
            })?;
        Ok(User {
            id,
            email: params.email.clone(),
            created_at: now,
        })
    }

    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, (String, String, i64)>(
            "SELECT id,email,created_at FROM users WHERE id=?",
        )
        .bind(&user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        match row {
            None => Err(StoreError::NotFound),
            Some((id, email, created_at)) => Ok(User {
                id: UserId(id),
                email,
                created_at: ts(created_at)?,
            }),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, (String, String, i64)>(
            "SELECT id,email,created_at FROM users WHERE email=?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        match row {
            None => Err(StoreError::NotFound),
            Some((id, email, created_at)) => Ok(User {
                id: UserId(id),
                email,
                created_at: ts(created_at)?,
            }),
        }
    }

    // ──────────────────────────────── Presets ─────────────────────────────

    async fn create_preset(&self, params: &CreatePresetParams) -> Result<Preset, StoreError> {
        let id = PresetId::generate();
        let now = now_ms()?;
        let data = serde_json::to_string(&params.data)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        sqlx::query(
            "INSERT INTO presets(id,owner_id,name,data,created_at,updated_at)
             VALUES(?,?,?,?,?,?)",
        )
        .bind(&id.0)
        .bind(&params.owner_id.0)
        .bind(&params.name)
        .bind(&data)
        .bind(now.timestamp_millis())
        .bind(now.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Preset {
            id,
            owner_id: params.owner_id.clone(),
            name: params.name.clone(),
            data: params.data.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_preset(&self, preset_id: &PresetId) -> Result<Preset, StoreError> {
        let row = sqlx::query_as::<_, PresetRow>(
            "SELECT id,owner_id,name,data,created_at,updated_at FROM presets WHERE id=?",
        )
        .bind(&preset_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        match row {
            None => Err(StoreError::NotFound),
            Some(row) => row.into_preset(),
        }
    }

    async fn list_presets(&self, owner_id: &UserId) -> Result<Vec<Preset>, StoreError> {
        let rows = sqlx::query_as::<_, PresetRow>(
            "SELECT id,owner_id,name,data,created_at,updated_at FROM presets
             WHERE owner_id=? ORDER BY updated_at DESC, id",
        )
        .bind(&owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.into_iter().map(PresetRow::into_preset).collect()
    }

    async fn save_preset(&self, preset: &Preset) -> Result<(), StoreError> {
        let data = serde_json::to_string(&preset.data)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let result = sqlx::query("UPDATE presets SET name=?,data=?,updated_at=? WHERE id=?")
            .bind(&preset.name)
            .bind(&data)
            .bind(preset.updated_at.timestamp_millis())
            .bind(&preset.id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_preset(&self, preset_id: &PresetId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM presets WHERE id=?")
            .bind(&preset_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    // ─────────────────────────────── Projects ─────────────────────────────

    async fn create_project(&self, params: &CreateProjectParams) -> Result<Project, StoreError> {
        let id = ProjectId::generate();
        let now = now_ms()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        sqlx::query(
            "INSERT INTO projects(
                id,owner_id,name,
                frame_background,frame_opacity,frame_visible,frame_radius,frame_padding,
                editor_font_weight,editor_show_line_numbers,editor_font_id,editor_theme_id,
                editor_enable_ligatures,
                terminal_opacity,terminal_background,terminal_text_color,terminal_show_watermark,
                terminal_show_header,terminal_show_glass_reflection,terminal_shadow,
                terminal_alternative_theme,terminal_accent_visible,terminal_kind,
                created_at,updated_at)
             VALUES(?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)",
        )
        .bind(&id.0)
        .bind(&params.owner_id.0)
        .bind(&params.name)
        .bind(&params.frame.background)
        .bind(params.frame.opacity)
        .bind(params.frame.visible)
        .bind(params.frame.radius)
        .bind(params.frame.padding)
        .bind(params.editor_options.font_weight)
        .bind(params.editor_options.show_line_numbers)
        .bind(&params.editor_options.font_id)
        .bind(&params.editor_options.theme_id)
        .bind(params.editor_options.enable_ligatures)
        .bind(params.terminal.opacity)
        .bind(&params.terminal.background)
        .bind(&params.terminal.text_color)
        .bind(params.terminal.show_watermark)
        .bind(params.terminal.show_header)
        .bind(params.terminal.show_glass_reflection)
        .bind(&params.terminal.shadow)
        .bind(params.terminal.alternative_theme)
        .bind(params.terminal.accent_visible)
        .bind(&params.terminal.kind)
        .bind(now.timestamp_millis())
        .bind(now.timestamp_millis())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut editor_tabs = Vec::with_capacity(params.editor_tabs.len());
        for (position, tab) in params.editor_tabs.iter().enumerate() {
            let tab_id = TabId::generate();
            sqlx::query(
                "INSERT INTO editor_tabs(id,project_id,position,code,language_id,tab_name)
                 VALUES(?,?,?,?,?,?)",
            )
            .bind(&tab_id.0)
            .bind(&id.0)
            .bind(position as i64)
            .bind(&tab.code)
            .bind(&tab.language_id)
            .bind(&tab.tab_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
            editor_tabs.push(EditorTab {
                id: tab_id,
                code: tab.code.clone(),
                language_id: tab.language_id.clone(),
                tab_name: tab.tab_name.clone(),
            });
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Project {
            id,
            owner_id: params.owner_id.clone(),
            name: params.name.clone(),
            frame: params.frame.clone(),
            editor_options: params.editor_options.clone(),
            terminal: params.terminal.clone(),
            editor_tabs,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_project(&self, project_id: &ProjectId) -> Result<Project, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id=?")
            .bind(&project_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match row {
            None => Err(StoreError::NotFound),
            Some(row) => {
                let tabs = self.fetch_tabs(&row.id).await?;
                row.into_project(tabs)
            }
        }
    }

    async fn list_projects(&self, owner_id: &UserId) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE owner_id=? ORDER BY updated_at DESC, id",
        )
        .bind(&owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            let tabs = self.fetch_tabs(&row.id).await?;
            projects.push(row.into_project(tabs)?);
        }
        Ok(projects)
    }

    async fn save_project(&self, project: &Project) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE projects SET
                frame_background=?,frame_opacity=?,frame_visible=?,frame_radius=?,frame_padding=?,
                editor_font_weight=?,editor_show_line_numbers=?,editor_font_id=?,editor_theme_id=?,
                editor_enable_ligatures=?,
                terminal_opacity=?,terminal_background=?,terminal_text_color=?,
                terminal_show_watermark=?,terminal_show_header=?,terminal_show_glass_reflection=?,
                terminal_shadow=?,terminal_alternative_theme=?,terminal_accent_visible=?,
                terminal_kind=?,
                updated_at=?
             WHERE id=?",
        )
        .bind(&project.frame.background)
        .bind(project.frame.opacity)
        .bind(project.frame.visible)
        .bind(project.frame.radius)
        .bind(project.frame.padding)
        .bind(project.editor_options.font_weight)
        .bind(project.editor_options.show_line_numbers)
        .bind(&project.editor_options.font_id)
        .bind(&project.editor_options.theme_id)
        .bind(project.editor_options.enable_ligatures)
        .bind(project.terminal.opacity)
        .bind(&project.terminal.background)
        .bind(&project.terminal.text_color)
        .bind(project.terminal.show_watermark)
        .bind(project.terminal.show_header)
        .bind(project.terminal.show_glass_reflection)
        .bind(&project.terminal.shadow)
        .bind(project.terminal.alternative_theme)
        .bind(project.terminal.accent_visible)
        .bind(&project.terminal.kind)
        .bind(project.updated_at.timestamp_millis())
        .bind(&project.id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        // Replace the tab list wholesale; positions follow the vec order.
        sqlx::query("DELETE FROM editor_tabs WHERE project_id=?")
            .bind(&project.id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        for (position, tab) in project.editor_tabs.iter().enumerate() {
            sqlx::query(
                "INSERT INTO editor_tabs(id,project_id,position,code,language_id,tab_name)
                 VALUES(?,?,?,?,?,?)",
            )
            .bind(&tab.id.0)
            .bind(&project.id.0)
            .bind(position as i64)
            .bind(&tab.code)
            .bind(&tab.language_id)
            .bind(&tab.tab_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn delete_project(&self, project_id: &ProjectId) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        sqlx::query("DELETE FROM editor_tabs WHERE project_id=?")
            .bind(&project_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let result = sqlx::query("DELETE FROM projects WHERE id=?")
            .bind(&project_id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
