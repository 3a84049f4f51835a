//! Preset handlers: create, list, get, update, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use codeshot_storage::{Preset, PresetId};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::server::{ApiServer, PresetPatch};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDto {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Preset> for PresetDto {
    fn from(preset: Preset) -> Self {
        Self {
            id: preset.id.0,
            owner_id: preset.owner_id.0,
            name: preset.name,
            data: preset.data,
            created_at: preset.created_at,
            updated_at: preset.updated_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetCreateRequest {
    pub name: String,
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetUpdateRequest {
    pub name: Option<String>,
    pub data: Option<serde_json::Value>,
}

pub async fn create_preset(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Json(req): Json<PresetCreateRequest>,
) -> Result<(StatusCode, Json<PresetDto>), ApiError> {
    let preset = server.create_preset(&caller, req.name, req.data).await?;
    Ok((StatusCode::CREATED, Json(preset.into())))
}

pub async fn list_presets(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<PresetDto>>, ApiError> {
    let presets = server.list_presets(&caller).await?;
    Ok(Json(presets.into_iter().map(PresetDto::from).collect()))
}

pub async fn get_preset(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PresetDto>, ApiError> {
    let preset = server.get_preset(&caller, &PresetId(id)).await?;
    Ok(Json(preset.into()))
}

pub async fn update_preset(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<PresetUpdateRequest>,
) -> Result<Json<PresetDto>, ApiError> {
    let patch = PresetPatch {
        name: req.name,
        data: req.data,
    };
    let preset = server.update_preset(&caller, &PresetId(id), patch).await?;
    Ok(Json(preset.into()))
}

pub async fn delete_preset(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    server.delete_preset(&caller, &PresetId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
