//! Preset types.

use chrono::{DateTime, Utc};

use super::{PresetId, UserId};

/// Preset record: a named, reusable bundle of styling data.
///
/// `data` is owned entirely by the caller's domain and opaque to the service;
/// updates replace it wholesale, never merge into it.
#[derive(Clone, Debug)]
pub struct Preset {
    pub id: PresetId,
    pub owner_id: UserId,
    pub name: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a preset
#[derive(Clone, Debug)]
pub struct CreatePresetParams {
    pub owner_id: UserId,
    pub name: String,
    pub data: serde_json::Value,
}
