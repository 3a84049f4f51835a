//! User handlers.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use codeshot_storage::User;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::server::ApiServer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

pub async fn me(
    State(server): State<ApiServer>,
    AuthUser(caller): AuthUser,
) -> Result<Json<UserDto>, ApiError> {
    let user = server.current_user(&caller).await?;
    Ok(Json(user.into()))
}
