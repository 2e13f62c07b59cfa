use {
    axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    },
    chrono::{SecondsFormat, Utc},
    serde::Serialize,
    tracing::{error, info},
    village_checkins::Checkin,
};

use crate::{error::ApiError, state::AppState};

// ── Check-ins ────────────────────────────────────────────────────────────────

pub async fn checkins_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Checkin>>, ApiError> {
    info!("fetching check-in messages from slack");
    match state.checkins.fetch().await {
        Ok(checkins) => {
            info!(count = checkins.len(), "serving check-in messages");
            Ok(Json(checkins))
        },
        Err(e) => {
            error!(error = %e, "error fetching check-ins");
            Err(ApiError::new("Failed to fetch messages", e))
        },
    }
}

// ── Students ─────────────────────────────────────────────────────────────────

pub async fn students_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    info!("fetching student list from slack");
    match state.members.fetch().await {
        Ok(students) => {
            info!(count = students.len(), "serving students");
            Ok(Json(students.into_iter().map(|s| s.name).collect()))
        },
        Err(e) => {
            error!(error = %e, "error fetching students");
            Err(ApiError::new("Failed to fetch students", e))
        },
    }
}

// ── Health ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    pub slack_connected: bool,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        slack_connected: state.slack_connected,
    })
}

// ── Connection test ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ConnectionOk {
    pub success: bool,
    pub team: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionFailed {
    pub success: bool,
    pub error: String,
}

pub async fn test_connection_handler(State(state): State<AppState>) -> Response {
    match state.slack.auth_test().await {
        Ok(identity) => {
            info!(team = %identity.team, user = %identity.user, "slack connection ok");
            Json(ConnectionOk {
                success: true,
                team: identity.team,
                user: identity.user,
                bot_id: identity.bot_id,
            })
            .into_response()
        },
        Err(e) => {
            error!(error = %e, "slack connection test failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ConnectionFailed {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        },
    }
}
