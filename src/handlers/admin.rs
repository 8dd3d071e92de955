use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::auth::LOGIN_DELAY_MS;
use crate::state::AppState;

fn bearer_token(headers: &HeaderMap) -> &str {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("")
}

fn check_auth(headers: &HeaderMap, state: &AppState) -> Result<String, AppError> {
    let token = bearer_token(headers);
    if state.sessions.is_authenticated(token) {
        Ok(token.to_string())
    } else {
        Err(AppError::Unauthorized)
    }
}

// POST /api/admin/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub login_time: i64,
    pub expires_at: i64,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // fixed delay regardless of outcome
    tokio::time::sleep(Duration::from_millis(LOGIN_DELAY_MS)).await;

    match state
        .sessions
        .login(&body.password, &state.config.admin_password)
    {
        Some((token, session)) => {
            tracing::info!("admin session opened");
            Ok(Json(LoginResponse {
                token,
                login_time: session.login_time,
                expires_at: session.expires_at,
            }))
        }
        None => {
            tracing::warn!("admin login rejected");
            Err(AppError::Unauthorized)
        }
    }
}

// POST /api/admin/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    state.sessions.logout(bearer_token(&headers));
    Json(serde_json::json!({"ok": true}))
}

// POST /api/admin/extend
pub async fn extend_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    match state.sessions.extend(bearer_token(&headers)) {
        Some(expires_at) => Ok(Json(serde_json::json!({"ok": true, "expiresAt": expires_at}))),
        None => Err(AppError::Unauthorized),
    }
}

// GET /api/admin/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state)?;

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings(&db).map_err(|e| {
            tracing::error!(error = %e, "booking list failed");
            AppError::Store("예약 목록 조회에 실패했습니다.".to_string())
        })?
    };

    Ok(Json(bookings))
}

// GET /api/admin/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state)?;

    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, &id).map_err(|e| {
            tracing::error!(error = %e, "booking fetch failed");
            AppError::Store("예약 조회에 실패했습니다.".to_string())
        })?
    };

    booking.map(Json).ok_or(AppError::NotFound)
}

// POST /api/admin/bookings/:id/status
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
    pub admin_notes: Option<String>,
    pub estimated_price: Option<i64>,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state)?;

    let status = BookingStatus::parse_opt(&body.status).ok_or_else(|| {
        AppError::Validation(format!("알 수 없는 예약 상태입니다: {}", body.status))
    })?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_booking_status(
            &db,
            &id,
            &status,
            body.admin_notes.as_deref(),
            body.estimated_price,
        )
        .map_err(|e| {
            tracing::error!(error = %e, "booking update failed");
            AppError::Store("예약 업데이트에 실패했습니다.".to_string())
        })?
    };

    if updated {
        tracing::info!(id = %id, status = %status.as_str(), "booking status updated");
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound)
    }
}
