use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingInput, ChatFlowState};
use crate::services::{booking_number, bookings, calendar};
use crate::state::AppState;

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(input): Json<BookingInput>,
) -> Result<Json<Booking>, AppError> {
    validate_input(&input)?;

    let booking = {
        let db = state.db.lock().unwrap();
        bookings::create_from_input(&db, input).map_err(|e| {
            tracing::error!(error = %e, "booking creation failed");
            AppError::Store("예약 생성에 실패했습니다.".to_string())
        })?
    };

    tracing::info!(id = %booking.id, number = %booking.booking_number, "booking created");
    Ok(Json(booking))
}

fn validate_input(input: &BookingInput) -> Result<(), AppError> {
    let required = [
        ("customerName", &input.customer_name),
        ("customerPhone", &input.customer_phone),
        ("serviceAddress", &input.service_address),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "필수 항목이 누락되었습니다: {field}"
            )));
        }
    }
    if calendar::parse_date_string(&input.preferred_date).is_none() {
        return Err(AppError::Validation(
            "희망 날짜 형식이 올바르지 않습니다.".to_string(),
        ));
    }
    Ok(())
}

// POST /api/bookings/chat
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBookingResponse {
    pub booking_number: String,
    pub id: String,
    pub timestamp: String,
}

pub async fn create_chat_booking(
    State(state): State<Arc<AppState>>,
    Json(flow): Json<ChatFlowState>,
) -> Result<Json<ChatBookingResponse>, AppError> {
    let payload = flow.to_payload().map_err(|e| {
        AppError::Validation(format!("예약 정보가 완성되지 않았습니다. ({e})"))
    })?;

    let booking = {
        let db = state.db.lock().unwrap();
        bookings::create_from_chat(&db, &payload).map_err(|e| {
            tracing::error!(error = %e, "chat booking creation failed");
            AppError::Store("예약 신청 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.".to_string())
        })?
    };

    tracing::info!(id = %booking.id, number = %booking.booking_number, "chat booking created");
    Ok(Json(ChatBookingResponse {
        booking_number: booking.booking_number,
        id: booking.id,
        timestamp: payload.meta.timestamp,
    }))
}

// GET /api/bookings/search?number=AB234567
#[derive(Deserialize)]
pub struct SearchQuery {
    pub number: String,
}

/// An unknown but well-formed number is a successful empty result (null),
/// distinct from a store failure.
pub async fn search_booking(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Option<Booking>>, AppError> {
    if !booking_number::is_valid(&query.number) {
        return Err(AppError::Validation(
            "예약번호 형식이 올바르지 않습니다.".to_string(),
        ));
    }

    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_number(&db, &query.number).map_err(|e| {
            tracing::error!(error = %e, "booking lookup failed");
            AppError::Store("예약 조회에 실패했습니다.".to_string())
        })?
    };

    Ok(Json(booking))
}
