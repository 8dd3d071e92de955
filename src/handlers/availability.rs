use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::{DaySlots, MonthAvailability};
use crate::services::calendar;
use crate::state::AppState;

// GET /api/availability/month/:month
pub async fn month_availability(
    State(state): State<Arc<AppState>>,
    Path(month): Path<String>,
) -> Result<Json<MonthAvailability>, AppError> {
    if calendar::parse_month_string(&month).is_none() {
        return Err(AppError::Validation(
            "월 형식이 올바르지 않습니다. (YYYY-MM)".to_string(),
        ));
    }

    let availability = state
        .availability
        .month_availability(&month)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, month = %month, "availability fetch failed");
            AppError::Store("예약 가능 일정을 불러오지 못했습니다.".to_string())
        })?;

    Ok(Json(availability))
}

// GET /api/availability/day/:date
pub async fn day_slots(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<DaySlots>, AppError> {
    let slots = state.availability.day_slots(&date).await.map_err(|e| {
        tracing::error!(error = %e, date = %date, "day slot fetch failed");
        AppError::Store("예약 가능 시간대를 불러오지 못했습니다.".to_string())
    })?;

    Ok(Json(slots))
}
