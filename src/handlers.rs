use crate::errors::AppError;
use crate::models::{
    DoseKey, DosePattern, PatternRequest, PatternResponse, StatsResponse, ToggleRequest,
    ToggleResponse, UndoResponse, WeekQuery, WeekResponse, SLOT_COUNT,
};
use crate::state::AppState;
use crate::stats::{build_stats, build_week, day_view};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = Local::now().date_naive();
    let data = state.data.lock().await;
    let taken_today = data
        .dose_pattern
        .active_slots()
        .filter(|&slot| data.is_taken(&DoseKey::new(today, slot)))
        .count();
    Html(render_index(
        &today.to_string(),
        taken_today,
        data.dose_pattern.active_count(),
    ))
}

pub async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekResponse>, AppError> {
    let start = match query.start {
        Some(raw) => Some(parse_date(&raw)?),
        None => None,
    };

    let data = state.data.lock().await;
    Ok(Json(build_week(&data, start)))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data)))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let date = parse_date(&payload.date)?;
    if usize::from(payload.slot) >= SLOT_COUNT {
        return Err(AppError::bad_request(format!(
            "slot must be 0..{}",
            SLOT_COUNT - 1
        )));
    }

    let key = DoseKey::new(date, payload.slot);
    let mut data = state.data.lock().await;
    if !data.dose_pattern.is_active(payload.slot) {
        return Err(AppError::bad_request("slot is not active"));
    }

    data.toggle(key);
    persist_data(&state.data_path, &data).await?;

    let today = Local::now().date_naive();
    Ok(Json(ToggleResponse {
        key: key.to_string(),
        taken: data.is_taken(&key),
        day: day_view(date, today, &data),
        can_undo: data.can_undo(),
    }))
}

pub async fn undo(State(state): State<AppState>) -> Result<Json<UndoResponse>, AppError> {
    let mut data = state.data.lock().await;
    let undone = data.undo();
    if undone {
        persist_data(&state.data_path, &data).await?;
    }

    Ok(Json(UndoResponse {
        undone,
        can_undo: data.can_undo(),
    }))
}

pub async fn get_pattern(State(state): State<AppState>) -> Result<Json<PatternResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(to_pattern_response(&data.dose_pattern)))
}

// Pattern changes are deliberate settings edits; they are never pushed onto
// the undo stack.
pub async fn set_pattern(
    State(state): State<AppState>,
    Json(payload): Json<PatternRequest>,
) -> Result<Json<PatternResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.dose_pattern = DosePattern(payload.slots);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(to_pattern_response(&data.dose_pattern)))
}

fn to_pattern_response(pattern: &DosePattern) -> PatternResponse {
    PatternResponse {
        slots: pattern.0,
        active_count: pattern.active_count(),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))
}
