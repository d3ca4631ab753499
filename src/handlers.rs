use crate::errors::AppError;
use crate::models::{
    ActivityDefinition, ActivitySuggestion, ApiResponse, CurrentStatistics, FinishedActivity,
    FullStatistics, HistoryQuery, MarkDoneRequest, MessageResponse,
};
use crate::state::AppState;
use crate::stats::{current_statistics, full_statistics};
use crate::tracker;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

pub async fn health() -> Json<ApiResponse<MessageResponse>> {
    Json(ApiResponse::ok(message("API is healthy")))
}

pub async fn get_activities(State(state): State<AppState>) -> ApiResult<Vec<ActivityDefinition>> {
    let store = state.store.lock().await;
    Ok(Json(ApiResponse::ok(store.load_catalog().await?)))
}

pub async fn get_suggestion(State(state): State<AppState>) -> ApiResult<ActivitySuggestion> {
    let store = state.store.lock().await;
    let catalog = store.load_catalog().await?;
    let history = store.load_history().await?;

    let suggestion = tracker::suggest(&catalog, &history, today())?;
    Ok(Json(ApiResponse::ok(suggestion)))
}

pub async fn mark_done(
    State(state): State<AppState>,
    payload: Result<Json<MarkDoneRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(payload) = payload?;
    let activity_type = payload.activity_type.trim();
    if activity_type.is_empty() {
        return Err(AppError::bad_request("type must not be empty"));
    }

    let now = Local::now();
    let store = state.store.lock().await;
    if state.config.reject_duplicates {
        let history = store.load_history().await?;
        tracker::check_duplicate(&history, activity_type, payload.id, now.date_naive())?;
    }

    let entry = tracker::new_entry(activity_type, payload.id, now);
    info!(activity_type = %entry.activity_type, id = entry.id, date = %entry.date, "activity marked as done");
    store.append_history(entry).await?;

    Ok(Json(ApiResponse::ok(message("Activity marked as done"))))
}

pub async fn cancel_last(State(state): State<AppState>) -> ApiResult<MessageResponse> {
    let store = state.store.lock().await;
    let mut history = store.load_history().await?;

    if tracker::cancel_last(&mut history) {
        store.save_history(&history).await?;
        info!(entries = history.len(), "last activity canceled");
    }

    Ok(Json(ApiResponse::ok(message("Last activity was canceled"))))
}

pub async fn get_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Vec<FinishedActivity>> {
    let Query(query) = query?;
    let store = state.store.lock().await;
    let history = store.load_history().await?;
    Ok(Json(ApiResponse::ok(tracker::query_history(&history, &query))))
}

pub async fn get_current_statistics(State(state): State<AppState>) -> ApiResult<CurrentStatistics> {
    let store = state.store.lock().await;
    let history = store.load_history().await?;
    Ok(Json(ApiResponse::ok(current_statistics(&history, today()))))
}

pub async fn get_statistics(State(state): State<AppState>) -> ApiResult<FullStatistics> {
    let store = state.store.lock().await;
    let history = store.load_history().await?;
    Ok(Json(ApiResponse::ok(full_statistics(&history))))
}

fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
