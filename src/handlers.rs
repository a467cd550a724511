use crate::books;
use crate::errors::AppError;
use crate::goals;
use crate::level::{all_level_info, LevelInfo};
use crate::models::{
    Book, BookForm, BookQuery, BookView, ExportDocument, GoalCell, GoalEditRequest, GoalsBoard,
    ItemId, NewItemRequest, ResizeRequest, ToggleRequest, ToggleResponse, TrackedItem,
    TrackerQuery, TrackerView,
};
use crate::state::AppState;
use crate::stats::{build_stats, StatsResponse};
use crate::storage::persist_data;
use crate::tracker;
use crate::ui::render_index;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Datelike, Local, NaiveDate, Utc};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let stats = build_stats(&data.tracker);
    Html(render_index(state.tracker_year, &stats))
}

pub async fn get_tracker(
    State(state): State<AppState>,
    Query(query): Query<TrackerQuery>,
) -> Result<Json<TrackerView>, AppError> {
    let today = today();
    let month = query.month.unwrap_or_else(|| default_month(state.tracker_year, today));
    let data = state.data.lock().await;
    Ok(Json(tracker::tracker_view(&data.tracker, state.tracker_year, month, today)?))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<NewItemRequest>,
) -> Result<(StatusCode, Json<TrackedItem>), AppError> {
    let mut data = state.data.lock().await;
    let item = tracker::add_item(&mut data.tracker, &payload.name, payload.category, Utc::now())?;
    persist_data(&state.data_path, &data).await?;

    info!(id = %item.id, category = %payload.category, "added item");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let removed = tracker::remove_item(&mut data.tracker, ItemId(id))?;
    persist_data(&state.data_path, &data).await?;

    info!(id = %removed.id, "removed item");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let mut data = state.data.lock().await;
    let completed = tracker::toggle_progress(&mut data.tracker, payload.item_id, payload.date)?;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(ToggleResponse {
        item_id: payload.item_id,
        date: payload.date,
        completed,
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data.tracker)))
}

pub async fn get_levels() -> Json<Vec<LevelInfo>> {
    Json(all_level_info())
}

pub async fn export(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.data.lock().await;
    let document: ExportDocument = tracker::export_document(&data.tracker, Utc::now());
    let disposition = format!("attachment; filename=\"{}\"", tracker::backup_file_name(today()));
    ([(header::CONTENT_DISPOSITION, disposition)], Json(document))
}

pub async fn import(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let mut restored = data.tracker.clone();
    tracker::import_document(&mut restored, &body)?;
    data.tracker = restored;
    persist_data(&state.data_path, &data).await?;

    info!(items = data.tracker.items.len(), "imported backup");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_goals(State(state): State<AppState>) -> Json<GoalsBoard> {
    let data = state.data.lock().await;
    Json(data.goals.clone())
}

pub async fn resize_goals(
    State(state): State<AppState>,
    Json(payload): Json<ResizeRequest>,
) -> Result<Json<GoalsBoard>, AppError> {
    let mut data = state.data.lock().await;
    goals::resize(&mut data.goals, payload.size)?;
    persist_data(&state.data_path, &data).await?;

    info!(size = payload.size, "resized goals board");
    Ok(Json(data.goals.clone()))
}

pub async fn edit_goal(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<GoalEditRequest>,
) -> Result<Json<GoalCell>, AppError> {
    let mut data = state.data.lock().await;
    let cell = goals::edit(&mut data.goals, index, payload.text, payload.details)?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(cell))
}

pub async fn toggle_goal(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<bool>, AppError> {
    let mut data = state.data.lock().await;
    let checked = goals::toggle(&mut data.goals, index)?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(checked))
}

pub async fn clear_goal(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    goals::clear(&mut data.goals, index)?;
    persist_data(&state.data_path, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Json<Vec<BookView>> {
    let data = state.data.lock().await;
    Json(books::list(&data.books, query.sort, query.min_score))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(form): Json<BookForm>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let mut data = state.data.lock().await;
    let book = books::add(&mut data.books, form, Utc::now())?;
    persist_data(&state.data_path, &data).await?;

    info!(id = book.id, "added book");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(form): Json<BookForm>,
) -> Result<Json<Book>, AppError> {
    let mut data = state.data.lock().await;
    let book = books::update(&mut data.books, id, form, Utc::now())?;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    books::remove(&mut data.books, id)?;
    persist_data(&state.data_path, &data).await?;

    info!(id, "removed book");
    Ok(StatusCode::NO_CONTENT)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_month(year: i32, today: NaiveDate) -> u32 {
    if today.year() == year { today.month() } else { 1 }
}
