use crate::errors::AppError;
use crate::models::{
    Category, DateCell, ExportDocument, ItemId, TrackedItem, TrackerData, TrackerRow, TrackerView,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Ids follow the wall clock in milliseconds but never repeat or go backwards.
pub fn next_item_id(tracker: &TrackerData, now: DateTime<Utc>) -> ItemId {
    let clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let last = tracker.items.iter().map(|item| item.id.0).max().unwrap_or(0);
    ItemId(clock.max(last.saturating_add(1)))
}

pub fn add_item(
    tracker: &mut TrackerData,
    name: &str,
    category: Category,
    now: DateTime<Utc>,
) -> Result<TrackedItem, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("item name must not be empty"));
    }

    let item = TrackedItem {
        id: next_item_id(tracker, now),
        name: name.to_string(),
    };
    tracker.items.push(item.clone());
    tracker.categories.assign(item.id, category);
    Ok(item)
}

pub fn remove_item(tracker: &mut TrackerData, id: ItemId) -> Result<TrackedItem, AppError> {
    let index = tracker
        .items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| AppError::not_found(format!("no item with id {id}")))?;

    let removed = tracker.items.remove(index);
    tracker.progress.remove_item(id);
    tracker.categories.remove(id);
    Ok(removed)
}

/// Flips the completion flag for one day and returns the new value.
pub fn toggle_progress(tracker: &mut TrackerData, id: ItemId, date: NaiveDate) -> Result<bool, AppError> {
    if !tracker.items.iter().any(|item| item.id == id) {
        return Err(AppError::not_found(format!("no item with id {id}")));
    }

    let completed = !tracker.progress.is_completed(id, date);
    tracker.progress.set(id, date, completed);
    Ok(completed)
}

pub fn month_dates(year: i32, month: u32) -> Result<Vec<NaiveDate>, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::bad_request("month must be between 1 and 12"))?;

    let mut dates = Vec::with_capacity(31);
    let mut date = first;
    while date.month() == month {
        dates.push(date);
        date += Duration::days(1);
    }
    Ok(dates)
}

pub fn tracker_view(
    tracker: &TrackerData,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<TrackerView, AppError> {
    let dates = month_dates(year, month)?;

    let rows = tracker
        .items
        .iter()
        .map(|item| TrackerRow {
            id: item.id,
            name: item.name.clone(),
            category: tracker.categories.resolve(item.id),
            checked: dates
                .iter()
                .map(|date| tracker.progress.is_completed(item.id, *date))
                .collect(),
        })
        .collect();

    Ok(TrackerView {
        year,
        month,
        dates: dates
            .into_iter()
            .map(|date| DateCell {
                date,
                is_today: date == today,
            })
            .collect(),
        rows,
    })
}

pub fn export_document(tracker: &TrackerData, now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        items: tracker.items.clone(),
        progress_data: tracker.progress.clone(),
        categories: tracker.categories.clone(),
        export_date: Some(now),
    }
}

pub fn backup_file_name(today: NaiveDate) -> String {
    format!("progress-tracker-backup-{}.json", today.format("%Y-%m-%d"))
}

/// Parses a backup and replaces the tracker contents wholesale.
pub fn import_document(tracker: &mut TrackerData, payload: &[u8]) -> Result<(), AppError> {
    let value: serde_json::Value = serde_json::from_slice(payload)
        .map_err(|_| AppError::bad_request("Error reading file. Please make sure it's a valid JSON file."))?;

    let document: ExportDocument = serde_json::from_value(value).map_err(|err| {
        AppError::bad_request(format!(
            "Invalid backup file. Please make sure you're importing a valid Progress Tracker backup ({err})."
        ))
    })?;

    tracker.items = document.items;
    tracker.progress = document.progress_data;
    tracker.categories = document.categories;
    Ok(())
}
