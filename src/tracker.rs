//! Suggestion rotation and history operations.
//!
//! Everything here works on a catalog and history passed in by the caller, so the
//! result only depends on what was just loaded from the store. Canceled entries
//! never count as "done" for rotation or duplicate detection.

use crate::errors::AppError;
use crate::models::{ActivityDefinition, ActivitySuggestion, FinishedActivity, HistoryQuery};
use chrono::{DateTime, Local, NaiveDate};

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Picks the catalog type after the last completed one, then the variant after the
/// last completed variant of that type. Both wrap around.
pub fn suggest(
    catalog: &[ActivityDefinition],
    history: &[FinishedActivity],
    today: NaiveDate,
) -> Result<ActivitySuggestion, AppError> {
    if catalog.is_empty() {
        return Err(AppError::Configuration("activity catalog is empty".into()));
    }

    let mut completed = history.iter().filter(|entry| !entry.is_canceled());

    let next_type_index = completed
        .clone()
        .next_back()
        .and_then(|last| {
            catalog
                .iter()
                .position(|def| def.activity_type == last.activity_type)
        })
        .map_or(0, |index| (index + 1) % catalog.len());
    let definition = &catalog[next_type_index];

    if definition.ids.is_empty() {
        return Err(AppError::Configuration(format!(
            "activity type '{}' has no variants",
            definition.activity_type
        )));
    }

    let next_id_index = completed
        .rfind(|entry| entry.activity_type == definition.activity_type)
        .and_then(|last| definition.ids.iter().position(|id| *id == last.id))
        .map_or(0, |index| (index + 1) % definition.ids.len());

    Ok(ActivitySuggestion {
        activity_type: definition.activity_type.clone(),
        id: definition.ids[next_id_index],
        date: date_key(today),
    })
}

/// Fails when the same type/id is already recorded (and not canceled) for `today`.
pub fn check_duplicate(
    history: &[FinishedActivity],
    activity_type: &str,
    id: u32,
    today: NaiveDate,
) -> Result<(), AppError> {
    let today = date_key(today);
    let exists = history.iter().any(|entry| {
        !entry.is_canceled()
            && entry.date == today
            && entry.activity_type == activity_type
            && entry.id == id
    });

    if exists {
        return Err(AppError::Duplicate {
            activity_type: activity_type.to_string(),
            id,
        });
    }
    Ok(())
}

pub fn new_entry(activity_type: &str, id: u32, now: DateTime<Local>) -> FinishedActivity {
    FinishedActivity {
        date: date_key(now.date_naive()),
        activity_type: activity_type.to_string(),
        id,
        timestamp: now.timestamp_millis(),
        canceled: None,
    }
}

/// Flags the most recent entry as canceled. Returns `false` when there is nothing
/// to change.
pub fn cancel_last(history: &mut [FinishedActivity]) -> bool {
    match history.last_mut() {
        Some(last) if !last.is_canceled() => {
            last.canceled = Some(true);
            true
        }
        _ => false,
    }
}

/// Filters by inclusive date bounds and type, newest first.
pub fn query_history(history: &[FinishedActivity], query: &HistoryQuery) -> Vec<FinishedActivity> {
    let start = non_empty(&query.start_date);
    let end = non_empty(&query.end_date);
    let activity_type = non_empty(&query.activity_type);

    let mut filtered: Vec<FinishedActivity> = history
        .iter()
        .filter(|entry| start.is_none_or(|start| entry.date.as_str() >= start))
        .filter(|entry| end.is_none_or(|end| entry.date.as_str() <= end))
        .filter(|entry| activity_type.is_none_or(|t| entry.activity_type == t))
        .rev()
        .cloned()
        .collect();

    // Stable sort over the reversed log keeps later insertions first on equal timestamps.
    filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    filtered
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
