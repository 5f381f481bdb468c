//! Search history: every applied filter set, newest first, capped

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LoadBoardError;
use crate::models::{EquipmentType, SearchFilters};
use crate::storage;

const KEY: &str = "search_history";

/// History keeps the most recent 50 searches
pub const HISTORY_CAP: usize = 50;

/// One past search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub filters: SearchFilters,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Example history seeded on first use.
fn default_history(now_ms: i64) -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: "hist-default-1".to_string(),
            filters: SearchFilters {
                delivery: "Dallas, TX".to_string(),
                ..SearchFilters::default()
            },
            timestamp: now_ms - 3_600_000, // an hour ago
        },
        HistoryEntry {
            id: "hist-default-2".to_string(),
            filters: SearchFilters {
                origin: "San Antonio, TX".to_string(),
                radius: 100,
                equipment_type: Some(EquipmentType::Reefer),
                ..SearchFilters::default()
            },
            timestamp: now_ms - 86_400_000, // a day ago
        },
    ]
}

async fn load_list() -> Result<Vec<HistoryEntry>, LoadBoardError> {
    let stored: Option<Vec<HistoryEntry>> = storage::profile_get(KEY)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))?;

    match stored {
        Some(list) => Ok(list),
        None => {
            let defaults = default_history(Utc::now().timestamp_millis());
            store_list(defaults.clone()).await?;
            Ok(defaults)
        }
    }
}

async fn store_list(list: Vec<HistoryEntry>) -> Result<(), LoadBoardError> {
    storage::profile_put(KEY, list)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

/// Push a search to the front, dropping any earlier identical filter set and
/// trimming to the cap.
pub(crate) fn record_in(list: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    list.retain(|h| h.filters != entry.filters);
    list.insert(0, entry);
    list.truncate(HISTORY_CAP);
}

/// Record an applied search in the history.
pub async fn record(filters: SearchFilters) -> Result<HistoryEntry, LoadBoardError> {
    let entry = HistoryEntry {
        id: Uuid::new_v4().to_string(),
        filters,
        timestamp: Utc::now().timestamp_millis(),
    };

    let mut list = load_list().await?;
    record_in(&mut list, entry.clone());
    store_list(list).await?;
    Ok(entry)
}

/// Wipe the history.
pub async fn clear() -> Result<(), LoadBoardError> {
    store_list(Vec::new()).await
}

/// The history, newest first.
pub async fn all() -> Result<Vec<HistoryEntry>, LoadBoardError> {
    load_list().await
}
