//! Saved searches: named filter sets the driver can re-run

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LoadBoardError;
use crate::models::{EquipmentType, SearchFilters};
use crate::storage;

const KEY: &str = "saved_searches";

/// A named, persisted filter set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    pub filters: SearchFilters,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

/// Starter searches seeded on first use, so the board is not empty before
/// the driver has saved anything.
fn default_searches(now_ms: i64) -> Vec<SavedSearch> {
    vec![
        SavedSearch {
            id: "default-1".to_string(),
            name: "Florida Inbound".to_string(),
            filters: SearchFilters {
                delivery: "Tampa, FL".to_string(),
                ..SearchFilters::default()
            },
            created_at: now_ms,
        },
        SavedSearch {
            id: "default-2".to_string(),
            name: "Chicago Outbound".to_string(),
            filters: SearchFilters {
                origin: "Joliet, IL".to_string(),
                radius: 100,
                equipment_type: Some(EquipmentType::Van),
                ..SearchFilters::default()
            },
            created_at: now_ms,
        },
    ]
}

async fn load_list() -> Result<Vec<SavedSearch>, LoadBoardError> {
    let stored: Option<Vec<SavedSearch>> = storage::profile_get(KEY)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))?;

    match stored {
        Some(list) => Ok(list),
        None => {
            let defaults = default_searches(Utc::now().timestamp_millis());
            store_list(defaults.clone()).await?;
            Ok(defaults)
        }
    }
}

async fn store_list(list: Vec<SavedSearch>) -> Result<(), LoadBoardError> {
    storage::profile_put(KEY, list)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

/// Insert a new search at the front unless an identical filter set is
/// already saved. Returns the created entry.
pub(crate) fn save_in(
    list: &mut Vec<SavedSearch>,
    filters: SearchFilters,
    name: Option<String>,
    id: String,
    now_ms: i64,
) -> Option<SavedSearch> {
    if list.iter().any(|s| s.filters == filters) {
        return None;
    }

    let name = name.unwrap_or_else(|| filters.display_name());
    let search = SavedSearch {
        id,
        name,
        filters,
        created_at: now_ms,
    };
    list.insert(0, search.clone());
    Some(search)
}

/// Save a filter set; auto-names it when no name is given. Returns `None`
/// when an identical search was already saved.
pub async fn save(
    filters: SearchFilters,
    name: Option<String>,
) -> Result<Option<SavedSearch>, LoadBoardError> {
    let mut list = load_list().await?;
    let created = save_in(
        &mut list,
        filters,
        name,
        Uuid::new_v4().to_string(),
        Utc::now().timestamp_millis(),
    );
    if created.is_some() {
        store_list(list).await?;
    }
    Ok(created)
}

/// Remove a saved search by id; returns whether anything was removed.
pub async fn remove(id: &str) -> Result<bool, LoadBoardError> {
    let mut list = load_list().await?;
    let before = list.len();
    list.retain(|s| s.id != id);
    let removed = list.len() != before;
    if removed {
        store_list(list).await?;
    }
    Ok(removed)
}

/// Whether an identical filter set is already saved.
pub async fn is_saved(filters: &SearchFilters) -> Result<bool, LoadBoardError> {
    Ok(load_list().await?.iter().any(|s| &s.filters == filters))
}

/// All saved searches, newest first (seeded defaults come last).
pub async fn all() -> Result<Vec<SavedSearch>, LoadBoardError> {
    load_list().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tampa_filters() -> SearchFilters {
        SearchFilters {
            delivery: "Tampa, FL".to_string(),
            ..SearchFilters::default()
        }
    }

    #[test]
    fn test_save_in_front_inserts_and_auto_names() {
        let mut list = default_searches(0);

        let filters = SearchFilters {
            origin: "Waco, TX".to_string(),
            ..SearchFilters::default()
        };
        let created = save_in(&mut list, filters, None, "id-1".to_string(), 42).unwrap();

        assert_eq!(created.name, "From Waco");
        assert_eq!(list[0].id, "id-1");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_save_in_rejects_duplicate_filters() {
        let mut list = default_searches(0);

        // "Florida Inbound" already covers these exact filters
        let dup = save_in(&mut list, tampa_filters(), None, "id-2".to_string(), 42);
        assert!(dup.is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_explicit_name_wins_over_auto_name() {
        let mut list = Vec::new();
        let created = save_in(
            &mut list,
            tampa_filters(),
            Some("Gulf Coast".to_string()),
            "id-3".to_string(),
            42,
        )
        .unwrap();
        assert_eq!(created.name, "Gulf Coast");
    }

    #[test]
    fn test_serialized_shape() {
        let search = SavedSearch {
            id: "default-1".to_string(),
            name: "Florida Inbound".to_string(),
            filters: tampa_filters(),
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&search).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(json["filters"]["delivery"], "Tampa, FL");
    }

    #[tokio::test]
    async fn test_first_open_seeds_defaults() {
        crate::storage::tests::init_for_tests();

        let list = all().await.unwrap();
        let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Florida Inbound"));
        assert!(names.contains(&"Chicago Outbound"));
    }
}
