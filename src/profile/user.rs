//! Demo driver selection
//!
//! The board runs against a fixed roster of demo driver ids; the selected id
//! keys the recommendation service calls.

use crate::error::LoadBoardError;
use crate::storage;

const KEY: &str = "user_id";

/// Demo driver ids recognized by the recommendation service
pub const DEMO_USER_IDS: [&str; 5] = [
    "1450181150",
    "635246794",
    "169348607",
    "689997252",
    "625493898",
];

/// The selected demo driver; defaults to the first of the roster. A stored
/// id that has dropped off the roster is ignored.
pub async fn current() -> Result<String, LoadBoardError> {
    let stored: Option<String> = storage::profile_get(KEY)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))?;

    match stored {
        Some(id) if DEMO_USER_IDS.contains(&id.as_str()) => Ok(id),
        _ => Ok(DEMO_USER_IDS[0].to_string()),
    }
}

/// Select a demo driver. Ids outside the roster are rejected.
pub async fn set(id: &str) -> Result<(), LoadBoardError> {
    if !DEMO_USER_IDS.contains(&id) {
        return Err(LoadBoardError::validation(format!(
            "unknown demo user id \"{id}\""
        )));
    }
    storage::profile_put(KEY, id.to_string())
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_to_first_roster_id() {
        crate::storage::tests::init_for_tests();

        // Nothing stored yet in this keyspace slot; current() falls back
        let id = current().await.unwrap();
        assert!(DEMO_USER_IDS.contains(&id.as_str()));
    }

    #[tokio::test]
    async fn test_set_rejects_unknown_ids() {
        crate::storage::tests::init_for_tests();

        assert!(matches!(
            set("not-a-driver").await,
            Err(LoadBoardError::Validation { .. })
        ));

        set(DEMO_USER_IDS[2]).await.unwrap();
        assert_eq!(current().await.unwrap(), DEMO_USER_IDS[2]);
    }
}
