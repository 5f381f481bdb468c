//! Booked loads: confirmations the driver has accepted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LoadBoardError;
use crate::models::{Load, LoadStatus};
use crate::storage;

const KEY: &str = "booked_loads";

/// A load plus its booking confirmation. Serializes with the load fields at
/// the top level, the shape the original booked list stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookedLoad {
    #[serde(flatten)]
    pub load: Load,
    pub booking_id: String,
    pub booked_at: DateTime<Utc>,
}

async fn load_list() -> Result<Vec<BookedLoad>, LoadBoardError> {
    Ok(storage::profile_get(KEY)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))?
        .unwrap_or_default())
}

async fn store_list(list: Vec<BookedLoad>) -> Result<(), LoadBoardError> {
    storage::profile_put(KEY, list)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

/// Insert a fresh booking at the front of the list. A load that is already
/// booked is left untouched. Newly booked loads start out assigned.
pub(crate) fn record_in(
    list: &mut Vec<BookedLoad>,
    load: &Load,
    booking_id: &str,
    booked_at: DateTime<Utc>,
) -> bool {
    if list.iter().any(|b| b.load.id == load.id) {
        return false;
    }

    let mut load = load.clone();
    load.status = Some(LoadStatus::Assigned);

    list.insert(
        0,
        BookedLoad {
            load,
            booking_id: booking_id.to_string(),
            booked_at,
        },
    );
    true
}

/// Record a booking confirmation; returns whether the list changed.
pub async fn record(load: &Load, booking_id: &str) -> Result<bool, LoadBoardError> {
    let mut list = load_list().await?;
    let recorded = record_in(&mut list, load, booking_id, Utc::now());
    if recorded {
        store_list(list).await?;
    }
    Ok(recorded)
}

/// Whether the given load id has been booked.
pub async fn is_booked(load_id: &str) -> Result<bool, LoadBoardError> {
    Ok(load_list().await?.iter().any(|b| b.load.id == load_id))
}

/// The booking id for a load, if it has one.
pub async fn booking_id_for(load_id: &str) -> Result<Option<String>, LoadBoardError> {
    Ok(load_list()
        .await?
        .iter()
        .find(|b| b.load.id == load_id)
        .map(|b| b.booking_id.clone()))
}

/// The full booked list, newest first.
pub async fn all() -> Result<Vec<BookedLoad>, LoadBoardError> {
    load_list().await
}

/// Booked loads currently in the given lifecycle status.
pub async fn with_status(status: LoadStatus) -> Result<Vec<BookedLoad>, LoadBoardError> {
    Ok(load_list()
        .await?
        .into_iter()
        .filter(|b| b.load.status == Some(status))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::load::tests::sample_load;

    #[test]
    fn test_record_stamps_assigned_and_prepends() {
        let mut list = Vec::new();
        let now = Utc::now();

        let mut first = sample_load();
        first.id = "b-1".to_string();
        first.status = Some(LoadStatus::Delivered);
        assert!(record_in(&mut list, &first, "BK-b-1-X", now));

        let mut second = sample_load();
        second.id = "b-2".to_string();
        assert!(record_in(&mut list, &second, "BK-b-2-X", now));

        // Newest booking first, and status is reset to assigned
        assert_eq!(list[0].load.id, "b-2");
        assert_eq!(list[1].load.id, "b-1");
        assert_eq!(list[1].load.status, Some(LoadStatus::Assigned));
    }

    #[test]
    fn test_record_ignores_duplicates() {
        let mut list = Vec::new();
        let load = sample_load();
        let now = Utc::now();

        assert!(record_in(&mut list, &load, "BK-1", now));
        assert!(!record_in(&mut list, &load, "BK-2", now));

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].booking_id, "BK-1");
    }

    #[test]
    fn test_booked_load_serializes_flat() {
        let mut list = Vec::new();
        record_in(&mut list, &sample_load(), "BK-1-TEST", Utc::now());

        let json = serde_json::to_value(&list[0]).unwrap();
        // Load fields sit next to the booking fields, not nested
        assert_eq!(json["id"], "1");
        assert_eq!(json["bookingId"], "BK-1-TEST");
        assert!(json.get("bookedAt").is_some());
        assert_eq!(json["status"], "assigned");

        let back: BookedLoad = serde_json::from_value(json).unwrap();
        assert_eq!(back, list[0]);
    }

    #[tokio::test]
    async fn test_persisted_booking_round_trip() {
        crate::storage::tests::init_for_tests();

        let mut load = sample_load();
        load.id = "booked-test-1".to_string();

        assert!(record(&load, "BK-booked-test-1-A").await.unwrap());
        assert!(is_booked("booked-test-1").await.unwrap());
        assert_eq!(
            booking_id_for("booked-test-1").await.unwrap(),
            Some("BK-booked-test-1-A".to_string())
        );

        // Booking again keeps the original confirmation
        assert!(!record(&load, "BK-booked-test-1-B").await.unwrap());
        assert_eq!(
            booking_id_for("booked-test-1").await.unwrap(),
            Some("BK-booked-test-1-A".to_string())
        );
    }
}
