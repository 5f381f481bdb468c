//! Driver availability: next available time and location (NAT/NAL)

use serde::{Deserialize, Serialize};

use crate::error::LoadBoardError;
use crate::storage;

const KEY: &str = "availability";

/// Where and when the driver is next free to pick up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Availability {
    /// ISO date, e.g. `"2025-12-18"`
    pub date: String,
    /// 24h time, e.g. `"08:00"`
    pub time: String,
    pub city: String,
    pub state: String,
}

impl Availability {
    /// All four fields are required before an availability can be stored.
    pub fn validate(&self) -> Result<(), LoadBoardError> {
        if self.date.trim().is_empty()
            || self.time.trim().is_empty()
            || self.city.trim().is_empty()
            || self.state.trim().is_empty()
        {
            return Err(LoadBoardError::validation(
                "availability needs date, time, city and state",
            ));
        }
        Ok(())
    }
}

/// Store the driver's availability, replacing any previous value.
pub async fn set(availability: Availability) -> Result<(), LoadBoardError> {
    availability.validate()?;
    storage::profile_put(KEY, availability)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

/// The stored availability, if the driver has set one.
pub async fn get() -> Result<Option<Availability>, LoadBoardError> {
    storage::profile_get(KEY)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

/// Clear the stored availability.
pub async fn clear() -> Result<(), LoadBoardError> {
    storage::profile_remove(KEY)
        .await
        .map_err(|e| LoadBoardError::store(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Availability {
        Availability {
            date: "2025-12-18".to_string(),
            time: "08:00".to_string(),
            city: "Madison".to_string(),
            state: "WI".to_string(),
        }
    }

    #[test]
    fn test_validate_requires_all_fields() {
        assert!(sample().validate().is_ok());

        for blank in ["date", "time", "city", "state"] {
            let mut a = sample();
            match blank {
                "date" => a.date.clear(),
                "time" => a.time.clear(),
                "city" => a.city.clear(),
                _ => a.state.clear(),
            }
            assert!(a.validate().is_err(), "{blank} should be required");
        }
    }

    #[tokio::test]
    async fn test_set_get_clear_round_trip() {
        crate::storage::tests::init_for_tests();

        set(sample()).await.unwrap();
        assert_eq!(get().await.unwrap(), Some(sample()));

        clear().await.unwrap();
        assert_eq!(get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_rejects_incomplete_availability() {
        crate::storage::tests::init_for_tests();

        let mut a = sample();
        a.city.clear();
        assert!(matches!(
            set(a).await,
            Err(LoadBoardError::Validation { .. })
        ));
    }
}
