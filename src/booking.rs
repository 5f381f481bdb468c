//! Booking stub
//!
//! There is no real booking backend: the stub validates the load id, waits a
//! configured processing delay and fabricates a confirmation id. A real
//! implementation would check availability and create a booking record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::LoadBoardError;

/// Booking request body: the id of the load to book
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub load_id: String,
}

/// Fabricated confirmation returned by the stub
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    pub booking_id: String,
    pub load_id: String,
    pub booked_at: DateTime<Utc>,
    pub message: String,
}

fn to_base36_upper(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

/// Confirmation id in the `BK-{load id}-{base36 millis}` shape
#[must_use]
pub fn confirmation_id(load_id: &str, at: DateTime<Utc>) -> String {
    format!(
        "BK-{load_id}-{}",
        to_base36_upper(at.timestamp_millis().max(0) as u64)
    )
}

/// Book a load through the stub.
///
/// Rejects an empty load id, sleeps for `processing_delay` to simulate the
/// round trip, then returns a fabricated confirmation.
pub async fn book(
    load_id: &str,
    processing_delay: Duration,
) -> Result<BookingConfirmation, LoadBoardError> {
    if load_id.trim().is_empty() {
        return Err(LoadBoardError::validation("Load ID is required"));
    }

    tokio::time::sleep(processing_delay).await;

    let booked_at = Utc::now();
    Ok(BookingConfirmation {
        success: true,
        booking_id: confirmation_id(load_id, booked_at),
        load_id: load_id.to_string(),
        booked_at,
        message: "Load booked successfully".to_string(),
    })
}
