//! Core load record: pricing, trip metrics and the pickup/delivery stops

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used by board fixtures and stop records, e.g. `"Dec 17 2025"`
pub const STOP_DATE_FORMAT: &str = "%b %d %Y";

/// A unit of freight work with pickup/delivery metadata and pricing.
///
/// The serialized field names (`loadedRPM`, `emptyMiles`, ...) are the wire
/// names used by the board fixtures, the profile store and the external
/// recommendation service, so records round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Total linehaul price in dollars
    pub price: f64,
    /// Loaded trip distance in miles
    pub distance: f64,
    /// Cargo weight in pounds
    pub weight: f64,
    /// Rate per loaded mile
    #[serde(rename = "loadedRPM")]
    pub loaded_rpm: f64,
    /// Rate per mile including empty repositioning
    #[serde(rename = "estTotalRPM")]
    pub est_total_rpm: f64,
    pub pickup: PickupStop,
    pub delivery: DeliveryStop,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reload: Option<bool>,
    /// Service requirements such as `"Hazmat"` or `"Driver Assist Unload"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<EquipmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoadStatus>,
}

/// Pickup stop for a load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PickupStop {
    pub city: String,
    pub state: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_load: Option<bool>,
    /// Deadhead miles to reach the pickup
    pub empty_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Delivery stop for a load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStop {
    pub city: String,
    pub state: String,
    pub date: String,
    pub time: String,
    /// Receiver instructions, e.g. "Call before arrival"
    #[serde(default)]
    pub instructions: Vec<String>,
    pub empty_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Trailer type required to haul a load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EquipmentType {
    Van,
    Reefer,
    Flatbed,
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentType::Van => write!(f, "Van"),
            EquipmentType::Reefer => write!(f, "Reefer"),
            EquipmentType::Flatbed => write!(f, "Flatbed"),
        }
    }
}

/// Lifecycle status of a booked load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    Assigned,
    InTransit,
    Delivered,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Assigned => write!(f, "assigned"),
            LoadStatus::InTransit => write!(f, "in-transit"),
            LoadStatus::Delivered => write!(f, "delivered"),
        }
    }
}

impl Load {
    /// Parsed pickup date, `None` when the stop carries a malformed date
    #[must_use]
    pub fn pickup_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.pickup.date, STOP_DATE_FORMAT).ok()
    }

    /// Lane summary, e.g. `"Columbus, OH -> Pittsburgh, PA"`
    #[must_use]
    pub fn lane(&self) -> String {
        format!(
            "{}, {} -> {}, {}",
            self.pickup.city, self.pickup.state, self.delivery.city, self.delivery.state
        )
    }

    /// Weight shortened for display, e.g. `"32.0k lbs"`
    #[must_use]
    pub fn formatted_weight(&self) -> String {
        format!("{:.1}k lbs", self.weight / 1000.0)
    }

    /// Whether the load carries the given service requirement
    #[must_use]
    pub fn requires(&self, service: &str) -> bool {
        self.requirements
            .as_deref()
            .is_some_and(|reqs| reqs.iter().any(|r| r == service))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_load() -> Load {
        serde_json::from_str(
            r#"{
                "id": "1",
                "price": 2379,
                "distance": 1824.2,
                "weight": 7328,
                "loadedRPM": 2.11,
                "estTotalRPM": 1.31,
                "pickup": {
                    "city": "Columbus",
                    "state": "OH",
                    "date": "Dec 17 2025",
                    "time": "6:27 AM",
                    "emptyMiles": 191,
                    "address": "900 Main St",
                    "liveLoad": true
                },
                "delivery": {
                    "city": "Pittsburgh",
                    "state": "PA",
                    "date": "Dec 21 2025",
                    "time": "5:42 AM",
                    "emptyMiles": 41,
                    "address": "850 Warehouse Blvd",
                    "instructions": ["Call before arrival", "Drop at dock"]
                },
                "badge": "!",
                "requirements": ["Customer Live Load", "Driver Assist Unload"],
                "equipmentType": "Van",
                "status": "assigned"
            }"#,
        )
        .expect("sample load JSON is valid")
    }

    #[test]
    fn test_wire_field_names_round_trip() {
        let load = sample_load();
        let json = serde_json::to_value(&load).unwrap();

        assert_eq!(json["loadedRPM"], 2.11);
        assert_eq!(json["estTotalRPM"], 1.31);
        assert_eq!(json["pickup"]["emptyMiles"], 191.0);
        assert_eq!(json["pickup"]["liveLoad"], true);
        assert_eq!(json["equipmentType"], "Van");
        assert_eq!(json["status"], "assigned");

        let back: Load = serde_json::from_value(json).unwrap();
        assert_eq!(back, load);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut load = sample_load();
        load.badge = None;
        load.status = None;
        load.equipment_type = None;
        load.requirements = None;

        let json = serde_json::to_value(&load).unwrap();
        assert!(json.get("badge").is_none());
        assert!(json.get("status").is_none());
        assert!(json.get("equipmentType").is_none());
        assert!(json.get("requirements").is_none());
    }

    #[test]
    fn test_status_uses_kebab_case() {
        let status: LoadStatus = serde_json::from_str("\"in-transit\"").unwrap();
        assert_eq!(status, LoadStatus::InTransit);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"in-transit\"");
    }

    #[test]
    fn test_pickup_date_parses_fixture_format() {
        let load = sample_load();
        assert_eq!(
            load.pickup_date(),
            Some(NaiveDate::from_ymd_opt(2025, 12, 17).unwrap())
        );

        let mut bad = sample_load();
        bad.pickup.date = "not a date".to_string();
        assert_eq!(bad.pickup_date(), None);
    }

    #[test]
    fn test_display_helpers() {
        let load = sample_load();
        assert_eq!(load.lane(), "Columbus, OH -> Pittsburgh, PA");
        assert_eq!(load.formatted_weight(), "7.3k lbs");
        assert!(!load.requires("Hazmat"));
        assert!(load.requires("Driver Assist Unload"));
    }
}
