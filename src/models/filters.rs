//! Multi-field search filters applied against the load board

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::load::EquipmentType;

/// Filter form date format (`<input type="date">`), e.g. `"2025-12-17"`
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_radius() -> u32 {
    50
}

/// One search over the board. Numeric thresholds arrive as free-form strings
/// from the search form; an empty or unparseable value leaves that predicate
/// switched off. Serialized filters are stored verbatim in saved searches and
/// search history, so the wire names match the original form fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Origin text, matched against pickup city/state/address
    pub origin: String,
    /// Origin radius in miles. Collected and persisted with the search but
    /// not applied as a predicate; fixture loads carry no usable coordinates.
    pub radius: u32,
    pub pickup_date_from: String,
    pub pickup_date_to: String,
    /// Delivery text, matched against delivery city/state
    pub delivery: String,
    #[serde(rename = "minRPM")]
    pub min_rpm: String,
    pub min_trip_distance: String,
    pub max_trip_distance: String,
    pub max_weight: String,
    pub max_deadhead: String,
    pub equipment_type: Option<EquipmentType>,
    /// Service requirements the driver wants to avoid; any overlap with a
    /// load's requirements drops the load
    pub excluded_services: Vec<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            origin: String::new(),
            radius: default_radius(),
            pickup_date_from: String::new(),
            pickup_date_to: String::new(),
            delivery: String::new(),
            min_rpm: String::new(),
            min_trip_distance: String::new(),
            max_trip_distance: String::new(),
            max_weight: String::new(),
            max_deadhead: String::new(),
            equipment_type: None,
            excluded_services: Vec::new(),
        }
    }
}

fn parse_threshold(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn parse_filter_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), FILTER_DATE_FORMAT).ok()
}

impl SearchFilters {
    /// Minimum loaded rate per mile, when set and numeric
    #[must_use]
    pub fn min_rpm_value(&self) -> Option<f64> {
        parse_threshold(&self.min_rpm)
    }

    /// Minimum trip distance in miles
    #[must_use]
    pub fn min_trip_distance_value(&self) -> Option<f64> {
        parse_threshold(&self.min_trip_distance)
    }

    /// Maximum trip distance in miles
    #[must_use]
    pub fn max_trip_distance_value(&self) -> Option<f64> {
        parse_threshold(&self.max_trip_distance)
    }

    /// Maximum cargo weight in pounds
    #[must_use]
    pub fn max_weight_value(&self) -> Option<f64> {
        parse_threshold(&self.max_weight)
    }

    /// Maximum deadhead miles to the pickup
    #[must_use]
    pub fn max_deadhead_value(&self) -> Option<f64> {
        parse_threshold(&self.max_deadhead)
    }

    /// Start of the pickup date window, when set and well-formed
    #[must_use]
    pub fn pickup_date_from_value(&self) -> Option<NaiveDate> {
        parse_filter_date(&self.pickup_date_from)
    }

    /// End of the pickup date window, when set and well-formed
    #[must_use]
    pub fn pickup_date_to_value(&self) -> Option<NaiveDate> {
        parse_filter_date(&self.pickup_date_to)
    }

    /// Display name derived from the most specific criteria, used when a
    /// search is saved without an explicit name.
    #[must_use]
    pub fn display_name(&self) -> String {
        let city = |s: &str| s.split(',').next().unwrap_or(s).trim().to_string();

        if !self.origin.is_empty() && !self.delivery.is_empty() {
            format!("{} to {}", city(&self.origin), city(&self.delivery))
        } else if !self.origin.is_empty() {
            format!("From {}", city(&self.origin))
        } else if !self.delivery.is_empty() {
            format!("To {}", city(&self.delivery))
        } else if !self.min_rpm.is_empty() {
            format!("High Paying (${}+)", self.min_rpm)
        } else {
            "Saved Search".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius_is_fifty_miles() {
        let filters = SearchFilters::default();
        assert_eq!(filters.radius, 50);

        let parsed: SearchFilters = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, filters);
    }

    #[test]
    fn test_wire_names_match_the_search_form() {
        let filters = SearchFilters {
            origin: "Joliet, IL".to_string(),
            min_rpm: "2.5".to_string(),
            equipment_type: Some(EquipmentType::Van),
            ..SearchFilters::default()
        };
        let json = serde_json::to_value(&filters).unwrap();

        assert_eq!(json["minRPM"], "2.5");
        assert_eq!(json["equipmentType"], "Van");
        assert!(json.get("pickupDateFrom").is_some());
        assert!(json.get("excludedServices").is_some());
    }

    #[test]
    fn test_thresholds_ignore_blank_and_garbage() {
        let mut filters = SearchFilters::default();
        assert_eq!(filters.min_rpm_value(), None);

        filters.min_rpm = "  ".to_string();
        assert_eq!(filters.min_rpm_value(), None);

        filters.min_rpm = "2.5".to_string();
        assert_eq!(filters.min_rpm_value(), Some(2.5));

        filters.min_rpm = "cheap".to_string();
        assert_eq!(filters.min_rpm_value(), None);
    }

    #[test]
    fn test_date_window_parsing() {
        let mut filters = SearchFilters::default();
        filters.pickup_date_from = "2025-12-17".to_string();
        assert_eq!(
            filters.pickup_date_from_value(),
            Some(NaiveDate::from_ymd_opt(2025, 12, 17).unwrap())
        );

        filters.pickup_date_to = "Dec 17 2025".to_string();
        assert_eq!(filters.pickup_date_to_value(), None);
    }

    #[test]
    fn test_display_name_prefers_lane_over_rate() {
        let mut filters = SearchFilters {
            origin: "Joliet, IL".to_string(),
            delivery: "Tampa, FL".to_string(),
            min_rpm: "3".to_string(),
            ..SearchFilters::default()
        };
        assert_eq!(filters.display_name(), "Joliet to Tampa");

        filters.origin.clear();
        assert_eq!(filters.display_name(), "To Tampa");

        filters.delivery.clear();
        assert_eq!(filters.display_name(), "High Paying ($3+)");

        filters.min_rpm.clear();
        assert_eq!(filters.display_name(), "Saved Search");
    }
}
