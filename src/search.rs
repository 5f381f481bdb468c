//! Board search: one linear scan, AND of independent predicates
//!
//! Every predicate is optional; a filter field that is empty (or that does
//! not parse) leaves its predicate switched off, so an all-default
//! `SearchFilters` returns the whole board.

use crate::models::{Load, SearchFilters};
use crate::profile::availability::Availability;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Whether a single load passes every active predicate
#[must_use]
pub fn matches_filters(load: &Load, filters: &SearchFilters) -> bool {
    // Origin: substring match on pickup city, state or address
    if !filters.origin.is_empty() {
        let term = filters.origin.to_lowercase();
        let city = contains_ignore_case(&load.pickup.city, &term);
        let state = contains_ignore_case(&load.pickup.state, &term);
        let address = load
            .pickup
            .address
            .as_deref()
            .is_some_and(|a| contains_ignore_case(a, &term));
        if !(city || state || address) {
            return false;
        }
    }

    // Delivery: substring match on delivery city or state
    if !filters.delivery.is_empty() {
        let term = filters.delivery.to_lowercase();
        let city = contains_ignore_case(&load.delivery.city, &term);
        let state = contains_ignore_case(&load.delivery.state, &term);
        if !(city || state) {
            return false;
        }
    }

    // Pickup date window; loads with malformed dates pass through
    if let Some(load_date) = load.pickup_date() {
        if let Some(from) = filters.pickup_date_from_value() {
            if load_date < from {
                return false;
            }
        }
        if let Some(to) = filters.pickup_date_to_value() {
            if load_date > to {
                return false;
            }
        }
    }

    if let Some(min_rpm) = filters.min_rpm_value() {
        if load.loaded_rpm < min_rpm {
            return false;
        }
    }

    if let Some(min_distance) = filters.min_trip_distance_value() {
        if load.distance < min_distance {
            return false;
        }
    }
    if let Some(max_distance) = filters.max_trip_distance_value() {
        if load.distance > max_distance {
            return false;
        }
    }

    if let Some(max_weight) = filters.max_weight_value() {
        if load.weight > max_weight {
            return false;
        }
    }

    // Deadhead: empty miles to reach the pickup
    if let Some(max_deadhead) = filters.max_deadhead_value() {
        if load.pickup.empty_miles > max_deadhead {
            return false;
        }
    }

    if let Some(equipment) = filters.equipment_type {
        if load.equipment_type != Some(equipment) {
            return false;
        }
    }

    // A load requiring any excluded service is dropped
    if !filters.excluded_services.is_empty()
        && filters.excluded_services.iter().any(|s| load.requires(s))
    {
        return false;
    }

    true
}

/// Filter a board down to the loads matching every active predicate
#[must_use]
pub fn filter_loads(loads: &[Load], filters: &SearchFilters) -> Vec<Load> {
    loads
        .iter()
        .filter(|l| matches_filters(l, filters))
        .cloned()
        .collect()
}

/// Whether a load's pickup works for the driver's next available location.
///
/// Pickups in the availability state count as nearby; the city only narrows
/// the display, not the match.
#[must_use]
pub fn matches_availability(load: &Load, availability: &Availability) -> bool {
    load.pickup.state == availability.state
}

/// Feed section of loads compatible with the stored availability
#[must_use]
pub fn availability_section(
    loads: &[Load],
    availability: &Availability,
    limit: usize,
) -> Vec<Load> {
    loads
        .iter()
        .filter(|l| matches_availability(l, availability))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::EquipmentType;
    use rstest::rstest;

    fn filters() -> SearchFilters {
        SearchFilters::default()
    }

    #[test]
    fn test_default_filters_match_everything() {
        let board = catalog::all_local_loads();
        let results = filter_loads(&board, &filters());
        assert_eq!(results.len(), board.len());
    }

    #[rstest]
    #[case("columbus", true)]
    #[case("Columbus", true)]
    #[case("OH", true)]
    #[case("900 Main", true)]
    #[case("Pittsburgh", false)]
    fn test_origin_matches_city_state_or_address(#[case] origin: &str, #[case] expected: bool) {
        let load = crate::models::load::tests::sample_load();
        let mut f = filters();
        f.origin = origin.to_string();
        assert_eq!(matches_filters(&load, &f), expected);
    }

    #[rstest]
    #[case("pittsburgh", true)]
    #[case("PA", true)]
    #[case("Warehouse", false)] // delivery address is not searched
    #[case("Columbus", false)]
    fn test_delivery_matches_city_or_state(#[case] delivery: &str, #[case] expected: bool) {
        let load = crate::models::load::tests::sample_load();
        let mut f = filters();
        f.delivery = delivery.to_string();
        assert_eq!(matches_filters(&load, &f), expected);
    }

    #[test]
    fn test_date_window_is_inclusive() {
        // Sample load picks up Dec 17 2025
        let load = crate::models::load::tests::sample_load();
        let mut f = filters();

        f.pickup_date_from = "2025-12-17".to_string();
        f.pickup_date_to = "2025-12-17".to_string();
        assert!(matches_filters(&load, &f));

        f.pickup_date_from = "2025-12-18".to_string();
        assert!(!matches_filters(&load, &f));

        f.pickup_date_from = String::new();
        f.pickup_date_to = "2025-12-16".to_string();
        assert!(!matches_filters(&load, &f));
    }

    #[test]
    fn test_malformed_load_date_passes_the_window() {
        let mut load = crate::models::load::tests::sample_load();
        load.pickup.date = "TBD".to_string();

        let mut f = filters();
        f.pickup_date_from = "2025-12-18".to_string();
        assert!(matches_filters(&load, &f));
    }

    #[rstest]
    #[case("2.0", true)]
    #[case("2.11", true)]
    #[case("2.5", false)]
    #[case("not a rate", true)] // unparseable threshold is switched off
    fn test_min_rpm(#[case] min_rpm: &str, #[case] expected: bool) {
        let load = crate::models::load::tests::sample_load();
        let mut f = filters();
        f.min_rpm = min_rpm.to_string();
        assert_eq!(matches_filters(&load, &f), expected);
    }

    #[test]
    fn test_distance_weight_and_deadhead_thresholds() {
        // Sample load: distance 1824.2, weight 7328, pickup empty miles 191
        let load = crate::models::load::tests::sample_load();

        let mut f = filters();
        f.min_trip_distance = "2000".to_string();
        assert!(!matches_filters(&load, &f));

        let mut f = filters();
        f.max_trip_distance = "1500".to_string();
        assert!(!matches_filters(&load, &f));

        let mut f = filters();
        f.max_weight = "5000".to_string();
        assert!(!matches_filters(&load, &f));

        let mut f = filters();
        f.max_deadhead = "100".to_string();
        assert!(!matches_filters(&load, &f));

        let mut f = filters();
        f.min_trip_distance = "1000".to_string();
        f.max_trip_distance = "2000".to_string();
        f.max_weight = "10000".to_string();
        f.max_deadhead = "200".to_string();
        assert!(matches_filters(&load, &f));
    }

    #[test]
    fn test_equipment_type_is_exact() {
        let load = crate::models::load::tests::sample_load();

        let mut f = filters();
        f.equipment_type = Some(EquipmentType::Van);
        assert!(matches_filters(&load, &f));

        f.equipment_type = Some(EquipmentType::Reefer);
        assert!(!matches_filters(&load, &f));

        // A load without equipment never matches an equipment filter
        let mut bare = crate::models::load::tests::sample_load();
        bare.equipment_type = None;
        f.equipment_type = Some(EquipmentType::Van);
        assert!(!matches_filters(&bare, &f));
    }

    #[test]
    fn test_excluded_services_drop_matching_loads() {
        // Sample load requires "Customer Live Load" and "Driver Assist Unload"
        let load = crate::models::load::tests::sample_load();

        let mut f = filters();
        f.excluded_services = vec!["Hazmat".to_string()];
        assert!(matches_filters(&load, &f));

        f.excluded_services.push("Driver Assist Unload".to_string());
        assert!(!matches_filters(&load, &f));
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let board = catalog::all_local_loads();

        let mut f = filters();
        f.origin = "Madison".to_string();
        f.equipment_type = Some(EquipmentType::Reefer);
        let results = filter_loads(&board, &f);

        assert!(!results.is_empty());
        for load in &results {
            assert!(load.pickup.city.to_lowercase().contains("madison"));
            assert_eq!(load.equipment_type, Some(EquipmentType::Reefer));
        }
    }

    #[test]
    fn test_availability_matching() {
        let availability = Availability {
            date: "2025-12-17".to_string(),
            time: "08:00".to_string(),
            city: "Columbus".to_string(),
            state: "OH".to_string(),
        };

        let load = crate::models::load::tests::sample_load();
        assert!(matches_availability(&load, &availability));

        // Same state, different city still counts as nearby
        let mut nearby = crate::models::load::tests::sample_load();
        nearby.pickup.city = "Cleveland".to_string();
        assert!(matches_availability(&nearby, &availability));

        let mut far = crate::models::load::tests::sample_load();
        far.pickup.state = "TX".to_string();
        assert!(!matches_availability(&far, &availability));
    }

    #[test]
    fn test_availability_section_caps_results() {
        let availability = Availability {
            date: "2025-12-18".to_string(),
            time: "08:00".to_string(),
            city: "Madison".to_string(),
            state: "WI".to_string(),
        };

        let board = catalog::all_local_loads();
        let section = availability_section(&board, &availability, 4);
        assert!(section.len() <= 4);
        for load in &section {
            assert_eq!(load.pickup.state, "WI");
        }
    }
}
