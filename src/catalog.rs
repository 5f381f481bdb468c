//! Embedded load boards and lookup by id
//!
//! Two fixture boards ship with the service: the general board and the
//! Madison regional board. Both are parsed once from embedded JSON; anything
//! with an id that matches neither board lives on the external backend and is
//! only reachable through the recommendation service client.

use std::sync::LazyLock;

use crate::models::Load;

static MOCK_LOADS: LazyLock<Vec<Load>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("data/mock_loads.json"))
        .expect("embedded general board fixtures are valid")
});

static MADISON_LOADS: LazyLock<Vec<Load>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("data/madison_loads.json"))
        .expect("embedded Madison board fixtures are valid")
});

/// Where a load id resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// General board fixture (all-digit ids)
    Mock,
    /// Madison regional board fixture (`mad-` prefixed ids)
    Madison,
    /// Only known to the external backend
    Backend,
}

/// Classify a load id by its shape.
///
/// `mad-` prefixed ids belong to the Madison board, all-digit ids to the
/// general board; everything else is assumed to come from the backend.
#[must_use]
pub fn identify_source(id: &str) -> LoadSource {
    if id.starts_with("mad-") {
        LoadSource::Madison
    } else if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        LoadSource::Mock
    } else {
        LoadSource::Backend
    }
}

/// The general board
#[must_use]
pub fn mock_loads() -> &'static [Load] {
    &MOCK_LOADS
}

/// The Madison regional board
#[must_use]
pub fn madison_loads() -> &'static [Load] {
    &MADISON_LOADS
}

/// All locally known loads, general board first
#[must_use]
pub fn all_local_loads() -> Vec<Load> {
    let mut loads = MOCK_LOADS.clone();
    loads.extend(MADISON_LOADS.iter().cloned());
    loads
}

/// Find a load on the local boards. Returns `None` for backend-only ids.
#[must_use]
pub fn find_by_id(id: &str) -> Option<Load> {
    match identify_source(id) {
        LoadSource::Madison => MADISON_LOADS.iter().find(|l| l.id == id).cloned(),
        LoadSource::Mock => MOCK_LOADS.iter().find(|l| l.id == id).cloned(),
        LoadSource::Backend => None,
    }
}

/// The "near you" window of the home feed
#[must_use]
pub fn near_you() -> Vec<Load> {
    MOCK_LOADS
        .iter()
        .skip(2)
        .take(4)
        .cloned()
        .collect()
}

/// State-to-state lane section of the home feed, e.g. CA -> TX
#[must_use]
pub fn lane_section(origin_state: &str, delivery_state: &str, limit: usize) -> Vec<Load> {
    MOCK_LOADS
        .iter()
        .filter(|l| {
            l.pickup.state.eq_ignore_ascii_case(origin_state)
                && l.delivery.state.eq_ignore_ascii_case(delivery_state)
        })
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boards_parse_and_have_expected_sizes() {
        assert_eq!(mock_loads().len(), 26);
        assert_eq!(madison_loads().len(), 20);
        assert_eq!(all_local_loads().len(), 46);
    }

    #[test]
    fn test_identify_source_by_id_shape() {
        assert_eq!(identify_source("mad-7"), LoadSource::Madison);
        assert_eq!(identify_source("12"), LoadSource::Mock);
        assert_eq!(identify_source("ld-4821"), LoadSource::Backend);
        assert_eq!(identify_source("12a"), LoadSource::Backend);
        assert_eq!(identify_source(""), LoadSource::Backend);
    }

    #[test]
    fn test_find_by_id_hits_the_right_board() {
        let mock = find_by_id("1").expect("general board has load 1");
        assert_eq!(mock.pickup.city, "Columbus");

        let madison = find_by_id("mad-1").expect("Madison board has mad-1");
        assert_eq!(madison.pickup.city, "Madison");

        assert!(find_by_id("999").is_none());
        assert!(find_by_id("backend-abc").is_none());
    }

    #[test]
    fn test_near_you_window() {
        let near = near_you();
        assert_eq!(near.len(), 4);
        assert_eq!(near[0].id, mock_loads()[2].id);
    }

    #[test]
    fn test_lane_section_filters_both_ends() {
        let ca_tx = lane_section("CA", "TX", 4);
        assert!(ca_tx.len() <= 4);
        for load in &ca_tx {
            assert_eq!(load.pickup.state, "CA");
            assert_eq!(load.delivery.state, "TX");
        }

        assert!(lane_section("ZZ", "XX", 4).is_empty());
    }
}
