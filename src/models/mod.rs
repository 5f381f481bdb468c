//! Data models for the load board
//!
//! This module contains the core domain models organized by concern:
//! - Load: the freight load record and its pickup/delivery stops
//! - Filters: the multi-field search form applied against the board

pub mod filters;
pub mod load;

// Re-export all public types for convenient access
pub use filters::SearchFilters;
pub use load::{DeliveryStop, EquipmentType, Load, LoadStatus, PickupStop};
