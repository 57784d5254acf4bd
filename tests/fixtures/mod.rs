//! Test fixtures for route-balancer.
//!
//! Provides real Hong Kong locations grouped by district, plus the depot.

pub mod hong_kong_locations;

pub use hong_kong_locations::*;
