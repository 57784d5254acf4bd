//! route-balancer
//!
//! Splits scattered visit points into a fixed set of routes and rebalances
//! them until every route carries roughly the same work time.

pub mod error;
pub mod geo;
pub mod kmeans;
pub mod route;
pub mod partition;
pub mod units;
pub mod traits;
pub mod work_time;
pub mod balance;
pub mod rebalance;
pub mod solver;
pub mod google;
pub mod haversine;
pub mod ingest;
pub mod config;

pub use error::{Error, Result};
