//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `deterministic` - Fixed-return projection and rate conversion
//! - `monte_carlo` - Ensemble shape, seeding, cancellation
//! - `rebalancing` - Rebalance schedule in both runners
//! - `statistics` - Aggregated statistics over real runs

mod deterministic;
