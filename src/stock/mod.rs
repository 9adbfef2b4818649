//! Stock and workshop rules module.
//!
//! The business core of the application: derivation rules over vehicle and
//! job-card records, status lifecycles, dashboard aggregation, and the
//! queries that reflect them into the store.

pub mod aggregates;
pub mod calculators;
pub mod export;
pub mod lifecycle;
pub mod models;
pub mod queries;
pub mod requests;
pub mod services;

// Re-export commonly used items
pub use calculators::{cap_check, days_in_stock, mot_urgency, CapCheck, MotUrgency};
pub use models::{JobCard, JobCardStatus, Vehicle, VehicleStatus};
