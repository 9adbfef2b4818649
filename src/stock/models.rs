//! Database models for stock and workshop records.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle sale status.
///
/// Unrecognised stored values fall back to `InStock`, matching the lenient
/// handling of free-text status columns elsewhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VehicleStatus {
    InStock,
    Sold,
    NotToSell,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::InStock => "In Stock",
            VehicleStatus::Sold => "Sold",
            VehicleStatus::NotToSell => "Not To Sell",
        }
    }
}

impl From<String> for VehicleStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Sold" => VehicleStatus::Sold,
            "Not To Sell" => VehicleStatus::NotToSell,
            _ => VehicleStatus::InStock,
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gearbox type recorded against a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transmission {
    Manual,
    Automatic,
    SemiAutomatic,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
            Transmission::SemiAutomatic => "Semi-Automatic",
        }
    }
}

impl From<String> for Transmission {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Automatic" => Transmission::Automatic,
            "Semi-Automatic" => Transmission::SemiAutomatic,
            _ => Transmission::Manual,
        }
    }
}

impl std::fmt::Display for Transmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the V5C registration document is physically held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum V5cStatus {
    Present,
    AppliedFor,
    NotPresent,
}

impl V5cStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            V5cStatus::Present => "Present",
            V5cStatus::AppliedFor => "Applied For",
            V5cStatus::NotPresent => "Not Present",
        }
    }
}

impl From<String> for V5cStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Applied For" => V5cStatus::AppliedFor,
            "Not Present" => V5cStatus::NotPresent,
            _ => V5cStatus::Present,
        }
    }
}

impl std::fmt::Display for V5cStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workshop job card status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobCardStatus {
    Pending,
    InProgress,
    Completed,
}

impl JobCardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCardStatus::Pending => "Pending",
            JobCardStatus::InProgress => "In Progress",
            JobCardStatus::Completed => "Completed",
        }
    }
}

impl From<String> for JobCardStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "In Progress" => JobCardStatus::InProgress,
            "Completed" => JobCardStatus::Completed,
            _ => JobCardStatus::Pending,
        }
    }
}

impl std::fmt::Display for JobCardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle from the vehicles table
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub reg: String,
    pub mileage: i32,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    pub repairs: Decimal,
    pub profit: Decimal,
    pub cap_clean_price: Decimal,
    pub cap_live_price: Decimal,
    pub mot: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub transmission: Transmission,
    pub grade: i16,
    #[sqlx(try_from = "String")]
    pub v5c_status: V5cStatus,
    pub keys_count: i16,
    #[sqlx(try_from = "String")]
    pub status: VehicleStatus,
    pub sold_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Job card from the job_cards table
#[derive(Debug, Clone, FromRow)]
pub struct JobCard {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub labour_cost: Decimal,
    pub parts_cost: Decimal,
    pub total_cost: Decimal,
    #[sqlx(try_from = "String")]
    pub status: JobCardStatus,
    pub created_at: DateTime<Utc>,
}

/// Job card joined with its owning vehicle's identity fields (for listings)
#[derive(Debug, Clone, FromRow)]
pub struct JobCardWithVehicle {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub labour_cost: Decimal,
    pub parts_cost: Decimal,
    pub total_cost: Decimal,
    #[sqlx(try_from = "String")]
    pub status: JobCardStatus,
    pub created_at: DateTime<Utc>,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_reg: String,
}

/// Minimal vehicle identity for dropdowns
#[derive(Debug, Clone, FromRow)]
pub struct VehicleRef {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub reg: String,
}
