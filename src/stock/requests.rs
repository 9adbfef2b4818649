//! Form DTOs for the record-entry screens.
//!
//! All numeric fields arrive as free text and are coerced leniently:
//! blank or non-numeric input becomes zero. Only the job-card vehicle
//! selection is actually required.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::calculators::{lenient_int, lenient_money};
use super::models::{JobCardStatus, Transmission, V5cStatus};

/// Coerce a count field to a non-negative i32. Out-of-range or negative
/// input becomes zero rather than wrapping.
fn lenient_nonneg_i32(input: &str) -> i32 {
    i32::try_from(lenient_int(input)).unwrap_or(0).max(0)
}

/// Coerce a count field to a non-negative i16, same rules.
fn lenient_nonneg_i16(input: &str) -> i16 {
    i16::try_from(lenient_int(input)).unwrap_or(0).max(0)
}

/// Raw vehicle add/edit form
#[derive(Debug, Deserialize)]
pub struct VehicleForm {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub reg: String,
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub purchase_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub cap_clean_price: String,
    #[serde(default)]
    pub cap_live_price: String,
    #[serde(default)]
    pub mot: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub v5c_status: String,
    #[serde(default)]
    pub keys_count: String,
}

/// Coerced vehicle field set ready for persistence
#[derive(Debug, Clone)]
pub struct VehicleFields {
    pub make: String,
    pub model: String,
    pub reg: String,
    pub mileage: i32,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    pub cap_clean_price: Decimal,
    pub cap_live_price: Decimal,
    pub mot: Option<NaiveDate>,
    pub transmission: Transmission,
    pub grade: i16,
    pub v5c_status: V5cStatus,
    pub keys_count: i16,
}

impl VehicleForm {
    pub fn fields(&self) -> VehicleFields {
        VehicleFields {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            reg: self.reg.trim().to_string(),
            mileage: lenient_nonneg_i32(&self.mileage),
            purchase_price: lenient_money(&self.purchase_price),
            sale_price: lenient_money(&self.sale_price),
            cap_clean_price: lenient_money(&self.cap_clean_price),
            cap_live_price: lenient_money(&self.cap_live_price),
            mot: parse_optional_date(&self.mot),
            transmission: Transmission::from(self.transmission.clone()),
            grade: lenient_nonneg_i16(&self.grade),
            v5c_status: V5cStatus::from(self.v5c_status.clone()),
            keys_count: lenient_nonneg_i16(&self.keys_count),
        }
    }
}

/// Raw job-card create form
#[derive(Debug, Deserialize)]
pub struct JobCardForm {
    #[serde(default)]
    pub vehicle_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labour_cost: String,
    #[serde(default)]
    pub parts_cost: String,
    #[serde(default)]
    pub status: String,
}

/// Coerced job-card field set ready for persistence
#[derive(Debug, Clone)]
pub struct JobCardFields {
    pub vehicle_id: Uuid,
    pub description: String,
    pub labour_cost: Decimal,
    pub parts_cost: Decimal,
    pub status: JobCardStatus,
}

impl JobCardForm {
    /// Coerce the form; the vehicle selection is the one required field.
    pub fn fields(&self) -> Result<JobCardFields> {
        let vehicle_id = self
            .vehicle_id
            .trim()
            .parse::<Uuid>()
            .map_err(|_| AppError::Internal("Please select a vehicle".to_string()))?;

        Ok(JobCardFields {
            vehicle_id,
            description: self.description.trim().to_string(),
            labour_cost: lenient_money(&self.labour_cost),
            parts_cost: lenient_money(&self.parts_cost),
            status: JobCardStatus::from(self.status.clone()),
        })
    }
}

/// Parse an ISO date form field; blank or malformed input is treated as
/// "not set".
fn parse_optional_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn vehicle_form() -> VehicleForm {
        VehicleForm {
            make: " Ford ".to_string(),
            model: "Focus".to_string(),
            reg: "AB12 CDE".to_string(),
            mileage: "42000".to_string(),
            purchase_price: "5000".to_string(),
            sale_price: "6500.50".to_string(),
            cap_clean_price: "".to_string(),
            cap_live_price: "not a number".to_string(),
            mot: "2026-03-15".to_string(),
            transmission: "Automatic".to_string(),
            grade: "3".to_string(),
            v5c_status: "Applied For".to_string(),
            keys_count: "2".to_string(),
        }
    }

    #[test]
    fn test_vehicle_form_coercion() {
        let fields = vehicle_form().fields();
        assert_eq!(fields.make, "Ford");
        assert_eq!(fields.mileage, 42000);
        assert_eq!(fields.purchase_price, dec!(5000));
        assert_eq!(fields.sale_price, dec!(6500.50));
        assert_eq!(fields.transmission, Transmission::Automatic);
        assert_eq!(fields.v5c_status, V5cStatus::AppliedFor);
        assert_eq!(
            fields.mot,
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
        );
    }

    #[test]
    fn test_vehicle_form_bad_numbers_default_to_zero() {
        let fields = vehicle_form().fields();
        assert_eq!(fields.cap_clean_price, Decimal::ZERO);
        assert_eq!(fields.cap_live_price, Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_counts_become_zero_not_wrapped() {
        let mut form = vehicle_form();
        form.mileage = "3000000000".to_string();
        form.grade = "40000".to_string();
        form.keys_count = "-2".to_string();

        let fields = form.fields();
        assert_eq!(fields.mileage, 0);
        assert_eq!(fields.grade, 0);
        assert_eq!(fields.keys_count, 0);
    }

    #[test]
    fn test_blank_mot_is_none() {
        let mut form = vehicle_form();
        form.mot = "  ".to_string();
        assert_eq!(form.fields().mot, None);

        form.mot = "15/03/2026".to_string();
        assert_eq!(form.fields().mot, None);
    }

    #[test]
    fn test_job_card_form_requires_vehicle() {
        let form = JobCardForm {
            vehicle_id: "".to_string(),
            description: "Brakes".to_string(),
            labour_cost: "120".to_string(),
            parts_cost: "30".to_string(),
            status: "Pending".to_string(),
        };
        assert!(form.fields().is_err());
    }

    #[test]
    fn test_job_card_form_coercion() {
        let id = Uuid::new_v4();
        let form = JobCardForm {
            vehicle_id: id.to_string(),
            description: " Brakes ".to_string(),
            labour_cost: "120".to_string(),
            parts_cost: "".to_string(),
            status: "In Progress".to_string(),
        };
        let fields = form.fields().unwrap();
        assert_eq!(fields.vehicle_id, id);
        assert_eq!(fields.description, "Brakes");
        assert_eq!(fields.labour_cost, dec!(120));
        assert_eq!(fields.parts_cost, Decimal::ZERO);
        assert_eq!(fields.status, JobCardStatus::InProgress);
    }
}
