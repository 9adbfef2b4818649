//! Stock operations with database access.
//!
//! These functions sequence the multi-step record updates: vehicle creation
//! and edits, status changes, and the job-card cascades that keep a
//! vehicle's cumulative repairs and profit in step with its job cards.
//!
//! The cascades are two sequential writes, not a transaction - the store
//! contract offers no cross-table guarantee. A failed second half is logged
//! as a reconciliation warning before the error is surfaced.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

use super::calculators::{job_card_total, vehicle_profit};
use super::lifecycle::{
    self, apply_job_card_created, apply_job_card_deleted, initial_vehicle_status,
};
use super::models::{JobCard, Vehicle, VehicleStatus};
use super::queries;
use super::requests::{JobCardForm, VehicleForm};

/// Create a vehicle record from form input.
///
/// Status is forced to In Stock regardless of what the caller submitted,
/// and profit is derived from the submitted prices (repairs start at zero).
pub async fn create_vehicle(pool: &PgPool, form: &VehicleForm) -> Result<Vehicle> {
    let fields = form.fields();
    let profit = vehicle_profit(
        fields.purchase_price,
        rust_decimal::Decimal::ZERO,
        fields.sale_price,
    );

    let vehicle = queries::insert_vehicle(
        pool,
        &fields.make,
        &fields.model,
        &fields.reg,
        fields.mileage,
        fields.purchase_price,
        fields.sale_price,
        profit,
        fields.cap_clean_price,
        fields.cap_live_price,
        fields.mot,
        fields.transmission.as_str(),
        fields.grade,
        fields.v5c_status.as_str(),
        fields.keys_count,
        initial_vehicle_status().as_str(),
    )
    .await?;

    tracing::info!("Vehicle added: {} {} ({})", vehicle.make, vehicle.model, vehicle.reg);
    Ok(vehicle)
}

/// Apply an edit to a vehicle record, recomputing profit from the new
/// prices and the existing repairs total.
pub async fn edit_vehicle(pool: &PgPool, id: Uuid, form: &VehicleForm) -> Result<()> {
    let current = queries::get_vehicle(pool, id).await?;
    let fields = form.fields();
    let profit = vehicle_profit(fields.purchase_price, current.repairs, fields.sale_price);

    queries::update_vehicle(
        pool,
        id,
        &fields.make,
        &fields.model,
        &fields.reg,
        fields.mileage,
        fields.purchase_price,
        fields.sale_price,
        profit,
        fields.cap_clean_price,
        fields.cap_live_price,
        fields.mot,
        fields.transmission.as_str(),
        fields.grade,
        fields.v5c_status.as_str(),
        fields.keys_count,
    )
    .await
}

/// Move a vehicle to the given status, stamping or clearing the sold date.
pub async fn set_vehicle_status(
    pool: &PgPool,
    id: Uuid,
    target: VehicleStatus,
) -> Result<()> {
    let change = lifecycle::transition_vehicle(target, Utc::now().date_naive());
    queries::update_vehicle_status(pool, id, change.status.as_str(), change.sold_date).await
}

/// The list-screen toggle: Sold flips back to In Stock, anything else
/// becomes Sold.
pub async fn toggle_vehicle_status(pool: &PgPool, id: Uuid) -> Result<()> {
    let vehicle = queries::get_vehicle(pool, id).await?;
    let change = lifecycle::toggle_vehicle(vehicle.status, Utc::now().date_naive());
    queries::update_vehicle_status(pool, id, change.status.as_str(), change.sold_date).await
}

/// Delete a vehicle record. Its job cards are left in place.
pub async fn remove_vehicle(pool: &PgPool, id: Uuid) -> Result<()> {
    queries::delete_vehicle(pool, id).await
}

/// Create a job card and cascade its total into the owning vehicle's
/// repairs and profit.
pub async fn create_job_card(pool: &PgPool, form: &JobCardForm) -> Result<JobCard> {
    let fields = form.fields()?;
    let total = job_card_total(fields.labour_cost, fields.parts_cost);

    let card = queries::insert_job_card(
        pool,
        fields.vehicle_id,
        &fields.description,
        fields.labour_cost,
        fields.parts_cost,
        total,
        fields.status.as_str(),
    )
    .await?;

    // Second half of the cascade: bring the vehicle's running totals up.
    let cascade = async {
        let vehicle = queries::get_vehicle(pool, fields.vehicle_id).await?;
        let update = apply_job_card_created(
            vehicle.purchase_price,
            vehicle.repairs,
            vehicle.sale_price,
            total,
        );
        queries::update_vehicle_repairs(pool, vehicle.id, update.repairs, update.profit).await
    };

    if let Err(e) = cascade.await {
        tracing::warn!(
            "Reconciliation needed: job card {} saved but vehicle {} repairs not updated: {}",
            card.id,
            fields.vehicle_id,
            e
        );
        return Err(e);
    }

    Ok(card)
}

/// Cascade for deleting a job card: `None` when the owning vehicle is gone
/// (an orphaned card has no running totals to back out of).
fn deletion_cascade(
    vehicle: Option<&Vehicle>,
    job_total: rust_decimal::Decimal,
) -> Option<lifecycle::RepairsUpdate> {
    vehicle.map(|v| {
        apply_job_card_deleted(v.purchase_price, v.repairs, v.sale_price, job_total)
    })
}

/// Delete a job card, first backing its total out of the owning vehicle's
/// repairs (floored at zero) and profit. A card whose vehicle has already
/// been deleted is removed without a cascade.
pub async fn remove_job_card(pool: &PgPool, id: Uuid) -> Result<()> {
    let card = queries::get_job_card(pool, id).await?;

    let vehicle = match queries::get_vehicle(pool, card.vehicle_id).await {
        Ok(vehicle) => Some(vehicle),
        Err(crate::error::AppError::NotFound) => None,
        Err(e) => return Err(e),
    };

    if let Some(update) = deletion_cascade(vehicle.as_ref(), card.total_cost) {
        queries::update_vehicle_repairs(pool, card.vehicle_id, update.repairs, update.profit)
            .await?;

        if let Err(e) = queries::delete_job_card(pool, id).await {
            tracing::warn!(
                "Reconciliation needed: vehicle {} repairs rolled back but job card {} not deleted: {}",
                card.vehicle_id,
                id,
                e
            );
            return Err(e);
        }
        return Ok(());
    }

    tracing::info!(
        "Deleting orphaned job card {} (vehicle {} no longer exists)",
        id,
        card.vehicle_id
    );
    queries::delete_job_card(pool, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    use crate::stock::models::{Transmission, V5cStatus};

    fn vehicle(purchase: rust_decimal::Decimal, repairs: rust_decimal::Decimal, sale: rust_decimal::Decimal) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            make: "Ford".to_string(),
            model: "Focus".to_string(),
            reg: "AB12 CDE".to_string(),
            mileage: 42_000,
            purchase_price: purchase,
            sale_price: sale,
            repairs,
            profit: vehicle_profit(purchase, repairs, sale),
            cap_clean_price: dec!(6000),
            cap_live_price: dec!(5800),
            mot: None,
            transmission: Transmission::Manual,
            grade: 3,
            v5c_status: V5cStatus::Present,
            keys_count: 2,
            status: VehicleStatus::InStock,
            sold_date: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_deletion_cascade_backs_out_of_owning_vehicle() {
        let v = vehicle(dec!(5000), dec!(150), dec!(6500));
        let update = deletion_cascade(Some(&v), dec!(150)).unwrap();
        assert_eq!(update.repairs, dec!(0));
        assert_eq!(update.profit, dec!(1500));
    }

    #[test]
    fn test_deletion_cascade_skipped_for_orphaned_card() {
        // The vehicle is gone: nothing to update, the card is just removed
        assert_eq!(deletion_cascade(None, dec!(150)), None);
    }
}
