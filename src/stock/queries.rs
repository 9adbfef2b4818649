//! Database queries for the stock and workshop tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::{JobCard, JobCardWithVehicle, Vehicle, VehicleRef};

const VEHICLE_COLUMNS: &str = r#"
    id, make, model, reg, mileage,
    purchase_price, sale_price, repairs, profit,
    cap_clean_price, cap_live_price,
    mot, transmission, grade, v5c_status, keys_count,
    status, sold_date, created_at
"#;

/// List vehicles, newest first, with optional filters: case-insensitive
/// substring match on make and exact match on status.
pub async fn list_vehicles(
    pool: &PgPool,
    make: Option<&str>,
    status: Option<&str>,
) -> Result<Vec<Vehicle>> {
    let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
        r#"
        SELECT {VEHICLE_COLUMNS}
        FROM vehicles
        WHERE ($1::text IS NULL OR make ILIKE '%' || $1 || '%')
          AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        "#
    ))
    .bind(make)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(vehicles)
}

/// Get a vehicle by id
pub async fn get_vehicle(pool: &PgPool, id: Uuid) -> Result<Vehicle> {
    sqlx::query_as::<_, Vehicle>(&format!(
        r#"
        SELECT {VEHICLE_COLUMNS}
        FROM vehicles
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Minimal vehicle identities for the job-card form dropdown
pub async fn list_vehicle_refs(pool: &PgPool) -> Result<Vec<VehicleRef>> {
    let refs = sqlx::query_as::<_, VehicleRef>(
        r#"
        SELECT id, make, model, reg
        FROM vehicles
        ORDER BY make, model
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(refs)
}

/// Insert a new vehicle record; id and created_at are store-assigned.
#[allow(clippy::too_many_arguments)]
pub async fn insert_vehicle(
    pool: &PgPool,
    make: &str,
    model: &str,
    reg: &str,
    mileage: i32,
    purchase_price: Decimal,
    sale_price: Decimal,
    profit: Decimal,
    cap_clean_price: Decimal,
    cap_live_price: Decimal,
    mot: Option<NaiveDate>,
    transmission: &str,
    grade: i16,
    v5c_status: &str,
    keys_count: i16,
    status: &str,
) -> Result<Vehicle> {
    let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
        r#"
        INSERT INTO vehicles (
            make, model, reg, mileage,
            purchase_price, sale_price, repairs, profit,
            cap_clean_price, cap_live_price,
            mot, transmission, grade, v5c_status, keys_count, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING {VEHICLE_COLUMNS}
        "#
    ))
    .bind(make)
    .bind(model)
    .bind(reg)
    .bind(mileage)
    .bind(purchase_price)
    .bind(sale_price)
    .bind(profit)
    .bind(cap_clean_price)
    .bind(cap_live_price)
    .bind(mot)
    .bind(transmission)
    .bind(grade)
    .bind(v5c_status)
    .bind(keys_count)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(vehicle)
}

/// Update the editable fields of a vehicle record. Status, sold date and the
/// repairs total are maintained by their own updates.
#[allow(clippy::too_many_arguments)]
pub async fn update_vehicle(
    pool: &PgPool,
    id: Uuid,
    make: &str,
    model: &str,
    reg: &str,
    mileage: i32,
    purchase_price: Decimal,
    sale_price: Decimal,
    profit: Decimal,
    cap_clean_price: Decimal,
    cap_live_price: Decimal,
    mot: Option<NaiveDate>,
    transmission: &str,
    grade: i16,
    v5c_status: &str,
    keys_count: i16,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE vehicles
        SET make = $2, model = $3, reg = $4, mileage = $5,
            purchase_price = $6, sale_price = $7, profit = $8,
            cap_clean_price = $9, cap_live_price = $10,
            mot = $11, transmission = $12, grade = $13,
            v5c_status = $14, keys_count = $15
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(make)
    .bind(model)
    .bind(reg)
    .bind(mileage)
    .bind(purchase_price)
    .bind(sale_price)
    .bind(profit)
    .bind(cap_clean_price)
    .bind(cap_live_price)
    .bind(mot)
    .bind(transmission)
    .bind(grade)
    .bind(v5c_status)
    .bind(keys_count)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Set a vehicle's status and sold date in one write
pub async fn update_vehicle_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
    sold_date: Option<NaiveDate>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE vehicles
        SET status = $2, sold_date = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(sold_date)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Set a vehicle's cumulative repairs total and recomputed profit
pub async fn update_vehicle_repairs(
    pool: &PgPool,
    id: Uuid,
    repairs: Decimal,
    profit: Decimal,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE vehicles
        SET repairs = $2, profit = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(repairs)
    .bind(profit)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Delete a vehicle record. Job cards are not cascaded.
pub async fn delete_vehicle(pool: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM vehicles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// List job cards, newest first, joined with the owning vehicle's identity.
/// Cards whose vehicle has been deleted still appear, with blank identity
/// fields, so they stay visible and deletable.
pub async fn list_job_cards(pool: &PgPool) -> Result<Vec<JobCardWithVehicle>> {
    let cards = sqlx::query_as::<_, JobCardWithVehicle>(
        r#"
        SELECT
            j.id, j.vehicle_id, j.description,
            j.labour_cost, j.parts_cost, j.total_cost,
            j.status, j.created_at,
            COALESCE(v.make, '') AS vehicle_make,
            COALESCE(v.model, '') AS vehicle_model,
            COALESCE(v.reg, '') AS vehicle_reg
        FROM job_cards j
        LEFT JOIN vehicles v ON v.id = j.vehicle_id
        ORDER BY j.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(cards)
}

/// Fetch the full job-card collection (for dashboard aggregation)
pub async fn list_job_cards_bare(pool: &PgPool) -> Result<Vec<JobCard>> {
    let cards = sqlx::query_as::<_, JobCard>(
        r#"
        SELECT id, vehicle_id, description, labour_cost, parts_cost,
               total_cost, status, created_at
        FROM job_cards
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(cards)
}

/// Get a job card by id
pub async fn get_job_card(pool: &PgPool, id: Uuid) -> Result<JobCard> {
    sqlx::query_as::<_, JobCard>(
        r#"
        SELECT id, vehicle_id, description, labour_cost, parts_cost,
               total_cost, status, created_at
        FROM job_cards
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Insert a new job card; id and created_at are store-assigned.
pub async fn insert_job_card(
    pool: &PgPool,
    vehicle_id: Uuid,
    description: &str,
    labour_cost: Decimal,
    parts_cost: Decimal,
    total_cost: Decimal,
    status: &str,
) -> Result<JobCard> {
    let card = sqlx::query_as::<_, JobCard>(
        r#"
        INSERT INTO job_cards (
            vehicle_id, description, labour_cost, parts_cost, total_cost, status
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, vehicle_id, description, labour_cost, parts_cost,
                  total_cost, status, created_at
        "#,
    )
    .bind(vehicle_id)
    .bind(description)
    .bind(labour_cost)
    .bind(parts_cost)
    .bind(total_cost)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(card)
}

/// Set a job card's status. No vehicle-side cascade.
pub async fn update_job_card_status(pool: &PgPool, id: Uuid, status: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE job_cards
        SET status = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(status)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Delete a job card record
pub async fn delete_job_card(pool: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM job_cards WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
