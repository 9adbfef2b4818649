//! Vehicle stock route handlers

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::stock::calculators::{cap_check, days_in_stock, mot_urgency, CapCheck, MotUrgency};
use crate::stock::export::{stock_csv, EXPORT_FILENAME};
use crate::stock::models::{Vehicle, VehicleStatus};
use crate::stock::requests::VehicleForm;
use crate::stock::{queries, services};
use crate::AppState;

/// Query parameters for the stock list filters
#[derive(Debug, Deserialize)]
pub struct VehicleListQuery {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl VehicleListQuery {
    fn make_filter(&self) -> Option<&str> {
        self.make.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn status_filter(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

/// Status change form; no target means the Sold/In Stock toggle
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: Option<String>,
}

/// One rendered row of the stock table
struct VehicleRow {
    id: Uuid,
    make: String,
    model: String,
    reg: String,
    mileage: i32,
    purchase_price: String,
    sale_price: String,
    cap_clean_price: String,
    cap_live_price: String,
    cap_flag: &'static str,
    cap_breach: bool,
    status: &'static str,
    profit: String,
    days_in_stock: i64,
    mot_known: bool,
    mot_expired: bool,
    mot_display: String,
    transmission: &'static str,
    grade: i16,
    v5c_status: &'static str,
    keys_count: i16,
    sold_date: String,
    // raw field values for the inline edit form
    mileage_raw: String,
    purchase_raw: String,
    sale_raw: String,
    cap_clean_raw: String,
    cap_live_raw: String,
    mot_raw: String,
}

/// Stock list template
#[derive(Template)]
#[template(path = "vehicles/list.html")]
struct VehicleListTemplate {
    rows: Vec<VehicleRow>,
    filter_make: String,
    filter_status: String,
    export_url: String,
    has_vehicles: bool,
}

/// Export link carrying the active filters, percent-encoded so a make
/// containing `&` or `#` survives the query string.
fn export_href(make: &str, status: &str) -> String {
    format!(
        "/vehicles/export?make={}&status={}",
        urlencoding::encode(make),
        urlencoding::encode(status)
    )
}

fn to_row(v: Vehicle) -> VehicleRow {
    let now = Utc::now();
    let cap = cap_check(v.purchase_price, v.cap_clean_price, v.cap_live_price);
    let mot = mot_urgency(v.mot, now);

    let profit = if v.status == VehicleStatus::Sold {
        format!("£{}", v.profit)
    } else {
        "Awaiting sale".to_string()
    };

    VehicleRow {
        id: v.id,
        mileage: v.mileage,
        purchase_price: format!("£{}", v.purchase_price),
        sale_price: format!("£{}", v.sale_price),
        cap_clean_price: format!("£{}", v.cap_clean_price),
        cap_live_price: format!("£{}", v.cap_live_price),
        cap_flag: cap.label(),
        cap_breach: cap != CapCheck::Ok,
        status: v.status.as_str(),
        profit,
        days_in_stock: days_in_stock(v.created_at, now),
        mot_known: mot != MotUrgency::Unknown,
        mot_expired: matches!(mot, MotUrgency::Expired { .. }),
        mot_display: v
            .mot
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string()),
        transmission: v.transmission.as_str(),
        grade: v.grade,
        v5c_status: v.v5c_status.as_str(),
        keys_count: v.keys_count,
        sold_date: v
            .sold_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string()),
        mileage_raw: v.mileage.to_string(),
        purchase_raw: v.purchase_price.to_string(),
        sale_raw: v.sale_price.to_string(),
        cap_clean_raw: v.cap_clean_price.to_string(),
        cap_live_raw: v.cap_live_price.to_string(),
        mot_raw: v.mot.map(|d| d.to_string()).unwrap_or_default(),
        make: v.make,
        model: v.model,
        reg: v.reg,
    }
}

/// Stock list page with filters and the add-vehicle form
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Html<String>> {
    let vehicles =
        queries::list_vehicles(&state.db, query.make_filter(), query.status_filter()).await?;

    let rows: Vec<VehicleRow> = vehicles.into_iter().map(to_row).collect();

    let filter_make = query.make.unwrap_or_default();
    let filter_status = query.status.unwrap_or_default();

    let template = VehicleListTemplate {
        has_vehicles: !rows.is_empty(),
        rows,
        export_url: export_href(&filter_make, &filter_status),
        filter_make,
        filter_status,
    };

    Ok(Html(template.render()?))
}

/// Add a vehicle record
pub async fn create(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<VehicleForm>,
) -> Result<Redirect> {
    services::create_vehicle(&state.db, &form).await?;
    Ok(Redirect::to("/vehicles"))
}

/// Edit a vehicle record
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Form(form): axum::Form<VehicleForm>,
) -> Result<Redirect> {
    services::edit_vehicle(&state.db, id, &form).await?;
    Ok(Redirect::to("/vehicles"))
}

/// Change a vehicle's status: an explicit target, or the Sold toggle
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Form(form): axum::Form<StatusForm>,
) -> Result<Redirect> {
    match form.status.as_deref().filter(|s| !s.is_empty()) {
        Some(target) => {
            let target = VehicleStatus::from(target.to_string());
            services::set_vehicle_status(&state.db, id, target).await?;
        }
        None => services::toggle_vehicle_status(&state.db, id).await?,
    }
    Ok(Redirect::to("/vehicles"))
}

/// Delete a vehicle record (confirmation happens in the template)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    services::remove_vehicle(&state.db, id).await?;
    Ok(Redirect::to("/vehicles"))
}

/// CSV export of the (filtered) stock list
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<impl IntoResponse> {
    let vehicles =
        queries::list_vehicles(&state.db, query.make_filter(), query.status_filter()).await?;
    let csv = stock_csv(&vehicles);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        csv,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_href_plain_filters() {
        assert_eq!(
            export_href("Ford", "In Stock"),
            "/vehicles/export?make=Ford&status=In%20Stock"
        );
    }

    #[test]
    fn test_export_href_encodes_reserved_characters() {
        // A make containing & or # must not truncate the query string
        assert_eq!(
            export_href("Mitsubishi & Co #2", "Sold"),
            "/vehicles/export?make=Mitsubishi%20%26%20Co%20%232&status=Sold"
        );
    }

    #[test]
    fn test_export_href_empty_filters() {
        assert_eq!(export_href("", ""), "/vehicles/export?make=&status=");
    }
}
