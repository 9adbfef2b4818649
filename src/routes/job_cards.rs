//! Workshop job-card route handlers

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::stock::models::JobCardStatus;
use crate::stock::requests::JobCardForm;
use crate::stock::{queries, services};
use crate::AppState;

/// Query parameters for the job-card page (vehicle preselect from the
/// stock list)
#[derive(Debug, Deserialize)]
pub struct JobCardListQuery {
    #[serde(default)]
    pub vehicle: Option<Uuid>,
}

/// Status change form for a job card
#[derive(Debug, Deserialize)]
pub struct JobCardStatusForm {
    #[serde(default)]
    pub status: String,
}

/// Vehicle option for the create-form dropdown
struct VehicleOption {
    id: Uuid,
    label: String,
    selected: bool,
}

/// One rendered row of the job-card table
struct JobCardRow {
    id: Uuid,
    vehicle: String,
    description: String,
    labour_cost: String,
    parts_cost: String,
    total_cost: String,
    is_pending: bool,
    is_in_progress: bool,
    is_completed: bool,
}

/// Job-card page template
#[derive(Template)]
#[template(path = "jobcards/list.html")]
struct JobCardListTemplate {
    vehicles: Vec<VehicleOption>,
    rows: Vec<JobCardRow>,
    has_cards: bool,
}

/// Display label for a card's owning vehicle; a card orphaned by vehicle
/// deletion gets a placeholder instead of an empty cell.
fn vehicle_label(make: &str, model: &str, reg: &str) -> String {
    if make.is_empty() && model.is_empty() && reg.is_empty() {
        "(vehicle removed)".to_string()
    } else {
        format!("{} {} ({})", make, model, reg)
    }
}

/// Job-card page: create form plus the full listing
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<JobCardListQuery>,
) -> Result<Html<String>> {
    let refs = queries::list_vehicle_refs(&state.db).await?;
    let cards = queries::list_job_cards(&state.db).await?;

    let vehicles = refs
        .into_iter()
        .map(|v| VehicleOption {
            selected: query.vehicle == Some(v.id),
            label: format!("{} {} - {}", v.make, v.model, v.reg),
            id: v.id,
        })
        .collect();

    let rows: Vec<JobCardRow> = cards
        .into_iter()
        .map(|c| JobCardRow {
            id: c.id,
            vehicle: vehicle_label(&c.vehicle_make, &c.vehicle_model, &c.vehicle_reg),
            description: c.description,
            labour_cost: format!("£{}", c.labour_cost),
            parts_cost: format!("£{}", c.parts_cost),
            total_cost: format!("£{}", c.total_cost),
            is_pending: c.status == JobCardStatus::Pending,
            is_in_progress: c.status == JobCardStatus::InProgress,
            is_completed: c.status == JobCardStatus::Completed,
        })
        .collect();

    let template = JobCardListTemplate {
        vehicles,
        has_cards: !rows.is_empty(),
        rows,
    };

    Ok(Html(template.render()?))
}

/// Create a job card and cascade its total into the owning vehicle
pub async fn create(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<JobCardForm>,
) -> Result<Redirect> {
    services::create_job_card(&state.db, &form).await?;
    Ok(Redirect::to("/jobcards"))
}

/// Change a job card's status; no vehicle-side cascade
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Form(form): axum::Form<JobCardStatusForm>,
) -> Result<Redirect> {
    let status = JobCardStatus::from(form.status);
    queries::update_job_card_status(&state.db, id, status.as_str()).await?;
    Ok(Redirect::to("/jobcards"))
}

/// Delete a job card, backing its total out of the owning vehicle
/// (confirmation happens in the template)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    services::remove_job_card(&state.db, id).await?;
    Ok(Redirect::to("/jobcards"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_label_formats_identity() {
        assert_eq!(
            vehicle_label("Ford", "Focus", "AB12 CDE"),
            "Ford Focus (AB12 CDE)"
        );
    }

    #[test]
    fn test_vehicle_label_placeholder_for_orphaned_card() {
        assert_eq!(vehicle_label("", "", ""), "(vehicle removed)");
    }
}
