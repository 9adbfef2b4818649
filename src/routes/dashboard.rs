//! Dashboard route handler

use askama::Template;
use axum::{extract::State, response::Html};

use crate::error::Result;
use crate::stock::aggregates::{summarise_stock, summarise_workshop, total_business_profit};
use crate::stock::queries;
use crate::AppState;

/// Dashboard template
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    total_vehicles: usize,
    in_stock_count: usize,
    sold_count: usize,
    stock_investment: String,
    potential_profit: String,
    realised_profit: String,
    total_revenue: String,
    workshop_jobs: usize,
    workshop_spend: String,
    total_business_profit: String,
}

/// Dashboard page: aggregate figures over the full stock and workshop books
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let vehicles = queries::list_vehicles(&state.db, None, None).await?;
    let job_cards = queries::list_job_cards_bare(&state.db).await?;

    let stock = summarise_stock(&vehicles);
    let workshop = summarise_workshop(&job_cards);

    let template = DashboardTemplate {
        total_vehicles: stock.total_vehicles,
        in_stock_count: stock.in_stock_count,
        sold_count: stock.sold_count,
        stock_investment: format!("£{}", stock.stock_investment),
        potential_profit: format!("£{}", stock.potential_profit),
        realised_profit: format!("£{}", stock.realised_profit),
        total_revenue: format!("£{}", stock.total_revenue),
        workshop_jobs: workshop.total_jobs,
        workshop_spend: format!("£{}", workshop.total_spend),
        total_business_profit: format!("£{}", total_business_profit(&stock)),
    };

    Ok(Html(template.render()?))
}
