//! Dashboard aggregation rules.
//!
//! Pure reductions over already-fetched collections; nothing here touches
//! the database. An empty collection yields all-zero aggregates.

use rust_decimal::Decimal;

use super::calculators::vehicle_profit;
use super::models::{JobCard, JobCardStatus, Vehicle, VehicleStatus};

/// Dashboard summary over the vehicle stock book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockSummary {
    pub total_vehicles: usize,
    pub in_stock_count: usize,
    pub sold_count: usize,
    pub not_to_sell_count: usize,
    /// Purchase money currently tied up in unsold stock.
    pub stock_investment: Decimal,
    /// Profit on In Stock vehicles as if sold today at the recorded sale
    /// price. A zero sale price contributes its literal (negative) margin.
    pub potential_profit: Decimal,
    /// Profit realised on Sold vehicles.
    pub realised_profit: Decimal,
    /// Sale revenue across Sold vehicles.
    pub total_revenue: Decimal,
}

/// Summarise the full vehicle collection.
pub fn summarise_stock(vehicles: &[Vehicle]) -> StockSummary {
    let mut summary = StockSummary {
        total_vehicles: vehicles.len(),
        ..StockSummary::default()
    };

    for v in vehicles {
        let profit = vehicle_profit(v.purchase_price, v.repairs, v.sale_price);
        match v.status {
            VehicleStatus::InStock => {
                summary.in_stock_count += 1;
                summary.stock_investment += v.purchase_price;
                summary.potential_profit += profit;
            }
            VehicleStatus::Sold => {
                summary.sold_count += 1;
                summary.realised_profit += profit;
                summary.total_revenue += v.sale_price;
            }
            VehicleStatus::NotToSell => {
                summary.not_to_sell_count += 1;
            }
        }
    }

    summary
}

/// Reporting view over the workshop book.
///
/// The vehicle cascade is the authoritative accounting model; this view
/// reports workshop throughput and spend derived from the job cards
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkshopSummary {
    pub total_jobs: usize,
    pub pending_count: usize,
    pub in_progress_count: usize,
    pub completed_count: usize,
    /// Total workshop spend across all job cards.
    pub total_spend: Decimal,
    /// Spend on completed work only.
    pub completed_spend: Decimal,
}

/// Summarise the full job-card collection.
pub fn summarise_workshop(cards: &[JobCard]) -> WorkshopSummary {
    let mut summary = WorkshopSummary {
        total_jobs: cards.len(),
        ..WorkshopSummary::default()
    };

    for card in cards {
        summary.total_spend += card.total_cost;
        match card.status {
            JobCardStatus::Pending => summary.pending_count += 1,
            JobCardStatus::InProgress => summary.in_progress_count += 1,
            JobCardStatus::Completed => {
                summary.completed_count += 1;
                summary.completed_spend += card.total_cost;
            }
        }
    }

    summary
}

/// Overall business profit figure for the dashboard.
///
/// Workshop costs are already folded into vehicle profit by the repairs
/// cascade, so the realised figure stands alone.
pub fn total_business_profit(stock: &StockSummary) -> Decimal {
    stock.realised_profit
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::stock::models::{Transmission, V5cStatus};

    fn vehicle(status: VehicleStatus, purchase: Decimal, repairs: Decimal, sale: Decimal) -> Vehicle {
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
            status,
            sold_date: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn job_card(status: JobCardStatus, total: Decimal) -> JobCard {
        JobCard {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            description: "Brake discs".to_string(),
            labour_cost: total,
            parts_cost: Decimal::ZERO,
            total_cost: total,
            status,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_stock_all_zero() {
        let summary = summarise_stock(&[]);
        assert_eq!(summary, StockSummary::default());
        assert_eq!(summary.stock_investment, Decimal::ZERO);
        assert_eq!(total_business_profit(&summary), Decimal::ZERO);
    }

    #[test]
    fn test_empty_workshop_all_zero() {
        assert_eq!(summarise_workshop(&[]), WorkshopSummary::default());
    }

    #[test]
    fn test_stock_counts_partition_by_status() {
        let vehicles = vec![
            vehicle(VehicleStatus::InStock, dec!(5000), dec!(0), dec!(6500)),
            vehicle(VehicleStatus::InStock, dec!(3000), dec!(200), dec!(4000)),
            vehicle(VehicleStatus::Sold, dec!(7000), dec!(500), dec!(9000)),
            vehicle(VehicleStatus::NotToSell, dec!(1000), dec!(0), dec!(0)),
        ];
        let summary = summarise_stock(&vehicles);

        assert_eq!(summary.total_vehicles, 4);
        assert_eq!(summary.in_stock_count, 2);
        assert_eq!(summary.sold_count, 1);
        assert_eq!(summary.not_to_sell_count, 1);
    }

    #[test]
    fn test_stock_investment_sums_in_stock_purchases() {
        let vehicles = vec![
            vehicle(VehicleStatus::InStock, dec!(5000), dec!(0), dec!(6500)),
            vehicle(VehicleStatus::InStock, dec!(3000), dec!(0), dec!(4000)),
            vehicle(VehicleStatus::Sold, dec!(7000), dec!(0), dec!(9000)),
        ];
        assert_eq!(summarise_stock(&vehicles).stock_investment, dec!(8000));
    }

    #[test]
    fn test_potential_and_realised_profit() {
        let vehicles = vec![
            vehicle(VehicleStatus::InStock, dec!(5000), dec!(300), dec!(6500)),
            vehicle(VehicleStatus::Sold, dec!(7000), dec!(500), dec!(9000)),
        ];
        let summary = summarise_stock(&vehicles);

        assert_eq!(summary.potential_profit, dec!(1200));
        assert_eq!(summary.realised_profit, dec!(1500));
        assert_eq!(summary.total_revenue, dec!(9000));
        assert_eq!(total_business_profit(&summary), dec!(1500));
    }

    #[test]
    fn test_potential_profit_counts_zero_sale_price_literally() {
        // No sale price recorded yet shows through as a negative margin
        let vehicles = vec![vehicle(VehicleStatus::InStock, dec!(5000), dec!(0), dec!(0))];
        assert_eq!(summarise_stock(&vehicles).potential_profit, dec!(-5000));
    }

    #[test]
    fn test_workshop_summary_partitions_and_sums() {
        let cards = vec![
            job_card(JobCardStatus::Pending, dec!(100)),
            job_card(JobCardStatus::InProgress, dec!(250)),
            job_card(JobCardStatus::Completed, dec!(400)),
            job_card(JobCardStatus::Completed, dec!(50)),
        ];
        let summary = summarise_workshop(&cards);

        assert_eq!(summary.total_jobs, 4);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.in_progress_count, 1);
        assert_eq!(summary.completed_count, 2);
        assert_eq!(summary.total_spend, dec!(800));
        assert_eq!(summary.completed_spend, dec!(450));
    }
}
