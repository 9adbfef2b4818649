//! Status lifecycle and cascade rules.
//!
//! Pure transition functions: they compute the field updates a status change
//! or job-card event requires, and the service layer persists them. The
//! vehicle status graph is deliberately flat - any state is reachable from
//! any other, matching observed workshop practice.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::calculators::vehicle_profit;
use super::models::VehicleStatus;

/// Status every vehicle record is created with, regardless of caller input.
pub fn initial_vehicle_status() -> VehicleStatus {
    VehicleStatus::InStock
}

/// Field updates produced by a vehicle status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: VehicleStatus,
    pub sold_date: Option<NaiveDate>,
}

/// Transition a vehicle to `target` status.
///
/// Entering Sold stamps `sold_date` with today; leaving Sold clears it.
/// In Stock <-> Not To Sell carries no side effects.
pub fn transition_vehicle(target: VehicleStatus, today: NaiveDate) -> StatusChange {
    StatusChange {
        status: target,
        sold_date: if target == VehicleStatus::Sold {
            Some(today)
        } else {
            None
        },
    }
}

/// The list-screen toggle: Sold flips back to In Stock, anything else
/// becomes Sold.
pub fn toggle_vehicle(current: VehicleStatus, today: NaiveDate) -> StatusChange {
    let target = if current == VehicleStatus::Sold {
        VehicleStatus::InStock
    } else {
        VehicleStatus::Sold
    };
    transition_vehicle(target, today)
}

/// New repairs total and profit after a job-card event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairsUpdate {
    pub repairs: Decimal,
    pub profit: Decimal,
}

/// Cascade for a newly created job card: add its total to the vehicle's
/// cumulative repairs and recompute profit.
pub fn apply_job_card_created(
    purchase: Decimal,
    repairs: Decimal,
    sale: Decimal,
    job_total: Decimal,
) -> RepairsUpdate {
    let new_repairs = repairs + job_total;
    RepairsUpdate {
        repairs: new_repairs,
        profit: vehicle_profit(purchase, new_repairs, sale),
    }
}

/// Cascade for a deleted job card: subtract its total from the vehicle's
/// cumulative repairs, clamped at a floor of zero, and recompute profit.
pub fn apply_job_card_deleted(
    purchase: Decimal,
    repairs: Decimal,
    sale: Decimal,
    job_total: Decimal,
) -> RepairsUpdate {
    let new_repairs = (repairs - job_total).max(Decimal::ZERO);
    RepairsUpdate {
        repairs: new_repairs,
        profit: vehicle_profit(purchase, new_repairs, sale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_initial_status_is_in_stock() {
        assert_eq!(initial_vehicle_status(), VehicleStatus::InStock);
    }

    #[test]
    fn test_transition_to_sold_stamps_sold_date() {
        let change = transition_vehicle(VehicleStatus::Sold, today());
        assert_eq!(change.status, VehicleStatus::Sold);
        assert_eq!(change.sold_date, Some(today()));
    }

    #[test]
    fn test_transition_away_from_sold_clears_sold_date() {
        let change = transition_vehicle(VehicleStatus::InStock, today());
        assert_eq!(change.status, VehicleStatus::InStock);
        assert_eq!(change.sold_date, None);

        let change = transition_vehicle(VehicleStatus::NotToSell, today());
        assert_eq!(change.sold_date, None);
    }

    #[test]
    fn test_toggle_flips_sold_and_in_stock() {
        let change = toggle_vehicle(VehicleStatus::InStock, today());
        assert_eq!(change.status, VehicleStatus::Sold);
        assert_eq!(change.sold_date, Some(today()));

        let change = toggle_vehicle(VehicleStatus::Sold, today());
        assert_eq!(change.status, VehicleStatus::InStock);
        assert_eq!(change.sold_date, None);
    }

    #[test]
    fn test_toggle_from_not_to_sell_sells() {
        let change = toggle_vehicle(VehicleStatus::NotToSell, today());
        assert_eq!(change.status, VehicleStatus::Sold);
    }

    #[test]
    fn test_job_card_created_cascade() {
        // repairs 0 + job 150, profit follows
        let update = apply_job_card_created(dec!(5000), dec!(0), dec!(6500), dec!(150));
        assert_eq!(update.repairs, dec!(150));
        assert_eq!(update.profit, dec!(1350));
    }

    #[test]
    fn test_job_card_deleted_cascade_restores() {
        let update = apply_job_card_deleted(dec!(5000), dec!(150), dec!(6500), dec!(150));
        assert_eq!(update.repairs, dec!(0));
        assert_eq!(update.profit, dec!(1500));
    }

    #[test]
    fn test_job_card_deleted_clamps_at_zero() {
        // Deleting a card whose total exceeds the running repairs figure
        // floors the result instead of going negative
        let update = apply_job_card_deleted(dec!(5000), dec!(100), dec!(6500), dec!(250));
        assert_eq!(update.repairs, dec!(0));
        assert_eq!(update.profit, dec!(1500));
    }

    #[test]
    fn test_create_then_delete_is_neutral() {
        let created = apply_job_card_created(dec!(4000), dec!(200), dec!(5500), dec!(75));
        let deleted =
            apply_job_card_deleted(dec!(4000), created.repairs, dec!(5500), dec!(75));
        assert_eq!(deleted.repairs, dec!(200));
        assert_eq!(deleted.profit, dec!(1300));
    }
}
