//! Core stock derivation functions.
//!
//! Pure functions for the financial and date arithmetic behind the stock
//! book - no database access. Money is `rust_decimal` throughout so integer
//! inputs never pick up rounding drift.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 86_400;

/// Total cost of a job card.
///
/// Negative inputs are permitted and flow through unchanged; the form layer
/// is responsible for the default-to-zero coercion of blank fields.
pub fn job_card_total(labour: Decimal, parts: Decimal) -> Decimal {
    labour + parts
}

/// Profit on a vehicle: sale price less purchase price and cumulative
/// repairs.
///
/// The figure is only meaningful once the vehicle is Sold; callers gate the
/// display on status.
pub fn vehicle_profit(purchase: Decimal, repairs: Decimal, sale: Decimal) -> Decimal {
    sale - (purchase + repairs)
}

/// Result of checking a purchase price against CAP reference valuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapCheck {
    Ok,
    AboveCapLive,
    OverCapClean,
}

impl CapCheck {
    pub fn label(&self) -> &'static str {
        match self {
            CapCheck::Ok => "OK",
            CapCheck::AboveCapLive => "Above CAP Live",
            CapCheck::OverCapClean => "Over CAP Clean",
        }
    }
}

/// Check a purchase price against the CAP Clean and CAP Live valuations.
///
/// The clean check takes precedence over the live check.
pub fn cap_check(purchase: Decimal, cap_clean: Decimal, cap_live: Decimal) -> CapCheck {
    if purchase > cap_clean {
        CapCheck::OverCapClean
    } else if purchase > cap_live {
        CapCheck::AboveCapLive
    } else {
        CapCheck::Ok
    }
}

/// Whole days a vehicle has been in stock, floor-rounded.
pub fn days_in_stock(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// MOT expiry status with the remaining-day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotUrgency {
    Unknown,
    Expired { days_remaining: i64 },
    Valid { days_remaining: i64 },
}

/// Classify an MOT expiry date relative to `now`.
///
/// `days_remaining` is ceiling-rounded: a part-day still counts as a day
/// remaining. A missing date is `Unknown`.
pub fn mot_urgency(mot: Option<NaiveDate>, now: DateTime<Utc>) -> MotUrgency {
    let Some(mot) = mot else {
        return MotUrgency::Unknown;
    };

    let mot_midnight = mot.and_time(NaiveTime::MIN).and_utc();
    let secs = (mot_midnight - now).num_seconds();

    // Integer division truncates toward zero, which is ceiling for negative
    // values; positive values need the explicit round-up.
    let days_remaining = if secs >= 0 {
        (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    } else {
        secs / SECONDS_PER_DAY
    };

    if days_remaining < 0 {
        MotUrgency::Expired { days_remaining }
    } else {
        MotUrgency::Valid { days_remaining }
    }
}

/// Coerce free-text numeric form input to a money amount.
///
/// Blank or non-numeric input becomes zero. This is deliberate leniency
/// inherited from the record-entry screens, not a validation gap.
pub fn lenient_money(input: &str) -> Decimal {
    input.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Coerce free-text integer form input, defaulting to zero.
pub fn lenient_int(input: &str) -> i64 {
    input.trim().parse::<i64>().unwrap_or(0)
}
