//! CSV stock export.
//!
//! The output must stay byte-compatible with the exports staff already have
//! on file: unquoted header line, every row value double-quoted, absent
//! values as the empty string, no trailing newline. Quotes inside values are
//! not escaped; the legacy format never did.

use super::models::Vehicle;

const HEADERS: [&str; 14] = [
    "Make",
    "Model",
    "Reg",
    "Mileage",
    "Purchase Price",
    "CAP Clean",
    "CAP Live",
    "Status",
    "MOT",
    "Transmission",
    "Grade",
    "V5C",
    "Keys",
    "Sold Date",
];

/// Render the vehicle collection as the stock-book CSV document.
pub fn stock_csv(vehicles: &[Vehicle]) -> String {
    let mut lines = Vec::with_capacity(vehicles.len() + 1);
    lines.push(HEADERS.join(","));

    for v in vehicles {
        let values = [
            v.make.clone(),
            v.model.clone(),
            v.reg.clone(),
            v.mileage.to_string(),
            v.purchase_price.to_string(),
            v.cap_clean_price.to_string(),
            v.cap_live_price.to_string(),
            v.status.as_str().to_string(),
            v.mot.map(|d| d.to_string()).unwrap_or_default(),
            v.transmission.as_str().to_string(),
            v.grade.to_string(),
            v.v5c_status.as_str().to_string(),
            v.keys_count.to_string(),
            v.sold_date.map(|d| d.to_string()).unwrap_or_default(),
        ];
        let row: Vec<String> = values.iter().map(|val| format!("\"{}\"", val)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Suggested download filename for the export.
pub const EXPORT_FILENAME: &str = "vehicle_stock.csv";
