//! Dashboard overview figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Revenue for one month of the current year, in chart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub name: String,
    pub total: Decimal,
}

/// The numbers behind the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    pub total_revenue: Decimal,
    pub total_orders: i64,
    pub products_in_stock: i64,
    pub graph_revenue: Vec<GraphPoint>,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Expands sparse per-month totals into all twelve months of the year,
/// zero-filling months without revenue. `rows` pairs a 1-based month
/// number with that month's total.
pub fn graph_from_monthly_totals(rows: &[(i32, Decimal)]) -> Vec<GraphPoint> {
    MONTHS
        .iter()
        .zip(1i32..)
        .map(|(name, month)| {
            let total = rows
                .iter()
                .find(|(row_month, _)| *row_month == month)
                .map_or(Decimal::ZERO, |(_, total)| *total);
            GraphPoint {
                name: (*name).to_string(),
                total,
            }
        })
        .collect()
}
