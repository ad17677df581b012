//! Per-product output summary.
//!
//! Folds the normalized rows of both lines into one table keyed by
//! `"<code> - <name>"`. A row counted by norm contributes its quantity; any
//! other row contributes its discounted norm scaled by the line's total hours
//! over the reference shift length.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CalculationSettings;
use crate::models::{AuditStep, Line, LineHours, NormalizedRow, ProductSummary};

use super::norm::round_to_int;

/// The result of summarizing output per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummaryResult {
    /// One row per product key, in first-seen order (A3 rows before A4 rows).
    pub products: Vec<ProductSummary>,
    /// One audit step per contributing task row.
    pub audit_steps: Vec<AuditStep>,
}

#[derive(Debug)]
struct Accumulator {
    code: String,
    name: String,
    a3: Decimal,
    a4: Decimal,
    made_a3: u64,
    made_a4: u64,
}

impl Accumulator {
    fn add(&mut self, line: Line, contribution: Decimal, qty_made: u32) {
        match line {
            Line::A3 => {
                self.a3 = self.a3.saturating_add(contribution);
                self.made_a3 = self.made_a3.saturating_add(u64::from(qty_made));
            }
            Line::A4 => {
                self.a4 = self.a4.saturating_add(contribution);
                self.made_a4 = self.made_a4.saturating_add(u64::from(qty_made));
            }
        }
    }

    fn finish(self) -> ProductSummary {
        ProductSummary {
            product: format!("{} - {}", self.code, self.name),
            a3: round_to_int(self.a3),
            a4: round_to_int(self.a4),
            total: round_to_int(self.a3.saturating_add(self.a4)),
            made_a3: self.made_a3,
            made_a4: self.made_a4,
            made_total: self.made_a3.saturating_add(self.made_a4),
            product_code: self.code,
            product_name: self.name,
        }
    }
}

/// Summarizes output per product across both lines.
///
/// Rows with an empty product code are skipped. Every other row on a line
/// shares that line's total hours as its divisor; a line with zero hours
/// contributes nothing from rows not counted by norm. Totals accumulate
/// unrounded and are rounded (ties to even) only in the returned table.
/// Sums that leave the decimal or `i64` range saturate.
///
/// # Example
///
/// ```
/// use shift_report::calculation::summarize_products;
/// use shift_report::config::CalculationSettings;
/// use shift_report::models::{Line, LineHours, NormalizedRow};
/// use rust_decimal::Decimal;
///
/// let row = NormalizedRow {
///     line: Line::A3,
///     product_code: "P1".to_string(),
///     product_name: "Bracket".to_string(),
///     base_norm: Decimal::new(100, 0),
///     discount_percent: 30,
///     norm_with_discount: 70,
///     qty_made: 7,
///     count_by_norm: false,
///     producible: true,
/// };
/// let hours = LineHours { a3: Decimal::new(16, 0), a4: Decimal::ZERO };
///
/// let result = summarize_products(&[row], &[], hours, &CalculationSettings::default());
/// assert_eq!(result.products[0].a3, 93);
/// assert_eq!(result.products[0].made_a3, 7);
/// ```
pub fn summarize_products(
    a3_rows: &[NormalizedRow],
    a4_rows: &[NormalizedRow],
    line_hours: LineHours,
    settings: &CalculationSettings,
) -> ProductSummaryResult {
    let mut order: Vec<Accumulator> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut audit_steps = Vec::new();

    let lines = [(Line::A3, a3_rows), (Line::A4, a4_rows)];
    for (line, rows) in lines {
        let hours = line_hours.get(line);

        for row in rows {
            if row.product_code.is_empty() {
                continue;
            }

            let key = format!("{} - {}", row.product_code, row.product_name);
            let position = *positions.entry(key).or_insert_with(|| {
                order.push(Accumulator {
                    code: row.product_code.clone(),
                    name: row.product_name.clone(),
                    a3: Decimal::ZERO,
                    a4: Decimal::ZERO,
                    made_a3: 0,
                    made_a4: 0,
                });
                order.len() - 1
            });

            let step_number = audit_steps.len() as u32 + 1;
            let (contribution, step) =
                row_contribution(row, line, hours, settings.reference_shift_hours, step_number);
            order[position].add(line, contribution, row.qty_made);
            audit_steps.push(step);
        }
    }

    ProductSummaryResult {
        products: order.into_iter().map(Accumulator::finish).collect(),
        audit_steps,
    }
}

fn row_contribution(
    row: &NormalizedRow,
    line: Line,
    line_hours: Decimal,
    shift_hours: Decimal,
    step_number: u32,
) -> (Decimal, AuditStep) {
    if row.count_by_norm {
        let contribution = Decimal::from(row.qty_made);
        let step = AuditStep {
            step_number,
            rule_id: "quantity_contribution".to_string(),
            rule_name: "Quantity Made".to_string(),
            input: serde_json::json!({
                "line": line,
                "product_code": row.product_code,
                "qty_made": row.qty_made,
            }),
            output: serde_json::json!({
                "contribution": contribution.to_string(),
            }),
            reasoning: format!(
                "{} on {} is counted by norm: credited {} units made",
                row.product_code, line, row.qty_made
            ),
        };
        return (contribution, step);
    }

    let contribution = if line_hours > Decimal::ZERO && shift_hours > Decimal::ZERO {
        Decimal::from(row.norm_with_discount)
            .checked_div(shift_hours)
            .map_or(Decimal::MAX, |per_hour| per_hour.saturating_mul(line_hours))
    } else {
        Decimal::ZERO
    };

    let reasoning = if line_hours > Decimal::ZERO {
        format!(
            "{} on {}: ({} / {}) x {} line hours = {}",
            row.product_code,
            line,
            row.norm_with_discount,
            shift_hours,
            line_hours,
            contribution.round_dp(2)
        )
    } else {
        format!(
            "{} on {}: line has no recorded hours, nothing credited",
            row.product_code, line
        )
    };

    let step = AuditStep {
        step_number,
        rule_id: "hours_weighted_norm".to_string(),
        rule_name: "Hours-Weighted Norm".to_string(),
        input: serde_json::json!({
            "line": line,
            "product_code": row.product_code,
            "norm_with_discount": row.norm_with_discount,
            "reference_shift_hours": shift_hours.to_string(),
            "line_hours": line_hours.to_string(),
        }),
        output: serde_json::json!({
            "contribution": contribution.to_string(),
        }),
        reasoning,
    };
    (contribution, step)
}
