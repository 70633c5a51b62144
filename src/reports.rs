//! Derived statistics over the transaction ledger. All pure functions over
//! snapshots passed in by the CLI layer.

use chrono::NaiveDate;

use crate::catalog::{product_name, resolve_unit_cost};
use crate::models::{ProductCost, Transaction, TransactionType};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Dashboard stats
// ---------------------------------------------------------------------------

/// Income and weight come straight from the ledger. Expenses add the
/// estimated wholesale coffee cost and packaging on top of the recorded
/// fee/shipping rows, since purchases from the roaster are settled in bulk
/// and never appear as individual expense rows.
pub struct Stats {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    pub weight: f64,
}

pub fn compute_stats(
    transactions: &[Transaction],
    catalog: &[ProductCost],
    settings: &Settings,
) -> Stats {
    let mut income = 0.0;
    let mut recorded_expense = 0.0;
    let mut weight = 0.0;
    let mut estimated_coffee_cost = 0.0;
    let mut estimated_packaging_cost = 0.0;

    for txn in transactions {
        match txn.txn_type {
            TransactionType::Income => {
                income += txn.amount;
                weight += txn.weight;
                let unit_cost = resolve_unit_cost(
                    catalog,
                    &txn.description,
                    settings.cost_per_kg_default,
                );
                estimated_coffee_cost += txn.weight * unit_cost;
                estimated_packaging_cost += settings.cost_per_pack;
            }
            TransactionType::Expense => {
                recorded_expense += txn.amount;
            }
        }
    }

    let expenses = recorded_expense + estimated_coffee_cost + estimated_packaging_cost;
    Stats {
        income,
        expenses,
        net: income - expenses,
        weight,
    }
}

// ---------------------------------------------------------------------------
// Monthly targets
// ---------------------------------------------------------------------------

pub struct TargetProgress {
    pub revenue: f64,
    pub revenue_target: f64,
    pub kg: f64,
    pub kg_target: f64,
}

impl TargetProgress {
    pub fn revenue_pct(&self) -> f64 {
        if self.revenue_target > 0.0 {
            (self.revenue / self.revenue_target * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    pub fn kg_pct(&self) -> f64 {
        if self.kg_target > 0.0 {
            (self.kg / self.kg_target * 100.0).min(100.0)
        } else {
            0.0
        }
    }
}

/// Progress of the given month's income rows against the configured targets.
pub fn target_progress(
    transactions: &[Transaction],
    month: &str,
    settings: &Settings,
) -> TargetProgress {
    let month_income: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.txn_type == TransactionType::Income && t.date.starts_with(month))
        .collect();
    TargetProgress {
        revenue: month_income.iter().map(|t| t.amount).sum(),
        revenue_target: settings.monthly_target,
        kg: month_income.iter().map(|t| t.weight).sum(),
        kg_target: settings.monthly_kg_target,
    }
}

// ---------------------------------------------------------------------------
// Procurement
// ---------------------------------------------------------------------------

/// One line of the bulk purchase list for the roaster: orders not yet
/// labelled, grouped by product.
pub struct ProcurementItem {
    pub product: String,
    pub order_count: usize,
    pub total_weight: f64,
    pub unit_wholesale: f64,
    pub total_cost: f64,
}

/// Pending (unprinted) income rows grouped by product name. Printing a
/// label marks the order fulfilled and drops it from this list, preventing
/// double purchasing.
pub fn procurement_list(
    transactions: &[Transaction],
    catalog: &[ProductCost],
    settings: &Settings,
) -> Vec<ProcurementItem> {
    let mut items: Vec<ProcurementItem> = Vec::new();
    for txn in transactions {
        if txn.txn_type != TransactionType::Income || txn.is_printed {
            continue;
        }
        let product = product_name(&txn.description).to_string();
        let unit_wholesale =
            resolve_unit_cost(catalog, &txn.description, settings.cost_per_kg_default);
        match items.iter_mut().find(|i| i.product == product) {
            Some(item) => {
                item.order_count += 1;
                item.total_weight += txn.weight;
            }
            None => items.push(ProcurementItem {
                product,
                order_count: 1,
                total_weight: txn.weight,
                unit_wholesale,
                total_cost: 0.0,
            }),
        }
    }
    for item in &mut items {
        item.total_cost = item.total_weight * item.unit_wholesale;
    }
    items
}

// ---------------------------------------------------------------------------
// Reorder predictions
// ---------------------------------------------------------------------------

pub struct ReorderPrediction {
    pub customer: String,
    pub avg_gap_days: i64,
    pub next_order: String,
    pub days_left: i64,
}

/// Predict when repeat customers will order again from the average gap
/// between their past orders. Customers with fewer than two orders carry
/// no signal and are skipped.
pub fn reorder_predictions(transactions: &[Transaction], today: &str) -> Vec<ReorderPrediction> {
    let Ok(today) = NaiveDate::parse_from_str(today, "%Y-%m-%d") else {
        return Vec::new();
    };

    let mut by_customer: Vec<(String, Vec<NaiveDate>)> = Vec::new();
    for txn in transactions {
        if txn.txn_type != TransactionType::Income || txn.customer.is_empty() {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(&txn.date, "%Y-%m-%d") else {
            continue;
        };
        match by_customer.iter_mut().find(|(name, _)| *name == txn.customer) {
            Some((_, dates)) => dates.push(date),
            None => by_customer.push((txn.customer.clone(), vec![date])),
        }
    }

    let mut predictions: Vec<ReorderPrediction> = by_customer
        .into_iter()
        .filter_map(|(customer, mut dates)| {
            if dates.len() < 2 {
                return None;
            }
            dates.sort();
            let gaps: Vec<i64> = dates
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).num_days())
                .collect();
            let avg_gap = gaps.iter().sum::<i64>() / gaps.len() as i64;
            let last = *dates.last()?;
            let next = last + chrono::Duration::days(avg_gap);
            Some(ReorderPrediction {
                customer,
                avg_gap_days: avg_gap,
                next_order: next.format("%Y-%m-%d").to_string(),
                days_left: (next - today).num_days(),
            })
        })
        .collect();

    predictions.sort_by_key(|p| p.days_left);
    predictions
}
