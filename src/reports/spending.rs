//! Spending report
//!
//! Expense totals per category. Settle-up payments move money between
//! members without anyone spending it, so they are left out.

use std::collections::HashMap;
use std::io::Write;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{BillError, BillResult};
use crate::models::{Bill, Money};
use crate::storage::Storage;

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingByCategory {
    pub category: String,
    pub total_spending: Money,
    pub bill_count: usize,
    /// Share of all spending, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingReport {
    /// Largest category first
    pub categories: Vec<SpendingByCategory>,
    pub total_spending: Money,
    pub total_bills: usize,
}

impl SpendingReport {
    /// Build the report from the stored bills
    ///
    /// Bills without a category are counted under `default_category`.
    pub fn generate(storage: &Storage, default_category: &str) -> BillResult<Self> {
        let bills = storage.bills.get_all()?;
        Self::from_bills(&bills, default_category)
    }

    /// Build the report from a slice of bills
    ///
    /// Fails with [`BillError::Validation`] when the totals overflow.
    pub fn from_bills(bills: &[Bill], default_category: &str) -> BillResult<Self> {
        let mut totals: HashMap<String, (Money, usize)> = HashMap::new();
        let mut total_spending = Money::zero();
        let mut total_bills = 0;

        for bill in bills.iter().filter(|b| !b.is_settlement) {
            let category = bill
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(default_category);

            let overflow = || {
                BillError::Validation(format!("Spending total overflows at bill {}", bill.id))
            };

            let entry = totals
                .entry(category.to_string())
                .or_insert((Money::zero(), 0));
            entry.0 = entry.0.checked_add(bill.amount).ok_or_else(overflow)?;
            entry.1 += 1;

            total_spending = total_spending.checked_add(bill.amount).ok_or_else(overflow)?;
            total_bills += 1;
        }

        let mut categories: Vec<_> = totals
            .into_iter()
            .map(|(category, (spent, count))| SpendingByCategory {
                percentage: percentage_of(spent, total_spending),
                category,
                total_spending: spent,
                bill_count: count,
            })
            .collect();

        categories.sort_by(|a, b| {
            b.total_spending
                .cmp(&a.total_spending)
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(Self {
            categories,
            total_spending,
            total_bills,
        })
    }

    /// The `limit` categories with the most spending
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No spending recorded yet.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>8}\n",
            "Category", "Amount", "Bills", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>7.1}%\n",
                row.category,
                row.total_spending.format_with_symbol(currency_symbol),
                row.bill_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} {:>6}\n",
            "TOTAL",
            self.total_spending.format_with_symbol(currency_symbol),
            self.total_bills
        ));

        output
    }

    /// Write the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BillResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Category", "Amount", "Bill Count", "Percentage"])
            .map_err(|e| BillError::Export(e.to_string()))?;

        for row in &self.categories {
            csv_writer
                .write_record([
                    row.category.clone(),
                    format!("{:.2}", row.total_spending.rounded().amount()),
                    row.bill_count.to_string(),
                    format!("{:.2}", row.percentage),
                ])
                .map_err(|e| BillError::Export(e.to_string()))?;
        }

        csv_writer
            .write_record([
                "TOTAL".to_string(),
                format!("{:.2}", self.total_spending.rounded().amount()),
                self.total_bills.to_string(),
                "100.00".to_string(),
            ])
            .map_err(|e| BillError::Export(e.to_string()))?;

        csv_writer
            .flush()
            .map_err(|e| BillError::Export(e.to_string()))
    }
}

fn percentage_of(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (part.amount() * Decimal::ONE_HUNDRED / total.amount())
        .to_f64()
        .unwrap_or(0.0)
}
