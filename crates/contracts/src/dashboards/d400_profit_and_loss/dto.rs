use crate::domain::a003_transaction_category::TransactionKind;
use crate::shared::money::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request for the profit and loss report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossRequest {
    /// YYYY-MM-DD, inclusive
    pub date_from: String,
    /// YYYY-MM-DD, inclusive
    pub date_to: String,
}

/// Raw figures returned by `/api/reports/profit-and-loss`; the client derives the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfitAndLossSource {
    /// Net sales after discounts, cancelled invoices excluded
    pub revenue: f64,
    /// Purchase cost of the goods sold
    pub cost_of_goods: f64,
    #[serde(default)]
    pub entries: Vec<CategoryAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
}

/// Computed profit and loss statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    pub revenue: f64,
    pub cost_of_goods: f64,
    pub gross_profit: f64,
    /// Other income grouped by category
    pub other_income: BTreeMap<String, f64>,
    pub total_other_income: f64,
    /// Operating expenses grouped by category
    pub expenses: BTreeMap<String, f64>,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Net profit as a percentage of revenue, 0 when there is no revenue
    pub net_margin_percent: f64,
}

impl ProfitAndLoss {
    pub fn compute(source: &ProfitAndLossSource) -> Self {
        let mut other_income = BTreeMap::new();
        let mut expenses = BTreeMap::new();
        for entry in &source.entries {
            let bucket = match entry.kind {
                TransactionKind::Income => &mut other_income,
                TransactionKind::Expense => &mut expenses,
            };
            *bucket.entry(entry.category.clone()).or_insert(0.0) += entry.amount;
        }
        for value in other_income.values_mut().chain(expenses.values_mut()) {
            *value = round2(*value);
        }

        let revenue = round2(source.revenue);
        let cost_of_goods = round2(source.cost_of_goods);
        let gross_profit = round2(revenue - cost_of_goods);
        let total_other_income = round2(other_income.values().sum());
        let total_expenses = round2(expenses.values().sum());
        let net_profit = round2(gross_profit + total_other_income - total_expenses);
        let net_margin_percent = if revenue != 0.0 {
            round2(net_profit / revenue * 100.0)
        } else {
            0.0
        };

        Self {
            revenue,
            cost_of_goods,
            gross_profit,
            other_income,
            total_other_income,
            expenses,
            total_expenses,
            net_profit,
            net_margin_percent,
        }
    }

    pub fn is_loss(&self) -> bool {
        self.net_profit < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, kind: TransactionKind, amount: f64) -> CategoryAmount {
        CategoryAmount {
            category: category.into(),
            kind,
            amount,
        }
    }

    #[test]
    fn test_statement() {
        let source = ProfitAndLossSource {
            revenue: 10_000.0,
            cost_of_goods: 6_000.0,
            entries: vec![
                entry("Rent", TransactionKind::Expense, 1_500.0),
                entry("Salary", TransactionKind::Expense, 1_000.0),
                entry("Rent", TransactionKind::Expense, 500.0),
                entry("Commission", TransactionKind::Income, 200.0),
            ],
        };
        let pl = ProfitAndLoss::compute(&source);
        assert_eq!(pl.gross_profit, 4_000.0);
        assert_eq!(pl.expenses["Rent"], 2_000.0);
        assert_eq!(pl.total_expenses, 3_000.0);
        assert_eq!(pl.total_other_income, 200.0);
        assert_eq!(pl.net_profit, 1_200.0);
        assert_eq!(pl.net_margin_percent, 12.0);
        assert!(!pl.is_loss());
    }

    #[test]
    fn test_no_revenue() {
        let source = ProfitAndLossSource {
            revenue: 0.0,
            cost_of_goods: 0.0,
            entries: vec![entry("Rent", TransactionKind::Expense, 100.0)],
        };
        let pl = ProfitAndLoss::compute(&source);
        assert_eq!(pl.net_profit, -100.0);
        assert_eq!(pl.net_margin_percent, 0.0);
        assert!(pl.is_loss());
    }
}
