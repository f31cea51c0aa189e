//! Running totals for multi-line invoices (sales, purchases, estimates).

use super::money::{percent_of, round2};
use super::validation::ValidationErrors;
use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub product_id: Option<EntityId>,
    #[serde(default)]
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub tax_percent: f64,
}

impl InvoiceLine {
    pub fn blank() -> Self {
        Self {
            product_id: None,
            product_name: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
            discount_percent: 0.0,
            tax_percent: 0.0,
        }
    }

    pub fn gross(&self) -> f64 {
        round2(self.quantity * self.unit_price)
    }

    pub fn discount(&self) -> f64 {
        percent_of(self.gross(), self.discount_percent)
    }

    pub fn tax(&self) -> f64 {
        percent_of(self.gross() - self.discount(), self.tax_percent)
    }

    pub fn total(&self) -> f64 {
        round2(self.gross() - self.discount() + self.tax())
    }
}

/// One entry of an invoice payment ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayment {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub payment_method_id: Option<EntityId>,
    pub amount: f64,
    /// YYYY-MM-DD
    pub paid_on: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub line_discount: f64,
    pub tax: f64,
    pub header_discount: f64,
    pub grand_total: f64,
    pub paid: f64,
    pub due: f64,
    /// Overpayment returned to the customer
    pub change: f64,
}

impl InvoiceTotals {
    pub fn compute(lines: &[InvoiceLine], header_discount: f64, payments: &[InvoicePayment]) -> Self {
        let subtotal = round2(lines.iter().map(InvoiceLine::gross).sum());
        let line_discount = round2(lines.iter().map(InvoiceLine::discount).sum());
        let tax = round2(lines.iter().map(InvoiceLine::tax).sum());
        let before_header = round2(subtotal - line_discount + tax);
        // A header discount can never push the invoice below zero.
        let header_discount = round2(header_discount.max(0.0).min(before_header.max(0.0)));
        let grand_total = round2(before_header - header_discount);
        let paid = round2(payments.iter().map(|p| p.amount).sum());
        let balance = round2(grand_total - paid);

        Self {
            subtotal,
            line_discount,
            tax,
            header_discount,
            grand_total,
            paid,
            due: balance.max(0.0),
            change: (-balance).max(0.0),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.due == 0.0
    }
}

/// Shared pre-submit checks for every invoice-like document.
pub fn validate_lines(errors: &mut ValidationErrors, lines: &[InvoiceLine]) {
    if lines.is_empty() {
        errors.add("lines", "Add at least one item");
        return;
    }
    for (idx, line) in lines.iter().enumerate() {
        let row = idx + 1;
        if line.product_id.is_none() {
            errors.add("lines", format!("Row {}: select a product", row));
        }
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            errors.add("lines", format!("Row {}: quantity must be greater than zero", row));
        }
        if !line.unit_price.is_finite() || line.unit_price < 0.0 {
            errors.add("lines", format!("Row {}: price cannot be negative", row));
        }
        // RangeInclusive::contains is false for NaN
        if !(0.0..=100.0).contains(&line.discount_percent) {
            errors.add("lines", format!("Row {}: discount must be between 0 and 100", row));
        }
        if !(0.0..=100.0).contains(&line.tax_percent) {
            errors.add("lines", format!("Row {}: tax must be between 0 and 100", row));
        }
    }
}

pub fn validate_payments(errors: &mut ValidationErrors, payments: &[InvoicePayment]) {
    for (idx, payment) in payments.iter().enumerate() {
        if !payment.amount.is_finite() || payment.amount <= 0.0 {
            errors.add("payments", format!("Payment {}: amount must be greater than zero", idx + 1));
        }
        if payment.payment_method_id.is_none() {
            errors.add("payments", format!("Payment {}: select a payment method", idx + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: f64, price: f64, discount: f64, tax: f64) -> InvoiceLine {
        InvoiceLine {
            product_id: Some(1),
            product_name: "Item".into(),
            quantity: qty,
            unit_price: price,
            discount_percent: discount,
            tax_percent: tax,
        }
    }

    fn payment(amount: f64) -> InvoicePayment {
        InvoicePayment {
            id: None,
            payment_method_id: Some(1),
            amount,
            paid_on: "2024-05-01".into(),
            note: String::new(),
        }
    }

    #[test]
    fn test_line_amounts() {
        let l = line(3.0, 100.0, 10.0, 5.0);
        assert_eq!(l.gross(), 300.0);
        assert_eq!(l.discount(), 30.0);
        assert_eq!(l.tax(), 13.5);
        assert_eq!(l.total(), 283.5);
    }

    #[test]
    fn test_totals_with_partial_payment() {
        let lines = vec![line(2.0, 50.0, 0.0, 0.0), line(1.0, 100.0, 10.0, 0.0)];
        let totals = InvoiceTotals::compute(&lines, 40.0, &[payment(100.0)]);
        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.line_discount, 10.0);
        assert_eq!(totals.header_discount, 40.0);
        assert_eq!(totals.grand_total, 150.0);
        assert_eq!(totals.due, 50.0);
        assert_eq!(totals.change, 0.0);
        assert!(!totals.is_settled());
    }

    #[test]
    fn test_overpayment_reports_change() {
        let totals = InvoiceTotals::compute(&[line(1.0, 80.0, 0.0, 0.0)], 0.0, &[payment(100.0)]);
        assert_eq!(totals.due, 0.0);
        assert_eq!(totals.change, 20.0);
        assert!(totals.is_settled());
    }

    #[test]
    fn test_header_discount_is_clamped() {
        let totals = InvoiceTotals::compute(&[line(1.0, 30.0, 0.0, 0.0)], 50.0, &[]);
        assert_eq!(totals.header_discount, 30.0);
        assert_eq!(totals.grand_total, 0.0);

        let totals = InvoiceTotals::compute(&[line(1.0, 30.0, 0.0, 0.0)], -5.0, &[]);
        assert_eq!(totals.header_discount, 0.0);
    }

    #[test]
    fn test_empty_invoice() {
        let totals = InvoiceTotals::compute(&[], 0.0, &[]);
        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn test_validate_lines() {
        let mut errors = ValidationErrors::new();
        validate_lines(&mut errors, &[]);
        assert_eq!(errors.field("lines").len(), 1);

        let mut errors = ValidationErrors::new();
        let mut bad = line(0.0, -1.0, 120.0, 0.0);
        bad.product_id = None;
        validate_lines(&mut errors, &[bad]);
        assert_eq!(errors.field("lines").len(), 4);
    }

    #[test]
    fn test_validate_lines_rejects_tax_out_of_range() {
        let mut errors = ValidationErrors::new();
        validate_lines(&mut errors, &[line(1.0, 100.0, 0.0, -150.0)]);
        assert_eq!(errors.field("lines"), ["Row 1: tax must be between 0 and 100"]);

        let mut errors = ValidationErrors::new();
        validate_lines(&mut errors, &[line(1.0, 100.0, 0.0, 100.5)]);
        assert_eq!(errors.field("lines").len(), 1);

        let mut errors = ValidationErrors::new();
        validate_lines(&mut errors, &[line(1.0, 100.0, 0.0, 100.0)]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_lines_rejects_non_finite_numbers() {
        let mut errors = ValidationErrors::new();
        validate_lines(
            &mut errors,
            &[
                line(1.0, f64::NAN, 0.0, 0.0),
                line(f64::INFINITY, 10.0, 0.0, 0.0),
                line(1.0, 10.0, f64::NAN, f64::NAN),
            ],
        );
        assert_eq!(
            errors.field("lines"),
            [
                "Row 1: price cannot be negative",
                "Row 2: quantity must be greater than zero",
                "Row 3: discount must be between 0 and 100",
                "Row 3: tax must be between 0 and 100",
            ]
        );
    }

    #[test]
    fn test_validate_payments() {
        let mut errors = ValidationErrors::new();
        let mut p = payment(0.0);
        p.payment_method_id = None;
        validate_payments(&mut errors, &[p, payment(10.0)]);
        assert_eq!(errors.field("payments").len(), 2);

        let mut errors = ValidationErrors::new();
        validate_payments(&mut errors, &[payment(f64::NAN)]);
        assert_eq!(errors.field("payments").len(), 1);
    }
}
