use crate::domain::a003_transaction_category::TransactionKind;
use crate::domain::common::{Capabilities, CrudEntity, EntityId};
use crate::shared::validation::ValidationErrors;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Income or expense entry posted against a payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyTransaction {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub category_name: String,
    pub payment_method_id: Option<EntityId>,
    #[serde(default)]
    pub payment_method_name: String,
    pub amount: f64,
    /// YYYY-MM-DD
    pub transaction_date: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyTransactionDto {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: Option<EntityId>,
    pub payment_method_id: Option<EntityId>,
    pub amount: f64,
    pub transaction_date: String,
    pub note: String,
}

impl MoneyTransaction {
    pub fn new_dated(date: NaiveDate) -> Self {
        Self {
            id: None,
            kind: TransactionKind::Expense,
            category_id: None,
            category_name: String::new(),
            payment_method_id: None,
            payment_method_name: String::new(),
            amount: 0.0,
            transaction_date: date.format("%Y-%m-%d").to_string(),
            note: String::new(),
        }
    }

    pub fn of_kind(kind: TransactionKind) -> Self {
        let mut tx = Self::create_new();
        tx.kind = kind;
        tx
    }

    /// Signed amount: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl CrudEntity for MoneyTransaction {
    type Dto = MoneyTransactionDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} {:.2} on {}", self.kind.label(), self.amount, self.transaction_date)
    }

    fn create_new() -> Self {
        Self::new_dated(Local::now().date_naive())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_some("category_id", "Category", &self.category_id);
        errors.require_some("payment_method_id", "Payment method", &self.payment_method_id);
        errors.require_positive("amount", "Amount", self.amount);
        if NaiveDate::parse_from_str(self.transaction_date.trim(), "%Y-%m-%d").is_err() {
            errors.add("transaction_date", "Date is required");
        }
        errors.into_result()
    }

    fn to_dto(&self) -> MoneyTransactionDto {
        MoneyTransactionDto {
            kind: self.kind,
            category_id: self.category_id,
            payment_method_id: self.payment_method_id,
            amount: self.amount,
            transaction_date: self.transaction_date.trim().to_string(),
            note: self.note.trim().to_string(),
        }
    }

    fn aggregate_index() -> &'static str {
        "a010"
    }

    fn resource() -> &'static str {
        "/api/transactions"
    }

    fn element_name() -> &'static str {
        "Transaction"
    }

    fn list_name() -> &'static str {
        "Income & expenses"
    }

    fn capabilities() -> Capabilities {
        Capabilities::DELETE_ONLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let mut tx = MoneyTransaction::of_kind(TransactionKind::Income);
        tx.amount = 50.0;
        assert_eq!(tx.signed_amount(), 50.0);
        tx.kind = TransactionKind::Expense;
        assert_eq!(tx.signed_amount(), -50.0);
    }

    #[test]
    fn test_validation() {
        let mut tx = MoneyTransaction::new_dated(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(tx.validate().unwrap_err().len(), 3);
        tx.category_id = Some(1);
        tx.payment_method_id = Some(1);
        tx.amount = 10.0;
        assert!(tx.validate().is_ok());
        assert_eq!(tx.to_dto().transaction_date, "2024-01-31");

        tx.transaction_date.clear();
        assert!(!tx.validate().unwrap_err().field("transaction_date").is_empty());
    }

    #[test]
    fn test_new_transaction_is_dated() {
        assert!(!MoneyTransaction::create_new().transaction_date.is_empty());
        assert!(!MoneyTransaction::of_kind(TransactionKind::Income).transaction_date.is_empty());
    }
}
