use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId};
use crate::shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCategory {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCategoryDto {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub status: bool,
}

impl CrudEntity for TransactionCategory {
    type Dto = TransactionCategoryDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.kind.label())
    }

    fn status(&self) -> Option<bool> {
        Some(self.status)
    }

    fn set_status(&mut self, active: bool) {
        self.status = active;
    }

    fn create_new() -> Self {
        Self {
            id: None,
            name: String::new(),
            kind: TransactionKind::default(),
            description: String::new(),
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.into_result()
    }

    fn to_dto(&self) -> TransactionCategoryDto {
        TransactionCategoryDto {
            name: self.name.trim().to_string(),
            kind: self.kind,
            description: self.description.trim().to_string(),
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn resource() -> &'static str {
        "/api/transaction-categories"
    }

    fn element_name() -> &'static str {
        "Transaction category"
    }

    fn list_name() -> &'static str {
        "Transaction categories"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_name() {
        let category: TransactionCategory =
            serde_json::from_str(r#"{"id": 1, "name": "Rent", "type": "expense"}"#).unwrap();
        assert_eq!(category.kind, TransactionKind::Expense);
        assert_eq!(category.display_name(), "Rent (Expense)");
        assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("other"), None);
    }
}
