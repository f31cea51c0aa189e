use crate::domain::a005_supplier::Supplier;
use crate::domain::a007_product::Product;
use crate::domain::common::{Capabilities, CrudEntity, DocumentStatus, EntityId, InvoiceDocument};
use crate::shared::invoice::{validate_lines, validate_payments, InvoiceLine, InvoicePayment};
use crate::shared::validation::ValidationErrors;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Purchase invoice (goods received from a supplier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(default)]
    pub id: Option<EntityId>,
    /// Assigned by the server on create
    #[serde(default)]
    pub invoice_no: Option<String>,
    pub supplier_id: Option<EntityId>,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub supplier_phone: String,
    /// YYYY-MM-DD
    pub purchase_date: String,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub payments: Vec<InvoicePayment>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub cancel_reason: Option<String>,
    #[serde(default)]
    pub note: String,
}

impl Purchase {
    pub fn new_dated(date: NaiveDate) -> Self {
        let mut purchase = Self::create_new();
        purchase.purchase_date = date.format("%Y-%m-%d").to_string();
        purchase
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseDto {
    pub supplier_id: Option<EntityId>,
    pub purchase_date: String,
    pub lines: Vec<InvoiceLine>,
    pub discount: f64,
    pub payments: Vec<InvoicePayment>,
    pub status: DocumentStatus,
    pub note: String,
}

impl CrudEntity for Purchase {
    type Dto = PurchaseDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        match &self.invoice_no {
            Some(no) => format!("Invoice {}", no),
            None => "New invoice".to_string(),
        }
    }

    fn create_new() -> Self {
        Self {
            id: None,
            invoice_no: None,
            supplier_id: None,
            supplier_name: String::new(),
            supplier_phone: String::new(),
            purchase_date: String::new(),
            lines: vec![InvoiceLine::blank()],
            discount: 0.0,
            payments: Vec::new(),
            status: DocumentStatus::Completed,
            cancel_reason: None,
            note: String::new(),
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_some("supplier_id", "Supplier", &self.supplier_id);
        if NaiveDate::parse_from_str(self.purchase_date.trim(), "%Y-%m-%d").is_err() {
            errors.add("purchase_date", "Purchase date is required");
        }
        validate_lines(&mut errors, &self.lines);
        validate_payments(&mut errors, &self.payments);
        if self.status == DocumentStatus::Cancelled {
            errors.add("status", "A cancelled invoice cannot be edited");
        }
        errors.into_result()
    }

    fn to_dto(&self) -> PurchaseDto {
        PurchaseDto {
            supplier_id: self.supplier_id,
            purchase_date: self.purchase_date.trim().to_string(),
            lines: self.lines.clone(),
            discount: self.discount,
            payments: self.payments.clone(),
            status: self.status,
            note: self.note.trim().to_string(),
        }
    }

    fn aggregate_index() -> &'static str {
        "a009"
    }

    fn resource() -> &'static str {
        "/api/purchases"
    }

    fn element_name() -> &'static str {
        "Purchase"
    }

    fn list_name() -> &'static str {
        "Purchases"
    }

    /// Invoices are cancelled with a reason, never deleted
    fn capabilities() -> Capabilities {
        Capabilities::NONE
    }
}

impl InvoiceDocument for Purchase {
    type Party = Supplier;

    fn party_label() -> &'static str {
        "Supplier"
    }

    fn party_field() -> &'static str {
        "supplier_id"
    }

    fn date_field() -> &'static str {
        "purchase_date"
    }

    fn line_price(product: &Product) -> f64 {
        product.purchase_price
    }

    fn party_id(&self) -> Option<EntityId> {
        self.supplier_id
    }

    fn party_name(&self) -> &str {
        &self.supplier_name
    }

    fn party_phone(&self) -> &str {
        &self.supplier_phone
    }

    fn set_party_phone(&mut self, phone: String) {
        self.supplier_phone = phone;
    }

    fn assign_party(&mut self, party: &Supplier) {
        self.supplier_id = party.id;
        self.supplier_name = party.name.clone();
        self.supplier_phone = party.phone.clone();
    }

    fn clear_party(&mut self) {
        self.supplier_id = None;
        self.supplier_name.clear();
    }

    fn invoice_no(&self) -> Option<&str> {
        self.invoice_no.as_deref()
    }

    fn date(&self) -> &str {
        &self.purchase_date
    }

    fn set_date(&mut self, date: String) {
        self.purchase_date = date;
    }

    fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    fn lines_mut(&mut self) -> &mut Vec<InvoiceLine> {
        &mut self.lines
    }

    fn header_discount(&self) -> f64 {
        self.discount
    }

    fn set_header_discount(&mut self, discount: f64) {
        self.discount = discount;
    }

    fn payments(&self) -> &[InvoicePayment] {
        &self.payments
    }

    fn payments_mut(&mut self) -> &mut Vec<InvoicePayment> {
        &mut self.payments
    }

    fn document_status(&self) -> DocumentStatus {
        self.status
    }

    fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    fn note(&self) -> &str {
        &self.note
    }

    fn set_note(&mut self, note: String) {
        self.note = note;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_purchase_needs_supplier_date_and_product() {
        let errors = Purchase::create_new().validate().unwrap_err();
        assert!(!errors.field("supplier_id").is_empty());
        assert!(!errors.field("purchase_date").is_empty());
        assert!(!errors.field("lines").is_empty());
    }

    #[test]
    fn test_valid_purchase_totals() {
        let mut purchase = Purchase::new_dated(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        purchase.supplier_id = Some(2);
        purchase.lines = vec![InvoiceLine {
            product_id: Some(1),
            product_name: "Rice bag".into(),
            quantity: 2.0,
            unit_price: 400.0,
            discount_percent: 0.0,
            tax_percent: 0.0,
        }];
        assert!(purchase.validate().is_ok());
        assert_eq!(purchase.totals().grand_total, 800.0);
        assert_eq!(purchase.to_dto().purchase_date, "2024-05-01");
    }
}
