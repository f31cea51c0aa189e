use crate::domain::a004_customer::Customer;
use crate::domain::a007_product::Product;
use crate::domain::common::{Capabilities, CrudEntity, DocumentStatus, EntityId, InvoiceDocument};
use crate::shared::invoice::{validate_lines, validate_payments, InvoiceLine, InvoicePayment};
use crate::shared::validation::ValidationErrors;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sales invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default)]
    pub id: Option<EntityId>,
    /// Assigned by the server on create
    #[serde(default)]
    pub invoice_no: Option<String>,
    pub customer_id: Option<EntityId>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    /// YYYY-MM-DD
    pub sale_date: String,
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

impl Sale {
    pub fn new_dated(date: NaiveDate) -> Self {
        let mut sale = Self::create_new();
        sale.sale_date = date.format("%Y-%m-%d").to_string();
        sale
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDto {
    pub customer_id: Option<EntityId>,
    pub sale_date: String,
    pub lines: Vec<InvoiceLine>,
    pub discount: f64,
    pub payments: Vec<InvoicePayment>,
    pub status: DocumentStatus,
    pub note: String,
}

impl CrudEntity for Sale {
    type Dto = SaleDto;

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
            customer_id: None,
            customer_name: String::new(),
            customer_phone: String::new(),
            sale_date: String::new(),
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
        errors.require_some("customer_id", "Customer", &self.customer_id);
        if NaiveDate::parse_from_str(self.sale_date.trim(), "%Y-%m-%d").is_err() {
            errors.add("sale_date", "Sale date is required");
        }
        validate_lines(&mut errors, &self.lines);
        validate_payments(&mut errors, &self.payments);
        if self.status == DocumentStatus::Cancelled {
            errors.add("status", "A cancelled invoice cannot be edited");
        }
        errors.into_result()
    }

    fn to_dto(&self) -> SaleDto {
        SaleDto {
            customer_id: self.customer_id,
            sale_date: self.sale_date.trim().to_string(),
            lines: self.lines.clone(),
            discount: self.discount,
            payments: self.payments.clone(),
            status: self.status,
            note: self.note.trim().to_string(),
        }
    }

    fn aggregate_index() -> &'static str {
        "a008"
    }

    fn resource() -> &'static str {
        "/api/sales"
    }

    fn element_name() -> &'static str {
        "Sale"
    }

    fn list_name() -> &'static str {
        "Sales"
    }

    /// Invoices are cancelled with a reason, never deleted
    fn capabilities() -> Capabilities {
        Capabilities::NONE
    }
}

impl InvoiceDocument for Sale {
    type Party = Customer;

    fn party_label() -> &'static str {
        "Customer"
    }

    fn party_field() -> &'static str {
        "customer_id"
    }

    fn date_field() -> &'static str {
        "sale_date"
    }

    fn line_price(product: &Product) -> f64 {
        product.sale_price
    }

    fn party_id(&self) -> Option<EntityId> {
        self.customer_id
    }

    fn party_name(&self) -> &str {
        &self.customer_name
    }

    fn party_phone(&self) -> &str {
        &self.customer_phone
    }

    fn set_party_phone(&mut self, phone: String) {
        self.customer_phone = phone;
    }

    fn assign_party(&mut self, party: &Customer) {
        self.customer_id = party.id;
        self.customer_name = party.name.clone();
        self.customer_phone = party.phone.clone();
    }

    fn clear_party(&mut self) {
        self.customer_id = None;
        self.customer_name.clear();
    }

    fn invoice_no(&self) -> Option<&str> {
        self.invoice_no.as_deref()
    }

    fn date(&self) -> &str {
        &self.sale_date
    }

    fn set_date(&mut self, date: String) {
        self.sale_date = date;
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
    fn test_blank_sale_needs_customer_date_and_product() {
        let errors = Sale::create_new().validate().unwrap_err();
        assert!(!errors.field("customer_id").is_empty());
        assert!(!errors.field("sale_date").is_empty());
        assert!(!errors.field("lines").is_empty());
    }

    #[test]
    fn test_valid_sale_totals() {
        let mut sale = Sale::new_dated(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        sale.customer_id = Some(2);
        sale.lines = vec![InvoiceLine {
            product_id: Some(1),
            product_name: "Rice".into(),
            quantity: 2.0,
            unit_price: 450.0,
            discount_percent: 0.0,
            tax_percent: 0.0,
        }];
        assert!(sale.validate().is_ok());
        assert_eq!(sale.totals().grand_total, 900.0);
        assert_eq!(sale.to_dto().sale_date, "2024-05-01");
    }

    #[test]
    fn test_negative_tax_is_rejected() {
        let mut sale = Sale::new_dated(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        sale.customer_id = Some(2);
        sale.lines = vec![InvoiceLine {
            product_id: Some(1),
            product_name: "Rice".into(),
            quantity: 1.0,
            unit_price: 100.0,
            discount_percent: 0.0,
            tax_percent: -150.0,
        }];
        assert_eq!(sale.totals().grand_total, -50.0);
        let errors = sale.validate().unwrap_err();
        assert_eq!(errors.field("lines"), ["Row 1: tax must be between 0 and 100"]);
    }
}
