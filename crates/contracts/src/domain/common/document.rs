use super::crud_entity::{CrudEntity, EntityId};
use crate::domain::a007_product::Product;
use crate::shared::invoice::{InvoiceLine, InvoicePayment, InvoiceTotals};
use crate::shared::validation::normalize_phone;
use serde::{Deserialize, Serialize};

/// Lifecycle of transactional documents (sales, purchases).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Completed,
    Cancelled,
}

impl DocumentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Draft",
            DocumentStatus::Completed => "Completed",
            DocumentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn can_cancel(&self) -> bool {
        !matches!(self, DocumentStatus::Cancelled)
    }
}

/// Body of `PATCH {resource}/{id}/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

impl CancelRequest {
    /// A reason is mandatory; whitespace-only input is rejected.
    pub fn new(reason: &str) -> Result<Self, String> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err("Cancellation reason is required".to_string());
        }
        Ok(Self {
            reason: reason.to_string(),
        })
    }
}

/// Counterparty of an invoice: the customer of a sale, the supplier of a purchase.
pub trait InvoiceParty: CrudEntity {
    fn name(&self) -> &str;

    fn phone(&self) -> &str;
}

/// Phone lookups need at least this many digits before they are tried.
pub const MIN_LOOKUP_DIGITS: usize = 7;

/// First candidate whose phone matches `phone`, ignoring formatting.
pub fn match_phone<'a, P: InvoiceParty>(candidates: &'a [P], phone: &str) -> Option<&'a P> {
    let wanted = normalize_phone(phone);
    if wanted.len() < MIN_LOOKUP_DIGITS {
        return None;
    }
    candidates
        .iter()
        .find(|p| normalize_phone(p.phone()) == wanted)
}

/// Shared shape of sale and purchase invoices, so one editor serves both.
pub trait InvoiceDocument: CrudEntity {
    type Party: InvoiceParty;

    /// "Customer" or "Supplier"
    fn party_label() -> &'static str;

    /// Validation key of the party id, e.g. "customer_id"
    fn party_field() -> &'static str;

    /// Validation key of the invoice date
    fn date_field() -> &'static str;

    /// Product price a new line starts with
    fn line_price(product: &Product) -> f64;

    fn party_id(&self) -> Option<EntityId>;

    fn party_name(&self) -> &str;

    fn party_phone(&self) -> &str;

    fn set_party_phone(&mut self, phone: String);

    /// Take id, name and phone from a looked-up party.
    fn assign_party(&mut self, party: &Self::Party);

    /// Forget the selected party, keeping the typed phone.
    fn clear_party(&mut self);

    fn invoice_no(&self) -> Option<&str>;

    /// Invoice date, YYYY-MM-DD
    fn date(&self) -> &str;

    fn set_date(&mut self, date: String);

    fn lines(&self) -> &[InvoiceLine];

    fn lines_mut(&mut self) -> &mut Vec<InvoiceLine>;

    fn header_discount(&self) -> f64;

    fn set_header_discount(&mut self, discount: f64);

    fn payments(&self) -> &[InvoicePayment];

    fn payments_mut(&mut self) -> &mut Vec<InvoicePayment>;

    fn document_status(&self) -> DocumentStatus;

    fn cancel_reason(&self) -> Option<&str>;

    fn note(&self) -> &str;

    fn set_note(&mut self, note: String);

    fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::compute(self.lines(), self.header_discount(), self.payments())
    }

    fn is_editable(&self) -> bool {
        self.document_status() != DocumentStatus::Cancelled
    }

    /// `PATCH` target taking a `CancelRequest`
    fn cancel_path(id: EntityId) -> String {
        format!("{}/{}/cancel", Self::resource(), id)
    }

    /// Printable invoice, served as `application/pdf`
    fn pdf_path(id: EntityId) -> String {
        format!("{}/{}/pdf", Self::resource(), id)
    }

    fn pdf_file_name(&self) -> String {
        match self.invoice_no() {
            Some(no) => format!("{}-{}.pdf", Self::element_name().to_lowercase(), no),
            None => format!("{}.pdf", Self::element_name().to_lowercase()),
        }
    }

    /// Put `product` on line `index` with its price, keeping the quantity.
    fn set_line_product(&mut self, index: usize, product: &Product) {
        let price = Self::line_price(product);
        if let Some(line) = self.lines_mut().get_mut(index) {
            line.product_id = product.id;
            line.product_name = product.name.clone();
            line.unit_price = price;
        }
    }

    /// Append a payment covering what is still due. Returns false, adding
    /// nothing, once the invoice is settled.
    fn add_payment(&mut self, payment_method_id: Option<EntityId>, paid_on: String) -> bool {
        let due = self.totals().due;
        if due <= 0.0 {
            return false;
        }
        self.payments_mut().push(InvoicePayment {
            id: None,
            payment_method_id,
            amount: due,
            paid_on,
            note: String::new(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_reason_required() {
        assert!(CancelRequest::new("   ").is_err());
        assert_eq!(CancelRequest::new(" damaged ").unwrap().reason, "damaged");
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        assert!(!DocumentStatus::Cancelled.can_cancel());
        assert!(DocumentStatus::Completed.can_cancel());
    }

    #[test]
    fn test_match_phone_ignores_formatting() {
        use crate::domain::a004_customer::Customer;
        let mut a = Customer::create_new();
        a.id = Some(1);
        a.phone = "+880 1711-000000".into();
        let mut b = Customer::create_new();
        b.id = Some(2);
        b.phone = "01811000000".into();
        let people = vec![a, b];

        assert_eq!(match_phone(&people, "018 1100 0000").and_then(|c| c.id), Some(2));
        assert_eq!(match_phone(&people, "8801711000000").and_then(|c| c.id), Some(1));
        assert!(match_phone(&people, "0171").is_none());
        assert!(match_phone(&people, "01999999999").is_none());
    }

    #[test]
    fn test_line_product_and_payment_defaults() {
        use crate::domain::a008_sale::Sale;
        let mut product = Product::create_new();
        product.id = Some(9);
        product.name = "Rice".into();
        product.sale_price = 60.0;
        product.purchase_price = 45.0;

        let mut sale = Sale::create_new();
        sale.lines[0].quantity = 3.0;
        sale.set_line_product(0, &product);
        assert_eq!(sale.lines[0].product_id, Some(9));
        assert_eq!(sale.lines[0].unit_price, 60.0);
        assert_eq!(sale.lines[0].quantity, 3.0);

        assert!(sale.add_payment(Some(1), "2024-05-01".into()));
        assert_eq!(sale.payments[0].amount, 180.0);
        assert!(sale.totals().is_settled());
        assert_eq!(Sale::cancel_path(4), "/api/sales/4/cancel");
        assert_eq!(Sale::pdf_path(4), "/api/sales/4/pdf");
    }

    #[test]
    fn test_add_payment_on_settled_invoice_is_skipped() {
        use crate::domain::a008_sale::Sale;
        let mut sale = Sale::create_new();
        sale.customer_id = Some(2);
        sale.sale_date = "2024-05-01".into();
        sale.lines[0].product_id = Some(1);
        sale.lines[0].unit_price = 100.0;

        assert!(sale.add_payment(Some(1), "2024-05-01".into()));
        assert!(!sale.add_payment(Some(1), "2024-05-02".into()));
        assert_eq!(sale.payments.len(), 1);
        assert_eq!(sale.payments[0].amount, 100.0);
        assert!(sale.validate().is_ok());
    }
}
