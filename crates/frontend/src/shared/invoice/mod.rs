//! Sale and purchase invoices: one service, editor and list toolkit for
//! both, driven by `InvoiceDocument`.

pub mod editor;
pub mod list;
pub mod service;

pub use editor::InvoiceEditor;
pub use list::{document_status_badge, invoice_cell, invoice_columns, pdf_action};
pub use service::InvoiceService;
