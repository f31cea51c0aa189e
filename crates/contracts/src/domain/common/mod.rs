//! Common types and traits for all entities

pub mod crud_entity;
pub mod document;

// Re-exports
pub use crud_entity::{Capabilities, CrudEntity, EntityId};
pub(crate) use crud_entity::default_true;
pub use document::{match_phone, CancelRequest, DocumentStatus, InvoiceDocument, InvoiceParty, MIN_LOOKUP_DIGITS};
