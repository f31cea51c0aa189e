use contracts::domain::common::{
    match_phone, CancelRequest, CrudEntity, EntityId, InvoiceDocument, MIN_LOOKUP_DIGITS,
};
use contracts::shared::api::ListQuery;
use contracts::shared::validation::{normalize_phone, ValidationErrors};

use crate::shared::crud::flows::{self, SaveOutcome};
use crate::shared::crud::{CrudService, RestService};
use crate::shared::export::save_bytes;
use crate::shared::http::{ApiClient, ApiError};

/// Candidates fetched per phone lookup
const PHONE_LOOKUP_LIMIT: usize = 20;

/// Search query for a phone lookup, `None` while too few digits are typed.
pub fn phone_lookup_query(phone: &str) -> Option<ListQuery> {
    if normalize_phone(phone).len() < MIN_LOOKUP_DIGITS {
        return None;
    }
    Some(ListQuery::new(1, PHONE_LOOKUP_LIMIT, Some(phone.trim())))
}

/// Requests beyond plain CRUD that invoices need.
pub struct InvoiceService<D> {
    rest: RestService<D>,
}

impl<D> Clone for InvoiceService<D> {
    fn clone(&self) -> Self {
        Self {
            rest: self.rest.clone(),
        }
    }
}

impl<D: InvoiceDocument> InvoiceService<D> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            rest: RestService::new(client),
        }
    }

    fn client(&self) -> &ApiClient {
        self.rest.client()
    }

    pub async fn load(&self, id: EntityId) -> Result<D, ApiError> {
        self.rest.get(id).await
    }

    pub async fn save(&self, document: &D) -> Result<SaveOutcome, ApiError> {
        flows::save_item(&self.rest, document).await
    }

    /// A blank reason is rejected locally as a field error on "reason".
    pub async fn cancel(&self, id: EntityId, reason: &str) -> Result<(), ApiError> {
        let request = CancelRequest::new(reason).map_err(|message| {
            let mut errors = ValidationErrors::new();
            errors.add("reason", message);
            ApiError::Invalid(errors)
        })?;
        let _: serde_json::Value = self.client().patch(&D::cancel_path(id), &request).await?;
        log::info!("{} {} cancelled", D::element_name(), id);
        Ok(())
    }

    /// Fetch the printable invoice and hand it to the browser.
    pub async fn download_pdf(&self, id: EntityId, file_name: &str) -> Result<(), ApiError> {
        let bytes = self.client().download(&D::pdf_path(id)).await?;
        save_bytes(&bytes, file_name, "application/pdf").map_err(ApiError::Decode)
    }

    /// Party whose phone matches exactly (formatting ignored).
    pub async fn find_party(&self, phone: &str) -> Result<Option<D::Party>, ApiError> {
        let Some(query) = phone_lookup_query(phone) else {
            return Ok(None);
        };
        let page = self
            .client()
            .get_page::<D::Party>(<D::Party as CrudEntity>::resource(), &query)
            .await?;
        Ok(match_phone(&page.data, phone).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_lookup_query() {
        assert!(phone_lookup_query("01 71").is_none());
        let query = phone_lookup_query(" +880 1711-000000 ").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, PHONE_LOOKUP_LIMIT);
        assert_eq!(query.search.as_deref(), Some("+880 1711-000000"));
    }
}
